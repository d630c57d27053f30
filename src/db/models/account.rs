#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub user_id: i64,
    pub balance: i64,
    /// Unix seconds of the last daily claim, None before the first claim.
    pub last_daily_claim: Option<i64>,
}
