#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Warning {
    pub id: i64,
    pub user_id: i64,
    pub mod_id: i64,
    pub reason: String,
    /// Unix seconds when the warning was issued.
    pub time: i64,
}
