#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShopItem {
    pub item: String,
    pub price: i64,
    pub description: String,
}
