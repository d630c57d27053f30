use sqlx::SqlitePool;

use crate::db::models::ShopItem;

pub async fn get_item(
    pool: &SqlitePool,
    item: &str,
) -> Result<Option<ShopItem>, sqlx::Error> {
    sqlx::query_as::<_, ShopItem>("SELECT * FROM shop WHERE item = ?")
        .bind(item)
        .fetch_optional(pool)
        .await
}

pub async fn list_items(pool: &SqlitePool) -> Result<Vec<ShopItem>, sqlx::Error> {
    sqlx::query_as::<_, ShopItem>("SELECT * FROM shop ORDER BY price")
        .fetch_all(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::test_pool;

    #[tokio::test]
    async fn catalog_is_seeded_with_vip() {
        let pool = test_pool().await;

        let vip = get_item(&pool, "VIP").await.unwrap().expect("seeded item");
        assert_eq!(vip.price, 500);

        let items = list_items(&pool).await.unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn unknown_item_is_none() {
        let pool = test_pool().await;

        assert!(get_item(&pool, "Diamond Sword").await.unwrap().is_none());
    }
}
