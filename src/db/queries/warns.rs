use sqlx::SqlitePool;

use crate::db::models::Warning;

pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    mod_id: i64,
    reason: &str,
    time: i64,
) -> Result<Warning, sqlx::Error> {
    sqlx::query_as::<_, Warning>(
        r#"
        INSERT INTO warns (user_id, mod_id, reason, time)
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(mod_id)
    .bind(reason)
    .bind(time)
    .fetch_one(pool)
    .await
}

/// Warnings for a user in insertion order.
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<Warning>, sqlx::Error> {
    sqlx::query_as::<_, Warning>("SELECT * FROM warns WHERE user_id = ? ORDER BY id")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Delete a warning by id. Returns false if no such id existed; deleting a
/// missing warning is not an error.
pub async fn delete(pool: &SqlitePool, warn_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM warns WHERE id = ?")
        .bind(warn_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::test_pool;

    #[tokio::test]
    async fn warn_then_unwarn_removes_the_row() {
        let pool = test_pool().await;

        let first = create(&pool, 10, 1, "caps lock", 1_000).await.unwrap();
        let second = create(&pool, 10, 1, "still caps lock", 2_000).await.unwrap();
        assert_ne!(first.id, second.id);

        assert!(delete(&pool, first.id).await.unwrap());

        let remaining = list_for_user(&pool, 10).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second.id);
        assert_eq!(remaining[0].reason, "still caps lock");
    }

    #[tokio::test]
    async fn deleting_a_missing_warning_is_a_no_op() {
        let pool = test_pool().await;

        assert!(!delete(&pool, 9999).await.unwrap());
    }

    #[tokio::test]
    async fn warnings_list_in_insertion_order() {
        let pool = test_pool().await;

        for (i, reason) in ["first", "second", "third"].iter().enumerate() {
            create(&pool, 5, 2, reason, i as i64).await.unwrap();
        }

        let rows = list_for_user(&pool, 5).await.unwrap();
        let reasons: Vec<&str> = rows.iter().map(|w| w.reason.as_str()).collect();
        assert_eq!(reasons, ["first", "second", "third"]);
    }
}
