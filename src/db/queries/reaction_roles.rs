use sqlx::SqlitePool;

/// Store a (message, emoji) -> role binding. Idempotent: the unique index on
/// the full triple makes a repeated bind a no-op.
pub async fn bind(
    pool: &SqlitePool,
    msg_id: i64,
    emoji: &str,
    role_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO reaction_roles (msg_id, emoji, role_id) VALUES (?, ?, ?)")
        .bind(msg_id)
        .bind(emoji)
        .bind(role_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Remove every binding for a (message, emoji) pair. Returns how many rows
/// were removed.
pub async fn unbind(
    pool: &SqlitePool,
    msg_id: i64,
    emoji: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM reaction_roles WHERE msg_id = ? AND emoji = ?")
        .bind(msg_id)
        .bind(emoji)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// First role bound to a (message, emoji) pair, if any.
pub async fn find_role(
    pool: &SqlitePool,
    msg_id: i64,
    emoji: &str,
) -> Result<Option<i64>, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as(
        "SELECT role_id FROM reaction_roles WHERE msg_id = ? AND emoji = ? ORDER BY rowid LIMIT 1",
    )
    .bind(msg_id)
    .bind(emoji)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(role_id,)| role_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::test_pool;

    #[tokio::test]
    async fn bound_pair_resolves_to_its_role() {
        let pool = test_pool().await;

        bind(&pool, 100, "🔥", 777).await.unwrap();

        assert_eq!(find_role(&pool, 100, "🔥").await.unwrap(), Some(777));
        assert_eq!(find_role(&pool, 100, "🎉").await.unwrap(), None);
        assert_eq!(find_role(&pool, 101, "🔥").await.unwrap(), None);
    }

    #[tokio::test]
    async fn rebinding_the_same_triple_is_idempotent() {
        let pool = test_pool().await;

        bind(&pool, 100, "🔥", 777).await.unwrap();
        bind(&pool, 100, "🔥", 777).await.unwrap();

        // One live binding: a single unbind clears the pair completely.
        assert_eq!(unbind(&pool, 100, "🔥").await.unwrap(), 1);
        assert_eq!(find_role(&pool, 100, "🔥").await.unwrap(), None);
    }

    #[tokio::test]
    async fn unbind_removes_all_roles_for_the_pair() {
        let pool = test_pool().await;

        bind(&pool, 100, "🔥", 777).await.unwrap();
        bind(&pool, 100, "🔥", 888).await.unwrap();

        // Lookup keeps first-match behavior when two roles share an emoji.
        assert_eq!(find_role(&pool, 100, "🔥").await.unwrap(), Some(777));

        assert_eq!(unbind(&pool, 100, "🔥").await.unwrap(), 2);
        assert_eq!(find_role(&pool, 100, "🔥").await.unwrap(), None);
    }
}
