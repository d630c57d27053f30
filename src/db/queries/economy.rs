use sqlx::SqlitePool;

use crate::constants::limits::STARTING_BALANCE;
use crate::db::models::Account;

/// Fetch a user's account, creating it with the starting balance on first
/// access. The OR IGNORE keeps concurrent first reads from racing.
pub async fn get_or_create_account(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Account, sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO economy (user_id, balance) VALUES (?, ?)")
        .bind(user_id)
        .bind(STARTING_BALANCE)
        .execute(pool)
        .await?;

    sqlx::query_as::<_, Account>("SELECT * FROM economy WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// Add `delta` (which may be negative) to a user's balance, creating the
/// account at 0 first if absent. Deliberately does not clamp at zero:
/// sufficiency checks are the caller's policy.
pub async fn adjust_balance(
    pool: &SqlitePool,
    user_id: i64,
    delta: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO economy (user_id, balance) VALUES (?, 0)")
        .bind(user_id)
        .execute(pool)
        .await?;

    sqlx::query("UPDATE economy SET balance = balance + ? WHERE user_id = ?")
        .bind(delta)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn set_last_daily_claim(
    pool: &SqlitePool,
    user_id: i64,
    claimed_at: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE economy SET last_daily_claim = ? WHERE user_id = ?")
        .bind(claimed_at)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::test_pool;

    #[tokio::test]
    async fn first_read_creates_account_with_starting_balance() {
        let pool = test_pool().await;

        let account = get_or_create_account(&pool, 42).await.unwrap();
        assert_eq!(account.balance, STARTING_BALANCE);
        assert_eq!(account.last_daily_claim, None);

        // The row persists: a second read sees the same account, not a reset.
        adjust_balance(&pool, 42, -30).await.unwrap();
        let account = get_or_create_account(&pool, 42).await.unwrap();
        assert_eq!(account.balance, STARTING_BALANCE - 30);
    }

    #[tokio::test]
    async fn adjust_balance_does_not_clamp_at_zero() {
        let pool = test_pool().await;

        adjust_balance(&pool, 7, -250).await.unwrap();
        let account = get_or_create_account(&pool, 7).await.unwrap();
        assert_eq!(account.balance, -250);
    }

    #[tokio::test]
    async fn adjust_balance_creates_missing_account_at_zero() {
        let pool = test_pool().await;

        adjust_balance(&pool, 9, 25).await.unwrap();
        let account = get_or_create_account(&pool, 9).await.unwrap();
        assert_eq!(account.balance, 25);
    }

    #[tokio::test]
    async fn last_daily_claim_round_trips() {
        let pool = test_pool().await;

        get_or_create_account(&pool, 3).await.unwrap();
        set_last_daily_claim(&pool, 3, 1_700_000_000).await.unwrap();

        let account = get_or_create_account(&pool, 3).await.unwrap();
        assert_eq!(account.last_daily_claim, Some(1_700_000_000));
    }
}
