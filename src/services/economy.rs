use rand::Rng;
use sqlx::SqlitePool;

use crate::bot::error::Error;
use crate::constants::limits::{
    DAILY_COOLDOWN_SECONDS, DAILY_REWARD_MIN, DAILY_REWARD_MAX, WORK_REWARD_MIN, WORK_REWARD_MAX,
};
use crate::db::queries::{economy, shop};

#[derive(Debug)]
pub enum DailyOutcome {
    Granted { amount: i64 },
    OnCooldown { wait_secs: i64 },
}

/// Seconds left on the daily cooldown, or None when a claim is allowed.
/// A backwards clock step makes `elapsed` negative, which still refuses the
/// claim, so the once-per-24h rule holds under skew.
pub fn daily_wait_remaining(last_claim: Option<i64>, now: i64) -> Option<i64> {
    let last = last_claim?;
    let elapsed = now - last;
    if elapsed >= DAILY_COOLDOWN_SECONDS {
        None
    } else {
        Some(DAILY_COOLDOWN_SECONDS - elapsed)
    }
}

/// Grant the once-per-24h daily reward, 100-300 coins uniformly.
pub async fn daily_claim(
    pool: &SqlitePool,
    user_id: i64,
    now: i64,
) -> Result<DailyOutcome, Error> {
    let account = economy::get_or_create_account(pool, user_id).await?;

    if let Some(wait_secs) = daily_wait_remaining(account.last_daily_claim, now) {
        return Ok(DailyOutcome::OnCooldown { wait_secs });
    }

    let amount = rand::rng().random_range(DAILY_REWARD_MIN..=DAILY_REWARD_MAX);
    economy::adjust_balance(pool, user_id, amount).await?;
    economy::set_last_daily_claim(pool, user_id, now).await?;

    Ok(DailyOutcome::Granted { amount })
}

/// Pay out a work shift, 20-150 coins uniformly. No cooldown.
pub async fn work(pool: &SqlitePool, user_id: i64) -> Result<i64, Error> {
    let amount = rand::rng().random_range(WORK_REWARD_MIN..=WORK_REWARD_MAX);
    economy::adjust_balance(pool, user_id, amount).await?;
    Ok(amount)
}

#[derive(Debug)]
pub struct Purchase {
    /// Shop key of the bought item; callers grant a same-named role if one
    /// exists in the guild.
    pub item: String,
    pub price: i64,
}

/// Buy an item: reject unknown items and insufficient balances, otherwise
/// deduct exactly the price. The sufficiency check lives here, not in
/// `adjust_balance`.
pub async fn purchase(
    pool: &SqlitePool,
    user_id: i64,
    item_name: &str,
) -> Result<Purchase, Error> {
    let item = shop::get_item(pool, item_name)
        .await?
        .ok_or_else(|| Error::UnknownItem(item_name.to_string()))?;

    let account = economy::get_or_create_account(pool, user_id).await?;
    if account.balance < item.price {
        return Err(Error::InsufficientFunds {
            balance: account.balance,
            price: item.price,
        });
    }

    economy::adjust_balance(pool, user_id, -item.price).await?;

    Ok(Purchase {
        item: item.item,
        price: item.price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::limits::STARTING_BALANCE;
    use crate::db::pool::test_pool;

    #[test]
    fn cooldown_math() {
        // Never claimed: allowed
        assert_eq!(daily_wait_remaining(None, 1_000), None);
        // Claimed just now: a full day remains
        assert_eq!(
            daily_wait_remaining(Some(1_000), 1_000),
            Some(DAILY_COOLDOWN_SECONDS)
        );
        // One second short of a day: one second remains
        assert_eq!(
            daily_wait_remaining(Some(1_000), 1_000 + DAILY_COOLDOWN_SECONDS - 1),
            Some(1)
        );
        // A day later: allowed again
        assert_eq!(
            daily_wait_remaining(Some(1_000), 1_000 + DAILY_COOLDOWN_SECONDS),
            None
        );
        // Clock stepped backwards: still refused
        assert!(daily_wait_remaining(Some(1_000), 500).is_some());
    }

    #[tokio::test]
    async fn daily_cannot_be_claimed_twice_in_a_day() {
        let pool = test_pool().await;
        let now = 1_700_000_000;

        let first = daily_claim(&pool, 1, now).await.unwrap();
        let amount = match first {
            DailyOutcome::Granted { amount } => amount,
            other => panic!("expected grant, got {:?}", other),
        };
        assert!((DAILY_REWARD_MIN..=DAILY_REWARD_MAX).contains(&amount));

        match daily_claim(&pool, 1, now + 3600).await.unwrap() {
            DailyOutcome::OnCooldown { wait_secs } => {
                assert_eq!(wait_secs, DAILY_COOLDOWN_SECONDS - 3600)
            }
            other => panic!("expected cooldown, got {:?}", other),
        }

        // A full day later the claim goes through again
        match daily_claim(&pool, 1, now + DAILY_COOLDOWN_SECONDS).await.unwrap() {
            DailyOutcome::Granted { .. } => {}
            other => panic!("expected grant, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn work_pays_within_range() {
        let pool = test_pool().await;

        let amount = work(&pool, 2).await.unwrap();
        assert!((WORK_REWARD_MIN..=WORK_REWARD_MAX).contains(&amount));

        let account = economy::get_or_create_account(&pool, 2).await.unwrap();
        assert_eq!(account.balance, STARTING_BALANCE + amount);
    }

    #[tokio::test]
    async fn purchase_rejects_without_touching_the_balance() {
        let pool = test_pool().await;

        // Starting balance is 100, VIP costs 500
        match purchase(&pool, 3, "VIP").await {
            Err(Error::InsufficientFunds { balance, price }) => {
                assert_eq!(balance, STARTING_BALANCE);
                assert_eq!(price, 500);
            }
            other => panic!("expected InsufficientFunds, got {:?}", other.map(|p| p.price)),
        }

        let account = economy::get_or_create_account(&pool, 3).await.unwrap();
        assert_eq!(account.balance, STARTING_BALANCE);

        match purchase(&pool, 3, "Elytra").await {
            Err(Error::UnknownItem(name)) => assert_eq!(name, "Elytra"),
            other => panic!("expected UnknownItem, got {:?}", other.map(|p| p.price)),
        }
    }

    #[tokio::test]
    async fn end_to_end_work_until_vip() {
        let pool = test_pool().await;
        let user = 11;

        // A fresh account starts at 100; one shift adds its payout on top
        let start = economy::get_or_create_account(&pool, user).await.unwrap().balance;
        assert_eq!(start, STARTING_BALANCE);
        let earned = work(&pool, user).await.unwrap();
        let mut balance = economy::get_or_create_account(&pool, user).await.unwrap().balance;
        assert_eq!(balance, start + earned);

        // VIP costs 500: out of reach after a single shift
        assert!(matches!(
            purchase(&pool, user, "VIP").await,
            Err(Error::InsufficientFunds { .. })
        ));
        assert_eq!(
            economy::get_or_create_account(&pool, user).await.unwrap().balance,
            balance
        );

        // Grind shifts until the price is covered (each pays at least 20)
        while balance < 500 {
            work(&pool, user).await.unwrap();
            balance = economy::get_or_create_account(&pool, user).await.unwrap().balance;
        }

        let bought = purchase(&pool, user, "VIP").await.unwrap();
        assert_eq!(bought.item, "VIP");
        let after = economy::get_or_create_account(&pool, user).await.unwrap().balance;
        assert_eq!(after, balance - 500);
    }

    #[tokio::test]
    async fn purchase_deducts_exactly_the_price() {
        let pool = test_pool().await;

        economy::adjust_balance(&pool, 4, 600).await.unwrap();
        let before = economy::get_or_create_account(&pool, 4).await.unwrap().balance;
        assert_eq!(before, 600);

        let bought = purchase(&pool, 4, "VIP").await.unwrap();
        assert_eq!(bought.item, "VIP");
        assert_eq!(bought.price, 500);

        let after = economy::get_or_create_account(&pool, 4).await.unwrap().balance;
        assert_eq!(after, 100);
    }
}
