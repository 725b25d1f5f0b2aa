//! Append-only LeafCoin ledger.
//!
//! The balance is never stored; it is the sum of the signed amounts. Spends
//! are recorded with a negative amount so that sum stays the balance.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Earned,
    Spent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardTransaction {
    pub id: String,
    /// Positive for earnings, negative for spends.
    pub amount: i64,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// Insertion-ordered coin history, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RewardLedger {
    transactions: Vec<RewardTransaction>,
}

impl RewardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_coins(&mut self, amount: u32, reason: impl Into<String>) {
        self.add_coins_at(amount, reason, Utc::now());
    }

    /// Record an earning. A zero amount records nothing.
    pub fn add_coins_at(&mut self, amount: u32, reason: impl Into<String>, at: DateTime<Utc>) {
        if amount == 0 {
            return;
        }
        self.push(i64::from(amount), reason.into(), at, TransactionKind::Earned);
    }

    pub fn spend_coins(&mut self, amount: u32, reason: impl Into<String>) -> bool {
        self.spend_coins_at(amount, reason, Utc::now())
    }

    /// Record a spend if the balance covers it. Returns false, leaving the
    /// ledger untouched, when it does not (or when `amount` is zero).
    pub fn spend_coins_at(
        &mut self,
        amount: u32,
        reason: impl Into<String>,
        at: DateTime<Utc>,
    ) -> bool {
        let amount = i64::from(amount);
        if amount == 0 || self.balance() < amount {
            return false;
        }
        self.push(-amount, reason.into(), at, TransactionKind::Spent);
        true
    }

    pub fn balance(&self) -> i64 {
        self.transactions.iter().map(|t| t.amount).sum()
    }

    pub fn transactions(&self) -> &[RewardTransaction] {
        &self.transactions
    }

    /// The `n` latest transactions, most recent first.
    pub fn recent_transactions(&self, n: usize) -> Vec<&RewardTransaction> {
        self.transactions.iter().rev().take(n).collect()
    }

    /// Sum of earnings with a timestamp at or after `start`.
    pub fn earnings_in_window(&self, start: DateTime<Utc>) -> i64 {
        self.transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Earned && t.timestamp >= start)
            .map(|t| t.amount)
            .sum()
    }

    /// Earnings since local midnight of `now`'s calendar day.
    pub fn earnings_today<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        let midnight = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .and_then(|naive| now.timezone().from_local_datetime(&naive).earliest())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| now.with_timezone(&Utc) - Duration::hours(24));
        self.earnings_in_window(midnight)
    }

    /// Earnings over the trailing seven days.
    pub fn earnings_this_week(&self, now: DateTime<Utc>) -> i64 {
        self.earnings_in_window(now - Duration::days(7))
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn push(&mut self, amount: i64, reason: String, at: DateTime<Utc>, kind: TransactionKind) {
        self.transactions.push(RewardTransaction {
            id: format!("tx-{}", Uuid::new_v4()),
            amount,
            reason,
            timestamp: at,
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn add_increases_balance() {
        let mut ledger = RewardLedger::new();
        ledger.add_coins(10, "Focus Session Completed");
        ledger.add_coins(25, "Daily Goal Achieved");
        assert_eq!(ledger.balance(), 35);
        assert_eq!(ledger.len(), 2);
        assert!(ledger
            .transactions()
            .iter()
            .all(|t| t.kind == TransactionKind::Earned));
    }

    #[test]
    fn spend_with_insufficient_balance_is_refused() {
        let mut ledger = RewardLedger::new();
        ledger.add_coins(10, "Focus Session Completed");
        assert!(!ledger.spend_coins(11, "Golden seed"));
        assert_eq!(ledger.balance(), 10);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn spend_records_negative_amount() {
        let mut ledger = RewardLedger::new();
        ledger.add_coins(10, "Focus Session Completed");
        assert!(ledger.spend_coins(10, "Golden seed"));
        assert_eq!(ledger.balance(), 0);
        let last = ledger.recent_transactions(1)[0];
        assert_eq!(last.amount, -10);
        assert_eq!(last.kind, TransactionKind::Spent);
    }

    #[test]
    fn zero_amounts_are_ignored() {
        let mut ledger = RewardLedger::new();
        ledger.add_coins(0, "nothing");
        assert!(ledger.is_empty());
        assert!(!ledger.spend_coins(0, "nothing"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn recent_is_most_recent_first() {
        let mut ledger = RewardLedger::new();
        ledger.add_coins_at(1, "first", at(8));
        ledger.add_coins_at(2, "second", at(9));
        ledger.add_coins_at(3, "third", at(10));
        let recent: Vec<_> = ledger
            .recent_transactions(2)
            .iter()
            .map(|t| t.reason.as_str())
            .collect();
        assert_eq!(recent, vec!["third", "second"]);
        assert_eq!(ledger.recent_transactions(10).len(), 3);
    }

    #[test]
    fn window_counts_only_earnings_at_or_after_start() {
        let mut ledger = RewardLedger::new();
        ledger.add_coins_at(10, "early", at(8));
        ledger.add_coins_at(15, "on time", at(9));
        ledger.add_coins_at(25, "late", at(11));
        assert!(ledger.spend_coins_at(20, "spend", at(12)));
        assert_eq!(ledger.earnings_in_window(at(9)), 40);
        assert_eq!(ledger.earnings_in_window(at(13)), 0);
    }

    #[test]
    fn today_starts_at_local_midnight() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let mut ledger = RewardLedger::new();
        // 21:30 UTC on the 9th is 23:30 local on the 9th.
        ledger.add_coins_at(10, "yesterday", Utc.with_ymd_and_hms(2026, 3, 9, 21, 30, 0).unwrap());
        // 22:30 UTC on the 9th is 00:30 local on the 10th.
        ledger.add_coins_at(15, "today", Utc.with_ymd_and_hms(2026, 3, 9, 22, 30, 0).unwrap());
        let now = at(12).with_timezone(&offset);
        assert_eq!(ledger.earnings_today(&now), 15);
    }

    #[test]
    fn week_covers_trailing_seven_days() {
        let mut ledger = RewardLedger::new();
        let now = at(12);
        ledger.add_coins_at(50, "old", now - Duration::days(8));
        ledger.add_coins_at(10, "recent", now - Duration::days(6));
        assert_eq!(ledger.earnings_this_week(now), 10);
    }

    #[test]
    fn persisted_shape_is_a_plain_array() {
        let mut ledger = RewardLedger::new();
        ledger.add_coins_at(10, "Focus Session Completed", at(8));
        let json = serde_json::to_value(&ledger).unwrap();
        let first = &json.as_array().unwrap()[0];
        assert_eq!(first["type"], "earned");
        assert_eq!(first["amount"], 10);
        let restored: RewardLedger = serde_json::from_value(json).unwrap();
        assert_eq!(restored, ledger);
    }
}
