//! Transaction history read model with in-memory grouping and totals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use simroam_core::{Currency, Money, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    EsimPurchase,
    AirtimeTopup,
    WalletTopup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

/// One line of the transaction history page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub user_id: UserId,
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Money,
    pub status: TransactionStatus,
    pub occurred_at: DateTime<Utc>,
}

impl Transaction {
    /// Top-ups add to the wallet; everything else spends from it.
    pub fn is_credit(&self) -> bool {
        matches!(self.kind, TransactionKind::WalletTopup)
    }
}

/// The fetched transaction rows plus the display helpers the history and
/// dashboard pages need.
#[derive(Debug, Clone, Default)]
pub struct TransactionHistory {
    rows: Vec<Transaction>,
}

impl TransactionHistory {
    pub fn new(rows: Vec<Transaction>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Rows newest first, as the history page renders them.
    pub fn newest_first(&self) -> Vec<&Transaction> {
        let mut rows: Vec<&Transaction> = self.rows.iter().collect();
        rows.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        rows
    }

    pub fn with_status(&self, status: TransactionStatus) -> Vec<&Transaction> {
        self.rows.iter().filter(|t| t.status == status).collect()
    }

    pub fn of_kind(&self, kind: TransactionKind) -> Vec<&Transaction> {
        self.rows.iter().filter(|t| t.kind == kind).collect()
    }

    /// Completed spend in one currency (purchases and airtime, not top-ups).
    pub fn total_spent(&self, currency: Currency) -> Money {
        self.sum(currency, |t| !t.is_credit())
    }

    /// Completed wallet top-ups in one currency.
    pub fn total_topups(&self, currency: Currency) -> Money {
        self.sum(currency, |t| t.is_credit())
    }

    fn sum(&self, currency: Currency, include: impl Fn(&Transaction) -> bool) -> Money {
        let total = self
            .rows
            .iter()
            .filter(|t| t.status == TransactionStatus::Completed)
            .filter(|t| t.amount.currency == currency)
            .filter(|t| include(t))
            .map(|t| t.amount.amount_minor)
            .sum();
        Money::new(total, currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn tx(
        kind: TransactionKind,
        amount: i64,
        currency: Currency,
        status: TransactionStatus,
        age: Duration,
    ) -> Transaction {
        Transaction {
            user_id: UserId::new(),
            kind,
            description: "test".to_string(),
            amount: Money::new(amount, currency),
            status,
            occurred_at: Utc::now() - age,
        }
    }

    fn history() -> TransactionHistory {
        TransactionHistory::new(vec![
            tx(
                TransactionKind::EsimPurchase,
                1_200,
                Currency::Kes,
                TransactionStatus::Completed,
                Duration::days(3),
            ),
            tx(
                TransactionKind::AirtimeTopup,
                800,
                Currency::Kes,
                TransactionStatus::Completed,
                Duration::days(1),
            ),
            tx(
                TransactionKind::WalletTopup,
                2_000,
                Currency::Kes,
                TransactionStatus::Completed,
                Duration::days(2),
            ),
            tx(
                TransactionKind::EsimPurchase,
                15_000,
                Currency::Ugx,
                TransactionStatus::Completed,
                Duration::days(4),
            ),
            tx(
                TransactionKind::EsimPurchase,
                9_999,
                Currency::Kes,
                TransactionStatus::Failed,
                Duration::hours(1),
            ),
        ])
    }

    #[test]
    fn totals_are_per_currency_and_completed_only() {
        let h = history();
        assert_eq!(h.total_spent(Currency::Kes), Money::new(2_000, Currency::Kes));
        assert_eq!(h.total_topups(Currency::Kes), Money::new(2_000, Currency::Kes));
        assert_eq!(h.total_spent(Currency::Ugx), Money::new(15_000, Currency::Ugx));
        assert_eq!(h.total_spent(Currency::Usd), Money::zero(Currency::Usd));
    }

    #[test]
    fn newest_first_ordering() {
        let h = history();
        let rows = h.newest_first();
        assert_eq!(rows[0].status, TransactionStatus::Failed); // 1h old
        assert!(rows
            .windows(2)
            .all(|w| w[0].occurred_at >= w[1].occurred_at));
    }

    #[test]
    fn kind_and_status_filters() {
        let h = history();
        assert_eq!(h.of_kind(TransactionKind::EsimPurchase).len(), 3);
        assert_eq!(h.with_status(TransactionStatus::Failed).len(), 1);
    }
}
