//! Shared money ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of transactions kept in the ledger, newest first
pub const RECENT_TRANSACTIONS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "CNY")]
    Cny,
    #[serde(rename = "IDR")]
    Idr,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Cny => write!(f, "CNY"),
            Currency::Idr => write!(f, "IDR"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(rename = "CNY", default)]
    pub cny: f64,
    #[serde(rename = "IDR", default)]
    pub idr: f64,
}

impl Balance {
    pub fn get(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Cny => self.cny,
            Currency::Idr => self.idr,
        }
    }

    fn get_mut(&mut self, currency: Currency) -> &mut f64 {
        match currency {
            Currency::Cny => &mut self.cny,
            Currency::Idr => &mut self.idr,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultTransaction {
    pub id: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub currency: Currency,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaultData {
    #[serde(default)]
    pub balance: Balance,
    #[serde(default)]
    pub transactions: Vec<VaultTransaction>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VaultError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    #[error("Insufficient funds: {currency} balance {balance} < {requested}")]
    InsufficientFunds {
        currency: Currency,
        balance: f64,
        requested: f64,
    },
}

impl VaultData {
    /// Record a deposit or withdrawal and adjust the balance.
    ///
    /// The amount must be finite and positive; a withdrawal may not exceed the
    /// current balance of its currency.
    pub fn apply(
        &mut self,
        kind: TransactionKind,
        currency: Currency,
        amount: f64,
        description: impl Into<String>,
    ) -> Result<&VaultTransaction, VaultError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(VaultError::InvalidAmount(amount));
        }

        let balance = self.balance.get(currency);
        if kind == TransactionKind::Withdraw && balance < amount {
            return Err(VaultError::InsufficientFunds {
                currency,
                balance,
                requested: amount,
            });
        }

        match kind {
            TransactionKind::Deposit => *self.balance.get_mut(currency) += amount,
            TransactionKind::Withdraw => *self.balance.get_mut(currency) -= amount,
        }

        let description = description.into();
        let description = if description.is_empty() {
            match kind {
                TransactionKind::Deposit => "Deposit".to_string(),
                TransactionKind::Withdraw => "Withdraw".to_string(),
            }
        } else {
            description
        };

        self.transactions.insert(
            0,
            VaultTransaction {
                id: Utc::now().timestamp_millis().to_string(),
                amount,
                kind,
                currency,
                description,
                timestamp: Utc::now(),
            },
        );
        self.transactions.truncate(RECENT_TRANSACTIONS);

        Ok(&self.transactions[0])
    }

    /// Overwrite the balance of one currency without recording a transaction
    pub fn set_balance(&mut self, currency: Currency, amount: f64) -> Result<(), VaultError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(VaultError::InvalidAmount(amount));
        }
        *self.balance.get_mut(currency) = amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_and_withdraw() {
        let mut vault = VaultData::default();
        vault
            .apply(TransactionKind::Deposit, Currency::Cny, 100.0, "salary")
            .unwrap();
        vault
            .apply(TransactionKind::Withdraw, Currency::Cny, 30.0, "")
            .unwrap();

        assert_eq!(vault.balance.get(Currency::Cny), 70.0);
        assert_eq!(vault.balance.get(Currency::Idr), 0.0);
        assert_eq!(vault.transactions.len(), 2);
        assert_eq!(vault.transactions[0].kind, TransactionKind::Withdraw);
        assert_eq!(vault.transactions[0].description, "Withdraw");
    }

    #[test]
    fn test_rejects_overdraft_and_bad_amounts() {
        let mut vault = VaultData::default();
        let err = vault
            .apply(TransactionKind::Withdraw, Currency::Idr, 1.0, "")
            .unwrap_err();
        assert!(matches!(err, VaultError::InsufficientFunds { .. }));

        assert!(vault
            .apply(TransactionKind::Deposit, Currency::Idr, -5.0, "")
            .is_err());
        assert!(vault
            .apply(TransactionKind::Deposit, Currency::Idr, f64::NAN, "")
            .is_err());
        assert!(vault.transactions.is_empty());
    }

    #[test]
    fn test_keeps_recent_transactions_only() {
        let mut vault = VaultData::default();
        for i in 1..=15 {
            vault
                .apply(TransactionKind::Deposit, Currency::Cny, i as f64, format!("#{i}"))
                .unwrap();
        }
        assert_eq!(vault.transactions.len(), RECENT_TRANSACTIONS);
        assert_eq!(vault.transactions[0].description, "#15");
        assert_eq!(vault.balance.cny, 120.0);
    }

    #[test]
    fn test_wire_format() {
        let raw = r#"{"balance":{"CNY":12.5,"IDR":0},"transactions":[{"id":"1","amount":12.5,"type":"deposit","currency":"CNY","description":"d","timestamp":"2024-01-01T00:00:00.000Z"}]}"#;
        let vault: VaultData = serde_json::from_str(raw).unwrap();
        assert_eq!(vault.balance.cny, 12.5);
        assert_eq!(vault.transactions[0].currency, Currency::Cny);
    }
}
