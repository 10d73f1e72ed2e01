//! Shared ledger operations

use super::VaultStore;
use memoir_types::{Currency, TransactionKind, VaultError, VaultTransaction};

impl VaultStore {
    pub async fn deposit(
        &self,
        currency: Currency,
        amount: f64,
        description: &str,
    ) -> Result<VaultTransaction, VaultError> {
        self.record(TransactionKind::Deposit, currency, amount, description)
            .await
    }

    /// Fails without saving when the balance does not cover `amount`
    pub async fn withdraw(
        &self,
        currency: Currency,
        amount: f64,
        description: &str,
    ) -> Result<VaultTransaction, VaultError> {
        self.record(TransactionKind::Withdraw, currency, amount, description)
            .await
    }

    pub async fn set_balance(&self, currency: Currency, amount: f64) -> Result<(), VaultError> {
        self.try_update(|vault| vault.set_balance(currency, amount))
            .await
    }

    async fn record(
        &self,
        kind: TransactionKind,
        currency: Currency,
        amount: f64,
        description: &str,
    ) -> Result<VaultTransaction, VaultError> {
        self.try_update(|vault| {
            vault
                .apply(kind, currency, amount, description)
                .map(Clone::clone)
        })
        .await
    }
}
