//! Account ledger
//!
//! Server-enforced accounting for authenticated identities. Every debit is
//! one atomic conditional decrement against the balance store, so
//! concurrent conversations for the same identity can never double-spend a
//! balance that covers only one of them.

use crate::ledger::store::BalanceStore;
use async_trait::async_trait;
use colloquy_application::ports::ledger::{Ledger, LedgerError};
use colloquy_domain::{BudgetState, DebitReceipt, Identity, TokenUsage};
use tracing::debug;

/// Flat credit cost of one billable call.
pub const DEFAULT_CREDIT_COST: u64 = 1;

pub struct AccountLedger<S: BalanceStore> {
    store: S,
    credit_cost: u64,
}

impl<S: BalanceStore> AccountLedger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            credit_cost: DEFAULT_CREDIT_COST,
        }
    }

    /// Override the flat per-call credit cost.
    pub fn with_credit_cost(mut self, credit_cost: u64) -> Self {
        self.credit_cost = credit_cost;
        self
    }

    /// Provision a fresh budget for an identity.
    pub async fn provision(&self, identity: &Identity, budget: u64) -> Result<(), LedgerError> {
        self.store.provision(&identity.key(), budget).await
    }

    async fn debit(&self, identity: &Identity, amount: u64) -> Result<DebitReceipt, LedgerError> {
        let debit = self
            .store
            .debit_if_available(&identity.key(), amount)
            .await?;
        debug!(
            identity = %identity,
            amount,
            applied = debit.applied,
            remaining = debit.state.remaining,
            "account debit"
        );
        Ok(if debit.applied {
            DebitReceipt::accepted(debit.state.remaining, debit.state.used)
        } else {
            DebitReceipt::rejected(debit.state.remaining, debit.state.used)
        })
    }
}

#[async_trait]
impl<S: BalanceStore> Ledger for AccountLedger<S> {
    async fn use_credit(&self, identity: &Identity) -> Result<DebitReceipt, LedgerError> {
        self.debit(identity, self.credit_cost).await
    }

    async fn use_tokens(
        &self,
        identity: &Identity,
        usage: &TokenUsage,
    ) -> Result<DebitReceipt, LedgerError> {
        self.debit(identity, usage.total_tokens).await
    }

    async fn balance(&self, identity: &Identity) -> Result<BudgetState, LedgerError> {
        self.store.get(&identity.key()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::store::MemoryBalanceStore;
    use std::sync::Arc;

    fn identity() -> Identity {
        Identity::account("user-1")
    }

    #[tokio::test]
    async fn test_credit_debit_decrements_flat_cost() {
        let ledger = AccountLedger::new(MemoryBalanceStore::new()).with_credit_cost(6);
        ledger.provision(&identity(), 10).await.unwrap();

        let receipt = ledger.use_credit(&identity()).await.unwrap();
        assert!(receipt.success);
        assert_eq!(receipt.remaining, 4);

        let receipt = ledger.use_credit(&identity()).await.unwrap();
        assert!(!receipt.success);
        assert_eq!(receipt.remaining, 4);
    }

    #[tokio::test]
    async fn test_token_debit_is_metered() {
        let ledger = AccountLedger::new(MemoryBalanceStore::new());
        ledger.provision(&identity(), 1_000).await.unwrap();

        let usage = TokenUsage::from_counts(300, 100);
        let receipt = ledger.use_tokens(&identity(), &usage).await.unwrap();
        assert!(receipt.success);
        assert_eq!(receipt.remaining, 600);
        assert_eq!(receipt.used, 400);
    }

    #[tokio::test]
    async fn test_concurrent_debits_yield_exactly_one_success() {
        // Balance of 1 credit, two concurrent debits: the conditional
        // decrement must admit exactly one.
        let ledger = Arc::new(AccountLedger::new(MemoryBalanceStore::new()));
        ledger.provision(&identity(), 1).await.unwrap();

        let a = {
            let ledger = Arc::clone(&ledger);
            tokio::spawn(async move { ledger.use_credit(&identity()).await.unwrap() })
        };
        let b = {
            let ledger = Arc::clone(&ledger);
            tokio::spawn(async move { ledger.use_credit(&identity()).await.unwrap() })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert_eq!(
            [a.success, b.success].iter().filter(|s| **s).count(),
            1,
            "exactly one of two concurrent debits may succeed"
        );
        assert_eq!(ledger.balance(&identity()).await.unwrap().remaining, 0);
    }

    #[tokio::test]
    async fn test_failed_debit_mutates_nothing() {
        let ledger = AccountLedger::new(MemoryBalanceStore::new()).with_credit_cost(5);
        ledger.provision(&identity(), 3).await.unwrap();

        let receipt = ledger.use_credit(&identity()).await.unwrap();
        assert!(!receipt.success);
        let balance = ledger.balance(&identity()).await.unwrap();
        assert_eq!(balance.remaining, 3);
        assert_eq!(balance.used, 0);
    }
}
