//! Guest ledger
//!
//! Session-local accounting for unauthenticated callers. The counter lives
//! in this process and dies with it: atomicity is best-effort within the
//! one session it serves, deliberately weaker than the account ledger's
//! store-backed guarantee. The identity argument is accepted for interface
//! parity but does not select a balance.

use async_trait::async_trait;
use colloquy_application::ports::ledger::{Ledger, LedgerError};
use colloquy_domain::{BudgetState, DebitReceipt, Identity, TokenUsage};
use std::sync::Mutex;
use tracing::debug;

pub struct GuestLedger {
    state: Mutex<BudgetState>,
    credit_cost: u64,
}

impl GuestLedger {
    pub fn new(budget: u64) -> Self {
        Self {
            state: Mutex::new(BudgetState::fresh(budget)),
            credit_cost: 1,
        }
    }

    /// Override the flat per-call credit cost.
    pub fn with_credit_cost(mut self, credit_cost: u64) -> Self {
        self.credit_cost = credit_cost;
        self
    }

    fn debit(&self, identity: &Identity, amount: u64) -> Result<DebitReceipt, LedgerError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| LedgerError::StoreUnavailable("guest ledger lock poisoned".to_string()))?;
        let receipt = if state.remaining >= amount {
            state.remaining -= amount;
            state.used += amount;
            DebitReceipt::accepted(state.remaining, state.used)
        } else {
            DebitReceipt::rejected(state.remaining, state.used)
        };
        debug!(
            identity = %identity,
            amount,
            success = receipt.success,
            remaining = receipt.remaining,
            "guest debit"
        );
        Ok(receipt)
    }
}

#[async_trait]
impl Ledger for GuestLedger {
    async fn use_credit(&self, identity: &Identity) -> Result<DebitReceipt, LedgerError> {
        self.debit(identity, self.credit_cost)
    }

    async fn use_tokens(
        &self,
        identity: &Identity,
        usage: &TokenUsage,
    ) -> Result<DebitReceipt, LedgerError> {
        self.debit(identity, usage.total_tokens)
    }

    async fn balance(&self, _identity: &Identity) -> Result<BudgetState, LedgerError> {
        self.state
            .lock()
            .map(|state| *state)
            .map_err(|_| LedgerError::StoreUnavailable("guest ledger lock poisoned".to_string()))
    }
}
