//! Usage accounting port
//!
//! The orchestrator charges every billable gateway call through this port,
//! exactly once per call, strictly between receiving the gateway response
//! and emitting the message to the sink. Callers may supply their own
//! implementation; [`LedgerAccountant`] bridges the port to the [`Ledger`]
//! according to the session's accounting mode.

use crate::ports::ledger::{Ledger, LedgerError};
use async_trait::async_trait;
use colloquy_domain::{AccountingMode, DebitReceipt, Identity, Model, TokenUsage};
use std::sync::Arc;
use tracing::debug;

/// Fires once per billable gateway call
#[async_trait]
pub trait UsageAccountant: Send + Sync {
    /// Charge one call's usage against the caller's budget.
    ///
    /// `resolved_model` is the model that actually served the call; charges
    /// are always recorded against it, never the requested id.
    async fn charge(
        &self,
        usage: &TokenUsage,
        resolved_model: &Model,
    ) -> Result<DebitReceipt, LedgerError>;
}

/// Default accountant: dispatches to the ledger per accounting mode.
pub struct LedgerAccountant {
    ledger: Arc<dyn Ledger>,
    identity: Identity,
    mode: AccountingMode,
}

impl LedgerAccountant {
    pub fn new(ledger: Arc<dyn Ledger>, identity: Identity, mode: AccountingMode) -> Self {
        Self {
            ledger,
            identity,
            mode,
        }
    }
}

#[async_trait]
impl UsageAccountant for LedgerAccountant {
    async fn charge(
        &self,
        usage: &TokenUsage,
        resolved_model: &Model,
    ) -> Result<DebitReceipt, LedgerError> {
        let receipt = match self.mode {
            AccountingMode::Credit => self.ledger.use_credit(&self.identity).await?,
            AccountingMode::TokenBudget => self.ledger.use_tokens(&self.identity, usage).await?,
        };
        debug!(
            identity = %self.identity,
            model = %resolved_model,
            success = receipt.success,
            remaining = receipt.remaining,
            "usage charged"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colloquy_domain::BudgetState;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLedger {
        credit_calls: Mutex<u32>,
        token_calls: Mutex<u32>,
    }

    #[async_trait]
    impl Ledger for RecordingLedger {
        async fn use_credit(&self, _identity: &Identity) -> Result<DebitReceipt, LedgerError> {
            *self.credit_calls.lock().unwrap() += 1;
            Ok(DebitReceipt::accepted(9, 1))
        }

        async fn use_tokens(
            &self,
            _identity: &Identity,
            usage: &TokenUsage,
        ) -> Result<DebitReceipt, LedgerError> {
            *self.token_calls.lock().unwrap() += 1;
            Ok(DebitReceipt::accepted(1000 - usage.total_tokens, usage.total_tokens))
        }

        async fn balance(&self, _identity: &Identity) -> Result<BudgetState, LedgerError> {
            Ok(BudgetState::fresh(10))
        }
    }

    #[tokio::test]
    async fn test_credit_mode_uses_credit_op() {
        let ledger = Arc::new(RecordingLedger::default());
        let accountant = LedgerAccountant::new(
            ledger.clone(),
            Identity::guest("s"),
            AccountingMode::Credit,
        );
        let usage = TokenUsage::from_counts(10, 5);
        accountant.charge(&usage, &Model::new("x/y")).await.unwrap();
        assert_eq!(*ledger.credit_calls.lock().unwrap(), 1);
        assert_eq!(*ledger.token_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_token_mode_uses_token_op() {
        let ledger = Arc::new(RecordingLedger::default());
        let accountant = LedgerAccountant::new(
            ledger.clone(),
            Identity::guest("s"),
            AccountingMode::TokenBudget,
        );
        let usage = TokenUsage::from_counts(10, 5);
        let receipt = accountant.charge(&usage, &Model::new("x/y")).await.unwrap();
        assert_eq!(*ledger.token_calls.lock().unwrap(), 1);
        assert_eq!(receipt.used, 15);
    }
}
