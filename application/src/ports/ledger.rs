//! Ledger port
//!
//! Atomic accounting over per-identity balances. Two accounting strategies
//! coexist behind this one interface by design: a flat per-call credit
//! decrement and a metered token-budget decrement proportional to actual
//! usage. Which one a session uses is selected by its `AccountingMode`.
//!
//! A rejected debit mutates nothing and signals through the returned
//! receipt; there is no ambient balance-changed broadcast.

use async_trait::async_trait;
use colloquy_domain::{BudgetState, DebitReceipt, Identity, TokenUsage};
use thiserror::Error;

/// Errors from the balance backing store, as opposed to a rejected debit
/// (which is a successful operation with `success = false`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Balance store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("No balance provisioned for {0}")]
    UnknownIdentity(String),
}

/// Atomic accounting unit for guest and account identities
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Debit one conversation credit.
    ///
    /// For account identities this must be a single atomic conditional
    /// decrement: N concurrent debits against a balance that can satisfy
    /// only one yield exactly one success.
    async fn use_credit(&self, identity: &Identity) -> Result<DebitReceipt, LedgerError>;

    /// Debit a metered token budget by the call's total token count.
    async fn use_tokens(
        &self,
        identity: &Identity,
        usage: &TokenUsage,
    ) -> Result<DebitReceipt, LedgerError>;

    /// Current budget snapshot for an identity.
    async fn balance(&self, identity: &Identity) -> Result<BudgetState, LedgerError>;
}
