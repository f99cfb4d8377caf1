//! Accounting value objects shared by the ledger port and its adapters

use serde::{Deserialize, Serialize};

/// The caller a balance belongs to.
///
/// Guest identities are session-local and best-effort; account identities
/// are durable and served by an atomic store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Identity {
    Guest { session: String },
    Account { user: String },
}

impl Identity {
    pub fn guest(session: impl Into<String>) -> Self {
        Identity::Guest {
            session: session.into(),
        }
    }

    pub fn account(user: impl Into<String>) -> Self {
        Identity::Account { user: user.into() }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Identity::Guest { .. })
    }

    /// Stable key for balance storage.
    pub fn key(&self) -> String {
        match self {
            Identity::Guest { session } => format!("guest:{session}"),
            Identity::Account { user } => format!("account:{user}"),
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Result of one debit attempt.
///
/// This is the explicit budget-changed signal: a successful debit reports
/// the post-debit balances, a rejected debit reports the untouched ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebitReceipt {
    pub success: bool,
    pub remaining: u64,
    pub used: u64,
}

impl DebitReceipt {
    pub fn accepted(remaining: u64, used: u64) -> Self {
        Self {
            success: true,
            remaining,
            used,
        }
    }

    pub fn rejected(remaining: u64, used: u64) -> Self {
        Self {
            success: false,
            remaining,
            used,
        }
    }
}

/// Snapshot of one identity's budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetState {
    pub remaining: u64,
    pub used: u64,
    pub budget: u64,
}

impl BudgetState {
    pub fn fresh(budget: u64) -> Self {
        Self {
            remaining: budget,
            used: 0,
            budget,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}
