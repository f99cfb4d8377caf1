//! Per-session option value objects

use serde::{Deserialize, Serialize};

/// Turn-order policy for a session, frozen once the run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnOrder {
    /// Fixed A, B, C order every round.
    #[default]
    Sequential,
    /// A fresh uniform permutation drawn independently each round.
    Random,
    /// A coordinator-model call picks the next speaker before each turn.
    Popcorn,
}

impl std::fmt::Display for TurnOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnOrder::Sequential => write!(f, "sequential"),
            TurnOrder::Random => write!(f, "random"),
            TurnOrder::Popcorn => write!(f, "popcorn"),
        }
    }
}

impl std::str::FromStr for TurnOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(TurnOrder::Sequential),
            "random" => Ok(TurnOrder::Random),
            "popcorn" => Ok(TurnOrder::Popcorn),
            other => Err(format!("unknown turn order: {other}")),
        }
    }
}

/// Accounting strategy charged per billable call.
///
/// The two modes are a product seam, not alternates of one unit: `Credit`
/// decrements a flat per-conversation allowance, `TokenBudget` decrements a
/// metered allowance proportional to actual token consumption. Both live
/// behind the one ledger interface and are selected per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountingMode {
    #[default]
    Credit,
    #[serde(rename = "tokens")]
    TokenBudget,
}

impl std::str::FromStr for AccountingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "credit" | "credits" => Ok(AccountingMode::Credit),
            "tokens" | "token-budget" => Ok(AccountingMode::TokenBudget),
            other => Err(format!("unknown accounting mode: {other}")),
        }
    }
}

/// Requested answer length, mapped to a max-token cap on the gateway request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseLength {
    Brief,
    #[default]
    Standard,
    Extended,
}

impl ResponseLength {
    /// Completion cap sent to the provider.
    pub fn max_tokens(&self) -> u32 {
        match self {
            ResponseLength::Brief => 256,
            ResponseLength::Standard => 640,
            ResponseLength::Extended => 1536,
        }
    }
}
