//! Balance store seam
//!
//! The atomic-update service behind account ledgers. The in-process
//! implementation here serves tests and single-node deployments; a
//! server-side store implements the same trait with a conditional update
//! (conditional decrement / serializable transaction). The contract is the
//! same either way: a debit is a single atomic operation, never a
//! client-side read-then-write.

use async_trait::async_trait;
use colloquy_application::ports::ledger::LedgerError;
use colloquy_domain::BudgetState;
use std::collections::HashMap;
use std::sync::Mutex;

/// Result of one conditional decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreDebit {
    /// Whether the decrement was applied.
    pub applied: bool,
    /// Post-operation state (unchanged when not applied).
    pub state: BudgetState,
}

/// Atomic per-key balance storage
#[async_trait]
pub trait BalanceStore: Send + Sync {
    /// Set up a fresh budget for a key, replacing any existing state.
    async fn provision(&self, key: &str, budget: u64) -> Result<(), LedgerError>;

    /// Atomically decrement `amount` if the remaining balance covers it.
    ///
    /// Concurrent calls against a balance that can satisfy only one must
    /// yield exactly one applied debit.
    async fn debit_if_available(&self, key: &str, amount: u64) -> Result<StoreDebit, LedgerError>;

    /// Current state for a key.
    async fn get(&self, key: &str) -> Result<BudgetState, LedgerError>;
}

/// In-process balance store.
///
/// The whole conditional decrement runs under one lock, which makes it a
/// single atomic operation from any caller's point of view.
#[derive(Default)]
pub struct MemoryBalanceStore {
    accounts: Mutex<HashMap<String, BudgetState>>,
}

impl MemoryBalanceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryBalanceStore {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, BudgetState>>, LedgerError> {
        self.accounts
            .lock()
            .map_err(|_| LedgerError::StoreUnavailable("balance store lock poisoned".to_string()))
    }
}

#[async_trait]
impl BalanceStore for MemoryBalanceStore {
    async fn provision(&self, key: &str, budget: u64) -> Result<(), LedgerError> {
        let mut accounts = self.lock()?;
        accounts.insert(key.to_string(), BudgetState::fresh(budget));
        Ok(())
    }

    async fn debit_if_available(&self, key: &str, amount: u64) -> Result<StoreDebit, LedgerError> {
        let mut accounts = self.lock()?;
        let state = accounts
            .get_mut(key)
            .ok_or_else(|| LedgerError::UnknownIdentity(key.to_string()))?;

        if state.remaining >= amount {
            state.remaining -= amount;
            state.used += amount;
            Ok(StoreDebit {
                applied: true,
                state: *state,
            })
        } else {
            Ok(StoreDebit {
                applied: false,
                state: *state,
            })
        }
    }

    async fn get(&self, key: &str) -> Result<BudgetState, LedgerError> {
        let accounts = self.lock()?;
        accounts
            .get(key)
            .copied()
            .ok_or_else(|| LedgerError::UnknownIdentity(key.to_string()))
    }
}
