//! Ledger adapters: guest session counters and store-backed accounts

pub mod account;
pub mod guest;
pub mod store;

pub use account::{AccountLedger, DEFAULT_CREDIT_COST};
pub use guest::GuestLedger;
pub use store::{BalanceStore, MemoryBalanceStore, StoreDebit};
