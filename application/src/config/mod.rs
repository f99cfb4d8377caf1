//! Session configuration resolution

pub mod session;

pub use session::{DEFAULT_TEMPERATURE, SessionConfig};
