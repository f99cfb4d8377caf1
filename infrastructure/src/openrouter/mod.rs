//! OpenRouter-compatible gateway adapter

pub mod gateway;
pub mod protocol;

pub use gateway::OpenRouterGateway;
