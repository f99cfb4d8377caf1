//! Conversation history and usage records

pub mod entities;
pub mod usage;
