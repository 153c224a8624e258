//! chatstream core library
//!
//! Sends chat messages to a backend and decodes the streamed reply into an
//! ordered message list.

pub mod ai;
pub mod chat;
pub mod config;
pub mod error;

#[cfg(test)]
mod testing;

pub use config::ChatConfig;
pub use error::{ChatError, ChatResult};
