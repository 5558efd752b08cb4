//! Bot handlers module
//!
//! Command handlers for the chat front door. The bot only links into the web
//! application; all game and request flows go through the same services the
//! HTTP API uses.

pub mod commands;

// Re-export commonly used handler functions
pub use commands::*;
