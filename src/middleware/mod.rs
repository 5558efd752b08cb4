//! Middleware module
//!
//! This module contains authorization shared by the chat and HTTP surfaces

pub mod auth;

// Re-export commonly used middleware
pub use auth::AdminSet;
