//! Test helpers module
//!
//! Database, mock Telegram server and a unified context for integration
//! tests.

#![allow(dead_code)]

pub mod database_helper;
pub mod telegram_mock;
pub mod test_context;

pub use database_helper::*;
pub use telegram_mock::*;
pub use test_context::*;
