//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod user;
pub mod game;
pub mod pro_request;
pub mod admin;

// Re-export repositories
pub use user::UserRepository;
pub use game::GameRepository;
pub use pro_request::ProRequestRepository;
pub use admin::AdminRepository;
