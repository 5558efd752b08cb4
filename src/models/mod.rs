//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod game;
pub mod pro_request;
pub mod admin;

// Re-export commonly used models
pub use user::{User, RegisterUserRequest, UserOverview, UserStats};
pub use game::{GameDetail, GameSummary, CreateGameRequest, CreatedGame, GameResult, SubmitResultRequest};
pub use pro_request::{ProRequest, ProRequestView, ProRequestStatus, Decision, DecideRequest};
pub use admin::{CreateAdminLogRequest, PlatformStats};
