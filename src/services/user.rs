//! User service implementation
//!
//! This service handles user registration, profile lookup, activity tracking
//! and personal statistics.

use tracing::{info, debug};
use crate::database::repositories::UserRepository;
use crate::models::user::{User, RegisterUserRequest, UserStats};
use crate::utils::errors::{GameBotError, Result};
use crate::utils::helpers::{is_valid_phone, normalize_phone, normalize_whitespace};
use crate::utils::logging::log_user_action;

const MAX_NAME_LENGTH: usize = 100;

/// User service for managing user operations
#[derive(Clone)]
pub struct UserService {
    user_repository: UserRepository,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(user_repository: UserRepository) -> Self {
        Self { user_repository }
    }

    /// Register a new user or refresh an existing one.
    ///
    /// Re-registering updates name and phone only; PRO, admin and block flags
    /// survive.
    pub async fn register(&self, request: RegisterUserRequest) -> Result<User> {
        let request = Self::validate_registration(request)?;
        debug!(user_id = request.user_id, "Registering user");

        let user = self.user_repository.upsert(request).await?;
        log_user_action(user.user_id, "register", None);
        info!(user_id = user.user_id, is_pro = user.is_pro, "User registered");

        Ok(user)
    }

    /// Get user by ID
    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        debug!(user_id = user_id, "Getting user by ID");
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(GameBotError::UserNotFound { user_id })
    }

    /// Record activity; unknown users are ignored
    pub async fn touch(&self, user_id: i64) -> Result<bool> {
        let touched = self.user_repository.touch(user_id).await?;
        if !touched {
            debug!(user_id = user_id, "Activity from unregistered user ignored");
        }
        Ok(touched)
    }

    /// Profile plus authoring totals
    pub async fn user_stats(&self, user_id: i64) -> Result<UserStats> {
        let user = self.get_user(user_id).await?;
        let (games_count, total_plays) = self.user_repository.authoring_totals(user_id).await?;

        Ok(UserStats {
            user,
            games_count,
            total_plays,
        })
    }

    fn validate_registration(request: RegisterUserRequest) -> Result<RegisterUserRequest> {
        let name = normalize_whitespace(&request.name);
        if name.is_empty() {
            return Err(GameBotError::InvalidInput("Name is required".to_string()));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(GameBotError::InvalidInput(format!(
                "Name must be at most {} characters",
                MAX_NAME_LENGTH
            )));
        }

        if !is_valid_phone(&request.phone) {
            return Err(GameBotError::InvalidInput("Invalid phone number".to_string()));
        }

        Ok(RegisterUserRequest {
            user_id: request.user_id,
            name,
            phone: normalize_phone(&request.phone),
        })
    }
}
