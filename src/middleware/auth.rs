//! Admin authorization
//!
//! The admin set is fixed process-wide configuration. It is built once at
//! startup and handed to every component that needs it; nothing mutates it
//! afterwards.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};
use crate::config::settings::Settings;
use crate::utils::errors::{GameBotError, Result};

/// Immutable set of admin user ids
#[derive(Debug, Clone)]
pub struct AdminSet {
    ordered: Arc<[i64]>,
    lookup: Arc<HashSet<i64>>,
}

impl AdminSet {
    /// Build the set, keeping configuration order and dropping duplicates
    pub fn new(admin_ids: impl IntoIterator<Item = i64>) -> Self {
        let mut seen = HashSet::new();
        let ordered: Vec<i64> = admin_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();

        Self {
            ordered: ordered.into(),
            lookup: Arc::new(seen),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.bot.admin_ids.iter().copied())
    }

    /// Check if user is an admin
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.lookup.contains(&user_id)
    }

    /// Fail with `PermissionDenied` unless the id belongs to an admin
    pub fn check_admin(&self, user_id: i64) -> Result<()> {
        if self.is_admin(user_id) {
            debug!(user_id = user_id, "Admin authorization successful");
            Ok(())
        } else {
            warn!(user_id = user_id, "Unauthorized admin access attempt");
            Err(GameBotError::PermissionDenied(
                "Admin privileges required".to_string()
            ))
        }
    }

    /// Admin users contact first, e.g. from the chat start screen
    pub fn primary_contact(&self) -> Option<i64> {
        self.ordered.first().copied()
    }

    /// Admin ids in configuration order
    pub fn ids(&self) -> &[i64] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
