//! PRO request workflow
//!
//! Opening and deciding requests. The state change always commits first;
//! notifications are queued afterwards and their outcome never reaches the
//! caller.

use tracing::{info, debug};
use crate::database::repositories::ProRequestRepository;
use crate::middleware::AdminSet;
use crate::models::pro_request::{DecideRequest, ProRequest, ProRequestView};
use crate::services::notification::NotificationService;
use crate::utils::errors::Result;
use crate::utils::logging::{log_admin_action, log_user_action};

#[derive(Clone)]
pub struct ProRequestService {
    repository: ProRequestRepository,
    notifier: NotificationService,
    admins: AdminSet,
}

impl ProRequestService {
    pub fn new(repository: ProRequestRepository, notifier: NotificationService, admins: AdminSet) -> Self {
        Self {
            repository,
            notifier,
            admins,
        }
    }

    /// Open a pending request for a non-PRO user and alert the admins.
    ///
    /// Fails with `AlreadyPrivileged` or `DuplicatePending` without writing
    /// anything.
    pub async fn create_request(&self, user_id: i64) -> Result<ProRequest> {
        debug!(user_id = user_id, "Creating PRO request");

        let request = self.repository.create_pending(user_id).await?;
        log_user_action(user_id, "pro_request", Some(&request.id.to_string()));
        info!(user_id = user_id, request_id = request.id, "PRO request created");

        self.notifier.notify_new_pro_request(user_id);
        Ok(request)
    }

    /// Approve or reject a pending request, then tell the requester.
    ///
    /// The acting admin must belong to the admin set.
    pub async fn decide(&self, command: DecideRequest) -> Result<ProRequest> {
        self.admins.check_admin(command.admin_id)?;

        let note = command
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        let request = self
            .repository
            .decide(command.request_id, command.admin_id, command.decision, note)
            .await?;

        log_admin_action(command.admin_id, command.decision.audit_action(), Some(request.user_id), note);
        info!(
            request_id = request.id,
            user_id = request.user_id,
            admin_id = command.admin_id,
            status = %request.status,
            "PRO request decided"
        );

        self.notifier.notify_pro_decision(request.user_id, command.decision, note);
        Ok(request)
    }

    /// All requests with requester details, newest first
    pub async fn list_requests(&self) -> Result<Vec<ProRequestView>> {
        self.repository.list_all().await
    }

    /// A user's own requests, newest first
    pub async fn requests_of(&self, user_id: i64) -> Result<Vec<ProRequest>> {
        self.repository.list_for_user(user_id).await
    }
}
