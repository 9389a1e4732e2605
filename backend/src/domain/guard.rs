//! Membership guard: access checks for relationship-scoped operations.

use std::sync::Arc;

use tracing::warn;

use super::error::DomainError;
use super::membership::Membership;
use super::ports::{MembershipPersistenceError, MembershipRepository};
use super::relationship::RelationshipId;
use super::user::UserId;

pub(crate) fn map_membership_persistence_error(error: MembershipPersistenceError) -> DomainError {
    match error {
        MembershipPersistenceError::Connection { message } => {
            warn!(%message, "membership repository unavailable");
            DomainError::service_unavailable("membership store unavailable")
        }
        MembershipPersistenceError::Query { message } => {
            warn!(%message, "membership repository query failed");
            DomainError::internal(message)
        }
    }
}

/// Verifies active membership before relationship-scoped operations run.
///
/// Denials never reveal whether the relationship exists; a departed member
/// and a stranger receive the same forbidden error.
#[derive(Clone)]
pub struct MembershipGuard {
    memberships: Arc<dyn MembershipRepository>,
}

impl MembershipGuard {
    /// Create a guard over the given membership repository.
    pub fn new(memberships: Arc<dyn MembershipRepository>) -> Self {
        Self { memberships }
    }

    /// Require an active membership linking `user` to `relationship`.
    ///
    /// Returns the membership record on success; fails with a forbidden
    /// error when no active membership exists (including when a row exists
    /// but `left_at` is set).
    pub async fn require_member(
        &self,
        user: &UserId,
        relationship: &RelationshipId,
    ) -> Result<Membership, DomainError> {
        self.memberships
            .find_active(user, relationship)
            .await
            .map_err(map_membership_persistence_error)?
            .ok_or_else(|| DomainError::forbidden("not a member of this relationship"))
    }

    /// All active member user ids of `relationship`.
    ///
    /// Used for partner lookup and notification fan-out; callers must still
    /// guard the requesting user with [`Self::require_member`].
    pub async fn active_member_ids(
        &self,
        relationship: &RelationshipId,
    ) -> Result<Vec<UserId>, DomainError> {
        self.memberships
            .active_member_ids(relationship)
            .await
            .map_err(map_membership_persistence_error)
    }
}
