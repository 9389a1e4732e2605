//! Current-relationship resolution.
//!
//! A user can belong to several relationships at once (the dual-parent
//! case). Which one they are "viewing now" lives in a browser cookie; this
//! resolver validates that cookie against the user's active memberships and
//! applies an explicit default when it is absent or stale. The resolver is
//! read-only: writing the cookie is the HTTP adapter's job.

use std::sync::Arc;

use super::error::DomainError;
use super::guard::map_membership_persistence_error;
use super::ports::MembershipRepository;
use super::relationship::{Relationship, RelationshipId};
use super::user::UserId;

/// Outcome of resolving the current relationship for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentRelationship {
    /// The user has no active relationships; callers redirect to onboarding.
    None,
    /// An active relationship was selected.
    Selected {
        /// The relationship the user is viewing.
        id: RelationshipId,
        /// Whether the cookie value was honoured. `false` means the default
        /// (first active relationship) was applied and the caller should
        /// refresh the cookie.
        from_cookie: bool,
    },
}

impl CurrentRelationship {
    /// The selected relationship id, if any.
    pub fn id(&self) -> Option<RelationshipId> {
        match self {
            Self::None => None,
            Self::Selected { id, .. } => Some(*id),
        }
    }
}

/// Resolves which relationship context a request operates in.
#[derive(Clone)]
pub struct CurrentRelationshipResolver {
    memberships: Arc<dyn MembershipRepository>,
}

impl CurrentRelationshipResolver {
    /// Create a resolver over the given membership repository.
    pub fn new(memberships: Arc<dyn MembershipRepository>) -> Self {
        Self { memberships }
    }

    /// Active relationships for `user`, in default-selection order.
    pub async fn active_relationships(
        &self,
        user: &UserId,
    ) -> Result<Vec<Relationship>, DomainError> {
        self.memberships
            .active_relationships_for_user(user)
            .await
            .map_err(map_membership_persistence_error)
    }

    /// Resolve the current relationship for `user`.
    ///
    /// A cookie value is honoured only when it parses as a relationship id
    /// and matches one of the user's active relationships; anything else
    /// falls back to the first active relationship. A cookie referencing a
    /// foreign or departed relationship is therefore ignored rather than
    /// rejected.
    pub async fn resolve(
        &self,
        user: &UserId,
        cookie: Option<&str>,
    ) -> Result<CurrentRelationship, DomainError> {
        let relationships = self.active_relationships(user).await?;
        let Some(first) = relationships.first() else {
            return Ok(CurrentRelationship::None);
        };

        let requested = cookie.and_then(|raw| RelationshipId::new(raw).ok());
        if let Some(id) = requested {
            if relationships.iter().any(|r| *r.id() == id) {
                return Ok(CurrentRelationship::Selected {
                    id,
                    from_cookie: true,
                });
            }
        }

        Ok(CurrentRelationship::Selected {
            id: *first.id(),
            from_cookie: false,
        })
    }
}
