//! Port abstraction for relationship membership persistence.

use async_trait::async_trait;

use crate::domain::membership::Membership;
use crate::domain::relationship::{Relationship, RelationshipId};
use crate::domain::user::UserId;

/// Persistence errors raised by membership repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MembershipPersistenceError {
    /// Repository connection could not be established.
    #[error("membership repository connection failed: {message}")]
    Connection { message: String },
    /// Query failed during execution.
    #[error("membership repository query failed: {message}")]
    Query { message: String },
}

impl MembershipPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Driven port for membership queries.
///
/// "Active" always means `left_at` is unset; adapters must never surface
/// departed rows from these methods.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// The active membership linking `user` to `relationship`, if any.
    async fn find_active(
        &self,
        user: &UserId,
        relationship: &RelationshipId,
    ) -> Result<Option<Membership>, MembershipPersistenceError>;

    /// User ids of every active member of `relationship`.
    async fn active_member_ids(
        &self,
        relationship: &RelationshipId,
    ) -> Result<Vec<UserId>, MembershipPersistenceError>;

    /// Active relationships `user` belongs to, ordered by relationship
    /// creation time (ties broken by id). The first entry is the default the
    /// current-relationship resolver falls back to.
    async fn active_relationships_for_user(
        &self,
        user: &UserId,
    ) -> Result<Vec<Relationship>, MembershipPersistenceError>;
}
