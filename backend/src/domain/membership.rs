//! Relationship membership join entity.
//!
//! A membership links a user to a relationship. `left_at == None` is the
//! sole definition of an active membership; a set timestamp means the user
//! departed and must be treated exactly like a missing row by access checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::relationship::RelationshipId;
use super::user::UserId;

/// Join entity linking a [`UserId`] to a [`RelationshipId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    user_id: UserId,
    relationship_id: RelationshipId,
    joined_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    left_at: Option<DateTime<Utc>>,
}

impl Membership {
    /// Assemble a membership record.
    pub fn new(
        user_id: UserId,
        relationship_id: RelationshipId,
        joined_at: DateTime<Utc>,
        left_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            user_id,
            relationship_id,
            joined_at,
            left_at,
        }
    }

    /// The member.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// The relationship the member belongs to.
    pub fn relationship_id(&self) -> &RelationshipId {
        &self.relationship_id
    }

    /// When the member joined.
    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// When the member departed, if they have.
    pub fn left_at(&self) -> Option<DateTime<Utc>> {
        self.left_at
    }

    /// Whether the membership is active (the user has not departed).
    pub fn is_active(&self) -> bool {
        self.left_at.is_none()
    }
}
