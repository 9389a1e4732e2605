//! Relationship aggregate: the pairing/group context users share.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the relationship constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipValidationError {
    EmptyId,
    InvalidId,
    EmptyName,
}

impl fmt::Display for RelationshipValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "relationship id must not be empty"),
            Self::InvalidId => write!(f, "relationship id must be a valid UUID"),
            Self::EmptyName => write!(f, "relationship name must not be blank"),
        }
    }
}

impl std::error::Error for RelationshipValidationError {}

/// Stable relationship identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct RelationshipId(Uuid);

impl RelationshipId {
    /// Validate and construct a [`RelationshipId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, RelationshipValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(RelationshipValidationError::EmptyId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| RelationshipValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Generate a new random [`RelationshipId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for RelationshipId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product variant the relationship belongs to.
///
/// Each deployment brands one of these, but the data model keeps the kind on
/// the relationship so shared infrastructure can serve every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    Couples,
    Friends,
    ParentTeen,
}

impl RelationshipKind {
    /// Stable storage token for the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Couples => "couples",
            Self::Friends => "friends",
            Self::ParentTeen => "parent_teen",
        }
    }

    /// Parse a storage token back into a kind.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "couples" => Some(Self::Couples),
            "friends" => Some(Self::Friends),
            "parent_teen" => Some(Self::ParentTeen),
            _ => None,
        }
    }
}

/// Lifecycle status of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStatus {
    Active,
    Ended,
}

impl RelationshipStatus {
    /// Stable storage token for the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Ended => "ended",
        }
    }

    /// Parse a storage token back into a status.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(Self::Active),
            "ended" => Some(Self::Ended),
            _ => None,
        }
    }
}

/// A pairing/group context users share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    id: RelationshipId,
    kind: RelationshipKind,
    status: RelationshipStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    created_at: DateTime<Utc>,
}

impl Relationship {
    /// Assemble a relationship from validated parts.
    ///
    /// A `name`, when present, must not be blank.
    pub fn new(
        id: RelationshipId,
        kind: RelationshipKind,
        status: RelationshipStatus,
        name: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, RelationshipValidationError> {
        if let Some(ref name) = name {
            if name.trim().is_empty() {
                return Err(RelationshipValidationError::EmptyName);
            }
        }
        Ok(Self {
            id,
            kind,
            status,
            name,
            created_at,
        })
    }

    /// Stable identifier.
    pub fn id(&self) -> &RelationshipId {
        &self.id
    }

    /// Product variant.
    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    /// Lifecycle status.
    pub fn status(&self) -> RelationshipStatus {
        self.status
    }

    /// Optional display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Creation timestamp; defines the "first relationship" ordering used by
    /// the current-relationship resolver.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the relationship is still active.
    pub fn is_active(&self) -> bool {
        self.status == RelationshipStatus::Active
    }
}
