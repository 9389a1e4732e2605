//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::UserPersistenceError;
use crate::domain::{
    DisplayName, Email, Membership, Relationship, RelationshipKind, RelationshipStatus, User,
};

use super::schema::{relationship_members, relationships, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub password_hash: Option<String>,
}

impl UserRow {
    /// Map the row into a domain user, rejecting values that violate domain
    /// invariants (possible only if the database was written out-of-band).
    pub(crate) fn into_domain(self) -> Result<User, UserPersistenceError> {
        let email = Email::new(&self.email)
            .map_err(|err| UserPersistenceError::query(format!("stored email invalid: {err}")))?;
        let display_name = self
            .display_name
            .map(DisplayName::new)
            .transpose()
            .map_err(|err| {
                UserPersistenceError::query(format!("stored display name invalid: {err}"))
            })?;
        Ok(User::new(self.id.into(), email, display_name))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub display_name: Option<&'a str>,
    pub password_hash: Option<&'a str>,
}

/// Row struct for reading from the relationships table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = relationships)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RelationshipRow {
    pub id: Uuid,
    pub kind: String,
    pub status: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RelationshipRow {
    pub(crate) fn into_domain(self) -> Result<Relationship, String> {
        let kind = RelationshipKind::parse(&self.kind)
            .ok_or_else(|| format!("unknown relationship kind {:?}", self.kind))?;
        let status = RelationshipStatus::parse(&self.status)
            .ok_or_else(|| format!("unknown relationship status {:?}", self.status))?;
        Relationship::new(self.id.into(), kind, status, self.name, self.created_at)
            .map_err(|err| format!("stored relationship invalid: {err}"))
    }
}

/// Row struct for reading from the relationship_members table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = relationship_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MembershipRow {
    pub user_id: Uuid,
    pub relationship_id: Uuid,
    pub joined_at: DateTime<Utc>,
    pub left_at: Option<DateTime<Utc>>,
}

impl MembershipRow {
    pub(crate) fn into_domain(self) -> Membership {
        Membership::new(
            self.user_id.into(),
            self.relationship_id.into(),
            self.joined_at,
            self.left_at,
        )
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn user_row_maps_to_domain() {
        let row = UserRow {
            id: Uuid::new_v4(),
            email: "pat@example.com".to_owned(),
            display_name: Some("Pat".to_owned()),
            password_hash: None,
        };
        let user = row.into_domain().expect("valid row maps");
        assert_eq!(user.email().as_ref(), "pat@example.com");
    }

    #[rstest]
    fn corrupt_email_is_a_query_error() {
        let row = UserRow {
            id: Uuid::new_v4(),
            email: "not-an-email".to_owned(),
            display_name: None,
            password_hash: None,
        };
        let err = row.into_domain().expect_err("corrupt row must fail");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn relationship_row_rejects_unknown_kind() {
        let row = RelationshipRow {
            id: Uuid::new_v4(),
            kind: "rivals".to_owned(),
            status: "active".to_owned(),
            name: None,
            created_at: Utc::now(),
        };
        assert!(row.into_domain().is_err());
    }

    #[rstest]
    fn membership_row_preserves_departure() {
        let departed = Utc::now();
        let row = MembershipRow {
            user_id: Uuid::new_v4(),
            relationship_id: Uuid::new_v4(),
            joined_at: Utc::now(),
            left_at: Some(departed),
        };
        let membership = row.into_domain();
        assert!(!membership.is_active());
        assert_eq!(membership.left_at(), Some(departed));
    }
}
