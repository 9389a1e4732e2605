//! Diesel-backed `MembershipRepository` adapter.
//!
//! Every query filters on `left_at IS NULL`; departed rows are invisible to
//! the domain through this port.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{MembershipPersistenceError, MembershipRepository};
use crate::domain::{
    Membership, Relationship, RelationshipId, RelationshipStatus, UserId,
};

use super::models::{MembershipRow, RelationshipRow};
use super::pool::DbPool;
use super::schema::{relationship_members, relationships};

/// PostgreSQL-backed membership repository.
#[derive(Clone)]
pub struct DieselMembershipRepository {
    pool: DbPool,
}

impl DieselMembershipRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for DieselMembershipRepository {
    async fn find_active(
        &self,
        user: &UserId,
        relationship: &RelationshipId,
    ) -> Result<Option<Membership>, MembershipPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| MembershipPersistenceError::connection(err.to_string()))?;

        let row = relationship_members::table
            .filter(relationship_members::user_id.eq(user.as_uuid()))
            .filter(relationship_members::relationship_id.eq(relationship.as_uuid()))
            .filter(relationship_members::left_at.is_null())
            .select(MembershipRow::as_select())
            .first::<MembershipRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| MembershipPersistenceError::query(err.to_string()))?;

        Ok(row.map(MembershipRow::into_domain))
    }

    async fn active_member_ids(
        &self,
        relationship: &RelationshipId,
    ) -> Result<Vec<UserId>, MembershipPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| MembershipPersistenceError::connection(err.to_string()))?;

        let ids = relationship_members::table
            .filter(relationship_members::relationship_id.eq(relationship.as_uuid()))
            .filter(relationship_members::left_at.is_null())
            .order(relationship_members::joined_at.asc())
            .select(relationship_members::user_id)
            .load::<Uuid>(&mut conn)
            .await
            .map_err(|err| MembershipPersistenceError::query(err.to_string()))?;

        Ok(ids.into_iter().map(UserId::from).collect())
    }

    async fn active_relationships_for_user(
        &self,
        user: &UserId,
    ) -> Result<Vec<Relationship>, MembershipPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| MembershipPersistenceError::connection(err.to_string()))?;

        let rows = relationship_members::table
            .inner_join(relationships::table)
            .filter(relationship_members::user_id.eq(user.as_uuid()))
            .filter(relationship_members::left_at.is_null())
            .filter(relationships::status.eq(RelationshipStatus::Active.as_str()))
            .order((relationships::created_at.asc(), relationships::id.asc()))
            .select(RelationshipRow::as_select())
            .load::<RelationshipRow>(&mut conn)
            .await
            .map_err(|err| MembershipPersistenceError::query(err.to_string()))?;

        rows.into_iter()
            .map(|row| row.into_domain().map_err(MembershipPersistenceError::query))
            .collect()
    }
}
