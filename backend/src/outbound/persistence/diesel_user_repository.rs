//! Diesel-backed `UserRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CredentialRecord, UserPersistenceError, UserRepository};
use crate::domain::{Email, User, UserId};

use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// PostgreSQL-backed user repository.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(err: DieselError, email: &Email) -> UserPersistenceError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::duplicate_email(email.as_ref())
        }
        other => UserPersistenceError::query(other.to_string()),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(
        &self,
        user: &User,
        password_hash: Option<&str>,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserPersistenceError::connection(err.to_string()))?;

        let row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            display_name: user.display_name().map(AsRef::as_ref),
            password_hash,
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, user.email()))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserPersistenceError::connection(err.to_string()))?;

        let row = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;

        row.map(UserRow::into_domain).transpose()
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<CredentialRecord>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserPersistenceError::connection(err.to_string()))?;

        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;

        row.map(|row| {
            let password_hash = row.password_hash.clone();
            row.into_domain().map(|user| CredentialRecord {
                user,
                password_hash,
            })
        })
        .transpose()
    }

    async fn set_password_hash(
        &self,
        id: &UserId,
        password_hash: &str,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| UserPersistenceError::connection(err.to_string()))?;

        let updated = diesel::update(users::table.find(id.as_uuid()))
            .set(users::password_hash.eq(password_hash))
            .execute(&mut conn)
            .await
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;

        if updated == 0 {
            return Err(UserPersistenceError::query(format!(
                "no account row for user {id}"
            )));
        }
        Ok(())
    }
}
