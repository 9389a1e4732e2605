//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::user::{Email, User, UserId};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// An account with the given email already exists.
    #[error("an account with email {email} already exists")]
    DuplicateEmail { email: String },
}

impl UserPersistenceError {
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

    /// Create a duplicate-email conflict error.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

/// A user together with the stored credential string, returned by login
/// lookups. The hash never leaves the persistence and credential layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// The account identity.
    pub user: User,
    /// Stored `base64(salt).base64(key)` credential, absent for accounts
    /// that have never set a password (magic-link-only accounts).
    pub password_hash: Option<String>,
}

/// Driven port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new account with an optional stored credential.
    async fn create(
        &self,
        user: &User,
        password_hash: Option<&str>,
    ) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user and stored credential by normalised email.
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<CredentialRecord>, UserPersistenceError>;

    /// Replace the stored credential for an existing account.
    async fn set_password_hash(
        &self,
        id: &UserId,
        password_hash: &str,
    ) -> Result<(), UserPersistenceError>;
}
