//! Driving ports for authentication and account management use-cases.
//!
//! Inbound adapters call these to create accounts, verify credentials, and
//! change passwords without knowing the backing infrastructure, which keeps
//! HTTP handler tests deterministic.

use async_trait::async_trait;

use crate::domain::credentials::LoginCredentials;
use crate::domain::error::DomainError;
use crate::domain::user::{DisplayName, User, UserId};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Wrong email and wrong password both map to the same unauthorized
    /// error so responses do not reveal which accounts exist.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, DomainError>;
}

/// Domain use-case port for account lifecycle operations.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create a credential account; conflict when the email is taken.
    async fn signup(
        &self,
        credentials: &LoginCredentials,
        display_name: Option<DisplayName>,
    ) -> Result<User, DomainError>;

    /// Replace the password for an authenticated account.
    async fn change_password(
        &self,
        user: &UserId,
        new_password: &str,
    ) -> Result<(), DomainError>;
}
