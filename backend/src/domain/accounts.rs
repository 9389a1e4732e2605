//! Credential-backed implementation of the account use-case ports.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use super::credentials::{self, LoginCredentials, PASSWORD_MIN_LEN};
use super::error::DomainError;
use super::ports::{AccountService, LoginService, UserPersistenceError, UserRepository};
use super::user::{DisplayName, User, UserId};

fn map_user_persistence_error(error: UserPersistenceError) -> DomainError {
    match error {
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user repository unavailable");
            DomainError::service_unavailable("account store unavailable")
        }
        UserPersistenceError::Query { message } => {
            warn!(%message, "user repository query failed");
            DomainError::internal(message)
        }
        UserPersistenceError::DuplicateEmail { .. } => {
            DomainError::conflict("an account with this email already exists")
        }
    }
}

fn check_password_policy(password: &str) -> Result<(), DomainError> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(DomainError::invalid_request(format!(
            "password must be at least {PASSWORD_MIN_LEN} characters"
        ))
        .with_details(json!({ "field": "password", "code": "too_short" })));
    }
    Ok(())
}

/// Account service backed by a user repository and the scrypt credential
/// helpers.
#[derive(Clone)]
pub struct CredentialAccountService {
    users: Arc<dyn UserRepository>,
}

impl CredentialAccountService {
    /// Create a service over the given user repository.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl LoginService for CredentialAccountService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, DomainError> {
        let record = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_persistence_error)?;

        // Missing account, missing credential, and wrong password all fail
        // identically so responses cannot be used to probe for accounts.
        let denied = || DomainError::unauthorized("invalid credentials");
        let record = record.ok_or_else(denied)?;
        let stored = record.password_hash.as_deref().ok_or_else(denied)?;
        if credentials::verify_password(credentials.password(), stored) {
            Ok(*record.user.id())
        } else {
            Err(denied())
        }
    }
}

#[async_trait]
impl AccountService for CredentialAccountService {
    async fn signup(
        &self,
        credentials: &LoginCredentials,
        display_name: Option<DisplayName>,
    ) -> Result<User, DomainError> {
        check_password_policy(credentials.password())?;
        let hash = credentials::hash_password(credentials.password())?;
        let user = User::new(UserId::random(), credentials.email().clone(), display_name);
        self.users
            .create(&user, Some(&hash))
            .await
            .map_err(map_user_persistence_error)?;
        Ok(user)
    }

    async fn change_password(
        &self,
        user: &UserId,
        new_password: &str,
    ) -> Result<(), DomainError> {
        check_password_policy(new_password)?;
        let existing = self
            .users
            .find_by_id(user)
            .await
            .map_err(map_user_persistence_error)?;
        if existing.is_none() {
            return Err(DomainError::not_found("account not found"));
        }
        let hash = credentials::hash_password(new_password)?;
        self.users
            .set_password_hash(user, &hash)
            .await
            .map_err(map_user_persistence_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Mutex;

    use rstest::rstest;

    use super::*;
    use crate::domain::ports::CredentialRecord;
    use crate::domain::user::Email;
    use crate::domain::ErrorCode;

    #[derive(Default)]
    struct StubState {
        accounts: Vec<(User, Option<String>)>,
        fail_connection: bool,
    }

    #[derive(Default)]
    struct StubUserRepository {
        state: Mutex<StubState>,
    }

    impl StubUserRepository {
        fn with_account(user: User, password: &str) -> Self {
            let hash = credentials::hash_password(password).expect("hash password");
            Self {
                state: Mutex::new(StubState {
                    accounts: vec![(user, Some(hash))],
                    fail_connection: false,
                }),
            }
        }

        fn failing() -> Self {
            Self {
                state: Mutex::new(StubState {
                    fail_connection: true,
                    ..StubState::default()
                }),
            }
        }

        fn check(&self) -> Result<(), UserPersistenceError> {
            if self.state.lock().expect("state lock").fail_connection {
                Err(UserPersistenceError::connection("database unavailable"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn create(
            &self,
            user: &User,
            password_hash: Option<&str>,
        ) -> Result<(), UserPersistenceError> {
            self.check()?;
            let mut state = self.state.lock().expect("state lock");
            if state.accounts.iter().any(|(u, _)| u.email() == user.email()) {
                return Err(UserPersistenceError::duplicate_email(
                    user.email().as_ref(),
                ));
            }
            state
                .accounts
                .push((user.clone(), password_hash.map(str::to_owned)));
            Ok(())
        }

        async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
            self.check()?;
            let state = self.state.lock().expect("state lock");
            Ok(state
                .accounts
                .iter()
                .find(|(u, _)| u.id() == id)
                .map(|(u, _)| u.clone()))
        }

        async fn find_by_email(
            &self,
            email: &Email,
        ) -> Result<Option<CredentialRecord>, UserPersistenceError> {
            self.check()?;
            let state = self.state.lock().expect("state lock");
            Ok(state
                .accounts
                .iter()
                .find(|(u, _)| u.email() == email)
                .map(|(u, hash)| CredentialRecord {
                    user: u.clone(),
                    password_hash: hash.clone(),
                }))
        }

        async fn set_password_hash(
            &self,
            id: &UserId,
            password_hash: &str,
        ) -> Result<(), UserPersistenceError> {
            self.check()?;
            let mut state = self.state.lock().expect("state lock");
            match state.accounts.iter_mut().find(|(u, _)| u.id() == id) {
                Some((_, hash)) => {
                    *hash = Some(password_hash.to_owned());
                    Ok(())
                }
                None => Err(UserPersistenceError::query("no rows updated")),
            }
        }
    }

    fn account() -> User {
        User::new(
            UserId::random(),
            Email::new("pat@example.com").expect("valid email"),
            None,
        )
    }

    fn creds(email: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(email, password).expect("valid credentials")
    }

    #[tokio::test]
    async fn authenticates_valid_credentials() {
        let user = account();
        let expected = *user.id();
        let service =
            CredentialAccountService::new(Arc::new(StubUserRepository::with_account(
                user,
                "hunter22",
            )));

        let id = service
            .authenticate(&creds("pat@example.com", "hunter22"))
            .await
            .expect("authentication succeeds");
        assert_eq!(id, expected);
    }

    #[rstest]
    #[case("pat@example.com", "wrong-password")]
    #[case("nobody@example.com", "hunter22")]
    #[tokio::test]
    async fn wrong_credentials_are_unauthorized(#[case] email: &str, #[case] password: &str) {
        let service = CredentialAccountService::new(Arc::new(
            StubUserRepository::with_account(account(), "hunter22"),
        ));

        let err = service
            .authenticate(&creds(email, password))
            .await
            .expect_err("authentication must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "invalid credentials");
    }

    #[tokio::test]
    async fn signup_persists_account_and_login_follows() {
        let service = CredentialAccountService::new(Arc::new(StubUserRepository::default()));
        let credentials = creds("new@example.com", "long-enough");

        let user = service
            .signup(&credentials, None)
            .await
            .expect("signup succeeds");
        assert_eq!(user.email().as_ref(), "new@example.com");

        let id = service
            .authenticate(&credentials)
            .await
            .expect("fresh account can log in");
        assert_eq!(id, *user.id());
    }

    #[tokio::test]
    async fn signup_rejects_short_passwords() {
        let service = CredentialAccountService::new(Arc::new(StubUserRepository::default()));
        let err = service
            .signup(&creds("new@example.com", "short"), None)
            .await
            .expect_err("short password must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let service = CredentialAccountService::new(Arc::new(
            StubUserRepository::with_account(account(), "hunter22"),
        ));
        let err = service
            .signup(&creds("pat@example.com", "long-enough"), None)
            .await
            .expect_err("duplicate email must fail");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn change_password_replaces_credential() {
        let user = account();
        let id = *user.id();
        let service = CredentialAccountService::new(Arc::new(
            StubUserRepository::with_account(user, "hunter22"),
        ));

        service
            .change_password(&id, "new-password")
            .await
            .expect("password change succeeds");

        assert!(
            service
                .authenticate(&creds("pat@example.com", "hunter22"))
                .await
                .is_err()
        );
        assert!(
            service
                .authenticate(&creds("pat@example.com", "new-password"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn change_password_for_unknown_account_is_not_found() {
        let service = CredentialAccountService::new(Arc::new(StubUserRepository::default()));
        let err = service
            .change_password(&UserId::random(), "new-password")
            .await
            .expect_err("unknown account must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn repository_outage_maps_to_service_unavailable() {
        let service = CredentialAccountService::new(Arc::new(StubUserRepository::failing()));
        let err = service
            .authenticate(&creds("pat@example.com", "hunter22"))
            .await
            .expect_err("outage must fail");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
