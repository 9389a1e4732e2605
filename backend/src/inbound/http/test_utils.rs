//! Test helpers for inbound HTTP components.

use std::sync::{Arc, Mutex};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::web;
use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::domain::ports::{
    CredentialRecord, MembershipPersistenceError, MembershipRepository, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    ContentDay, CredentialAccountService, DayIndex, Email, Membership, Question, Relationship,
    RelationshipId, RelationshipKind, RelationshipStatus, User, UserId, CYCLE_DAYS,
};
use crate::outbound::catalogue::JsonContentCatalogue;

use super::state::{HttpState, HttpStateOptions, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// In-memory user repository for handler tests.
#[derive(Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<Vec<(User, Option<String>)>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(
        &self,
        user: &User,
        password_hash: Option<&str>,
    ) -> Result<(), UserPersistenceError> {
        let mut accounts = self.accounts.lock().expect("accounts lock");
        if accounts.iter().any(|(u, _)| u.email() == user.email()) {
            return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
        }
        accounts.push((user.clone(), password_hash.map(str::to_owned)));
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let accounts = self.accounts.lock().expect("accounts lock");
        Ok(accounts
            .iter()
            .find(|(u, _)| u.id() == id)
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<CredentialRecord>, UserPersistenceError> {
        let accounts = self.accounts.lock().expect("accounts lock");
        Ok(accounts
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
        let mut accounts = self.accounts.lock().expect("accounts lock");
        match accounts.iter_mut().find(|(u, _)| u.id() == id) {
            Some((_, hash)) => {
                *hash = Some(password_hash.to_owned());
                Ok(())
            }
            None => Err(UserPersistenceError::query("no rows updated")),
        }
    }
}

/// In-memory membership repository for handler tests.
///
/// Interior mutability lets tests register relationships after signup has
/// produced the user ids, while the handlers hold the same instance.
#[derive(Default)]
pub struct InMemoryMembershipRepository {
    inner: Mutex<MembershipFixtures>,
}

#[derive(Default)]
struct MembershipFixtures {
    relationships: Vec<Relationship>,
    memberships: Vec<Membership>,
}

impl InMemoryMembershipRepository {
    /// Add an active relationship created `minutes_ago` minutes in the past
    /// with the given members, returning its id.
    pub fn add_relationship(&self, minutes_ago: i64, members: &[UserId]) -> RelationshipId {
        let mut inner = self.inner.lock().expect("memberships lock");
        let relationship = Relationship::new(
            RelationshipId::random(),
            RelationshipKind::Couples,
            RelationshipStatus::Active,
            None,
            Utc::now() - Duration::minutes(minutes_ago),
        )
        .expect("valid relationship");
        let id = *relationship.id();
        inner.relationships.push(relationship);
        for member in members {
            inner
                .memberships
                .push(Membership::new(*member, id, Utc::now(), None));
        }
        id
    }

    /// Mark `user` as departed from `relationship`.
    pub fn depart(&self, user: &UserId, relationship: &RelationshipId) {
        let mut inner = self.inner.lock().expect("memberships lock");
        inner.memberships = inner
            .memberships
            .iter()
            .map(|m| {
                if m.user_id() == user && m.relationship_id() == relationship {
                    Membership::new(*user, *relationship, m.joined_at(), Some(Utc::now()))
                } else {
                    m.clone()
                }
            })
            .collect();
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn find_active(
        &self,
        user: &UserId,
        relationship: &RelationshipId,
    ) -> Result<Option<Membership>, MembershipPersistenceError> {
        let inner = self.inner.lock().expect("memberships lock");
        Ok(inner
            .memberships
            .iter()
            .find(|m| m.user_id() == user && m.relationship_id() == relationship && m.is_active())
            .cloned())
    }

    async fn active_member_ids(
        &self,
        relationship: &RelationshipId,
    ) -> Result<Vec<UserId>, MembershipPersistenceError> {
        let inner = self.inner.lock().expect("memberships lock");
        Ok(inner
            .memberships
            .iter()
            .filter(|m| m.relationship_id() == relationship && m.is_active())
            .map(|m| *m.user_id())
            .collect())
    }

    async fn active_relationships_for_user(
        &self,
        user: &UserId,
    ) -> Result<Vec<Relationship>, MembershipPersistenceError> {
        let inner = self.inner.lock().expect("memberships lock");
        let mut active: Vec<Relationship> = inner
            .relationships
            .iter()
            .filter(|r| r.is_active())
            .filter(|r| {
                inner
                    .memberships
                    .iter()
                    .any(|m| m.user_id() == user && m.relationship_id() == r.id() && m.is_active())
            })
            .cloned()
            .collect();
        active.sort_by_key(|r| (r.created_at(), *r.id().as_uuid()));
        Ok(active)
    }
}

/// A full 30-day catalogue with one question per day, so any date resolves.
pub fn test_catalogue() -> JsonContentCatalogue {
    let records = (1..=CYCLE_DAYS)
        .map(|day| {
            ContentDay::new(
                DayIndex::new(day).expect("valid day"),
                vec![Question::new(format!("Question for day {day}?")).expect("valid question")],
            )
        })
        .collect();
    JsonContentCatalogue::from_records(records).expect("non-empty catalogue")
}

/// Assemble handler state over in-memory ports.
pub fn test_state(memberships: Arc<InMemoryMembershipRepository>) -> web::Data<HttpState> {
    let users = Arc::new(InMemoryUserRepository::default());
    let accounts = Arc::new(CredentialAccountService::new(users));
    let ports = HttpStatePorts {
        login: accounts.clone(),
        accounts,
        memberships,
        catalogue: Arc::new(test_catalogue()),
    };
    web::Data::new(HttpState::new(ports, HttpStateOptions::default()))
}
