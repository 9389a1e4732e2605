//! Port abstractions between the domain and its adapters.
//!
//! Driven ports (`UserRepository`, `MembershipRepository`) are implemented by
//! outbound persistence adapters. Driving ports (`LoginService`,
//! `AccountService`, `ContentCatalogue`) are called by inbound adapters,
//! which lets HTTP handler tests substitute deterministic doubles instead of
//! wiring infrastructure.

pub mod account_service;
pub mod content_catalogue;
pub mod membership_repository;
pub mod user_repository;

pub use self::account_service::{AccountService, LoginService};
pub use self::content_catalogue::ContentCatalogue;
pub use self::membership_repository::{MembershipPersistenceError, MembershipRepository};
pub use self::user_repository::{CredentialRecord, UserPersistenceError, UserRepository};
