//! Domain primitives, aggregates, and use-case services.
//!
//! Purpose: define strongly typed entities shared by the HTTP and
//! persistence layers, plus the small stateless services (daily rotation,
//! membership guard, current-relationship resolution, credential accounts)
//! that make up the application core. Types are immutable; invariants and
//! serialisation contracts live in each type's Rustdoc.

pub mod accounts;
pub mod content;
pub mod credentials;
pub mod current;
pub mod daily;
pub mod error;
pub mod guard;
pub mod membership;
pub mod picker;
pub mod ports;
pub mod relationship;
pub mod user;

pub use self::accounts::CredentialAccountService;
pub use self::content::{ContentDay, ContentValidationError, DayIndex, Question, CYCLE_DAYS};
pub use self::credentials::{LoginCredentials, LoginValidationError, PASSWORD_MIN_LEN};
pub use self::current::{CurrentRelationship, CurrentRelationshipResolver};
pub use self::daily::{DailyContentService, DailyMaterial};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode, TRACE_ID_HEADER};
pub use self::guard::MembershipGuard;
pub use self::membership::Membership;
pub use self::relationship::{
    Relationship, RelationshipId, RelationshipKind, RelationshipStatus,
    RelationshipValidationError,
};
pub use self::user::{DisplayName, Email, User, UserId, UserValidationError};

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use tandem_backend::domain::{ApiResult, DomainError};
///
/// fn denied() -> ApiResult<()> {
///     Err(DomainError::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, DomainError>;
