//! Credential primitives: validated login payloads and password hashing.
//!
//! Stored credential format: `base64(salt) + "." + base64(derived key)` with
//! a random 16-byte salt and a 64-byte scrypt-derived key. Verification
//! recomputes the key with the stored salt and compares in constant time;
//! a structurally malformed stored value verifies as `false`, never as an
//! error.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::RngCore;
use rand::rngs::OsRng;
use scrypt::Params;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::error::DomainError;
use super::user::{Email, UserValidationError};

/// Salt length in bytes.
const SALT_LEN: usize = 16;
/// Derived key length in bytes.
const KEY_LEN: usize = 64;
/// scrypt cost parameters: N = 2^14, r = 8, p = 1.
const LOG_N: u8 = 14;
const R: u32 = 8;
const P: u32 = 1;

/// Minimum password length. Enforced by signup and password-change callers,
/// not by the hashing helpers themselves.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    InvalidEmail(UserValidationError),
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(err) => write!(f, "{err}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is normalised via [`Email`].
/// - `password` is non-empty but otherwise unconstrained here; length policy
///   belongs to the account-creation callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    ///
    /// # Examples
    /// ```
    /// use tandem_backend::domain::LoginCredentials;
    ///
    /// let creds = LoginCredentials::try_from_parts("Pat@Example.com", "hunter22").unwrap();
    /// assert_eq!(creds.email().as_ref(), "pat@example.com");
    /// ```
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = Email::new(email).map_err(LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email suitable for account lookups.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

fn params() -> Result<Params, DomainError> {
    Params::new(LOG_N, R, P, KEY_LEN)
        .map_err(|err| DomainError::internal(format!("invalid scrypt parameters: {err}")))
}

fn derive_key(plain: &str, salt: &[u8]) -> Result<[u8; KEY_LEN], DomainError> {
    let mut key = [0u8; KEY_LEN];
    scrypt::scrypt(plain.as_bytes(), salt, &params()?, &mut key)
        .map_err(|err| DomainError::internal(format!("scrypt derivation failed: {err}")))?;
    Ok(key)
}

/// Hash a plaintext password for storage.
///
/// Returns `base64(salt) + "." + base64(key)`. Each call draws a fresh
/// random salt, so hashing the same password twice yields different strings.
pub fn hash_password(plain: &str) -> Result<String, DomainError> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let key = derive_key(plain, &salt)?;
    Ok(format!("{}.{}", BASE64.encode(salt), BASE64.encode(key)))
}

/// Verify a plaintext password against a stored credential string.
///
/// Wrong passwords and malformed stored values both return `false`; this
/// never panics or surfaces an error for attacker-controlled input.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    let Some((salt_part, key_part)) = stored.split_once('.') else {
        return false;
    };
    let Ok(salt) = BASE64.decode(salt_part) else {
        return false;
    };
    let Ok(expected) = BASE64.decode(key_part) else {
        return false;
    };
    if expected.len() != KEY_LEN {
        return false;
    }
    match derive_key(plain, &salt) {
        Ok(derived) => derived.ct_eq(expected.as_slice()).into(),
        Err(_) => false,
    }
}
