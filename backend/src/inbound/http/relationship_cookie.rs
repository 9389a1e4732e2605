//! The `current_relationship` cookie.
//!
//! Which relationship a multi-relationship user is viewing lives in a plain
//! browser cookie, never server-side. The domain resolver treats the value
//! as advisory; this module owns the cookie's name and attributes so every
//! writer agrees on them.

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite, time::Duration};

use crate::domain::RelationshipId;

/// Cookie name holding the selected relationship id.
pub const CURRENT_RELATIONSHIP_COOKIE: &str = "current_relationship";

/// Selection lifetime: one year.
const MAX_AGE: Duration = Duration::days(365);

/// Raw cookie value from the request, if present.
///
/// No validation happens here; the resolver checks the value against the
/// user's active memberships.
pub fn read(req: &HttpRequest) -> Option<String> {
    req.cookie(CURRENT_RELATIONSHIP_COOKIE)
        .map(|cookie| cookie.value().to_owned())
}

/// Build the selection cookie for `id`.
///
/// Attributes: path `/`, max-age one year, http-only, same-site lax, and
/// `Secure` when the deployment serves HTTPS.
pub fn build(id: &RelationshipId, secure: bool) -> Cookie<'static> {
    Cookie::build(CURRENT_RELATIONSHIP_COOKIE, id.to_string())
        .path("/")
        .max_age(MAX_AGE)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .finish()
}
