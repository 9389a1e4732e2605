//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: all HTTP endpoints from the inbound layer, the domain
//! schemas they exchange, and the session cookie security scheme.
//!
//! The generated specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    DailyMaterial, DomainError, ErrorCode, Relationship, RelationshipKind, RelationshipStatus,
    User,
};
use crate::inbound::http::daily::DailyResponse;
use crate::inbound::http::relationships::SelectRelationshipRequest;
use crate::inbound::http::users::{ChangePasswordRequest, LoginRequest, SignupRequest};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login or /signup.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Tandem backend API",
        description = "HTTP interface for accounts, relationship selection, and daily content."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::change_password,
        crate::inbound::http::relationships::list_relationships,
        crate::inbound::http::relationships::select_current_relationship,
        crate::inbound::http::relationships::list_relationship_members,
        crate::inbound::http::daily::daily_content,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Relationship,
        RelationshipKind,
        RelationshipStatus,
        DomainError,
        ErrorCode,
        DailyMaterial,
        DailyResponse,
        SignupRequest,
        LoginRequest,
        ChangePasswordRequest,
        SelectRelationshipRequest,
    )),
    tags(
        (name = "accounts", description = "Signup, login, and credential management"),
        (name = "relationships", description = "Relationship listing and selection"),
        (name = "daily", description = "Daily rotating content"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Regression coverage for the generated document.

    use utoipa::OpenApi;

    use super::*;

    #[test]
    fn document_registers_all_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/signup",
            "/api/v1/login",
            "/api/v1/logout",
            "/api/v1/password",
            "/api/v1/relationships",
            "/api/v1/relationships/current",
            "/api/v1/relationships/{id}/members",
            "/api/v1/daily",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing path {path} in OpenAPI document"
            );
        }
    }

    #[test]
    fn document_carries_session_security_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components present");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
