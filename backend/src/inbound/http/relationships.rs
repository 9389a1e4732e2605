//! Relationship API handlers.
//!
//! ```text
//! GET /api/v1/relationships
//! PUT /api/v1/relationships/current {"relationshipId":"..."}
//! GET /api/v1/relationships/{id}/members
//! ```

use actix_web::{get, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainError, Relationship, RelationshipId, UserId};
use crate::inbound::http::relationship_cookie;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Selection body for `PUT /api/v1/relationships/current`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectRelationshipRequest {
    pub relationship_id: Uuid,
}

/// List the caller's active relationships in default-selection order.
#[utoipa::path(
    get,
    path = "/api/v1/relationships",
    responses(
        (status = 200, description = "Active relationships", body = [Relationship]),
        (status = 401, description = "Unauthorised", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["relationships"],
    operation_id = "listRelationships"
)]
#[get("/relationships")]
pub async fn list_relationships(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Relationship>>> {
    let user_id = session.require_user_id()?;
    let relationships = state.resolver.active_relationships(&user_id).await?;
    Ok(web::Json(relationships))
}

/// Pin the caller's current relationship via a long-lived cookie.
///
/// Membership is checked before the cookie is set, so a client can never
/// pin a relationship it does not belong to.
#[utoipa::path(
    put,
    path = "/api/v1/relationships/current",
    request_body = SelectRelationshipRequest,
    responses(
        (status = 204, description = "Selection stored", headers(("Set-Cookie" = String, description = "Selection cookie"))),
        (status = 401, description = "Unauthorised", body = DomainError),
        (status = 403, description = "Not a member", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["relationships"],
    operation_id = "selectCurrentRelationship"
)]
#[put("/relationships/current")]
pub async fn select_current_relationship(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<SelectRelationshipRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let relationship_id = RelationshipId::from(payload.relationship_id);
    state.guard.require_member(&user_id, &relationship_id).await?;
    Ok(HttpResponse::NoContent()
        .cookie(relationship_cookie::build(
            &relationship_id,
            state.cookie_secure,
        ))
        .finish())
}

/// List the active member ids of a relationship the caller belongs to.
#[utoipa::path(
    get,
    path = "/api/v1/relationships/{id}/members",
    params(("id" = Uuid, Path, description = "Relationship id")),
    responses(
        (status = 200, description = "Active member ids", body = [UserId]),
        (status = 401, description = "Unauthorised", body = DomainError),
        (status = 403, description = "Not a member", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["relationships"],
    operation_id = "listRelationshipMembers"
)]
#[get("/relationships/{id}/members")]
pub async fn list_relationship_members(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<UserId>>> {
    let user_id = session.require_user_id()?;
    let relationship_id = RelationshipId::from(path.into_inner());
    state.guard.require_member(&user_id, &relationship_id).await?;
    let members = state.guard.active_member_ids(&relationship_id).await?;
    Ok(web::Json(members))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::cookie::Cookie;
    use actix_web::{test as actix_test, web, App};
    use serde_json::Value;

    use super::*;
    use crate::inbound::http::relationship_cookie::CURRENT_RELATIONSHIP_COOKIE;
    use crate::inbound::http::test_utils::{
        test_session_middleware, test_state, InMemoryMembershipRepository,
    };
    use crate::inbound::http::users::{signup, SignupRequest};

    fn test_app(
        memberships: Arc<InMemoryMembershipRepository>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(test_state(memberships))
            .wrap(test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(signup)
                    .service(list_relationships)
                    .service(select_current_relationship)
                    .service(list_relationship_members),
            )
    }

    /// Sign up a fixture user, returning their id and session cookie.
    async fn signup_user(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        email: &str,
    ) -> (UserId, Cookie<'static>) {
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/signup")
            .set_json(&SignupRequest {
                email: email.into(),
                password: "hunter22-long".into(),
                display_name: None,
            })
            .to_request();
        let response = actix_test::call_service(app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
        let cookie = response
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned();
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("user payload");
        let id = value
            .get("id")
            .and_then(Value::as_str)
            .and_then(|raw| UserId::new(raw).ok())
            .expect("user id");
        (id, cookie)
    }

    #[actix_web::test]
    async fn list_relationships_orders_by_creation() {
        let memberships = Arc::new(InMemoryMembershipRepository::default());
        let app = actix_test::init_service(test_app(memberships.clone())).await;
        let (user, cookie) = signup_user(&app, "pat@example.com").await;
        let newer = memberships.add_relationship(5, &[user]);
        let older = memberships.add_relationship(60, &[user]);

        let request = actix_test::TestRequest::get()
            .uri("/api/v1/relationships")
            .cookie(cookie)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("relationship list");
        let ids: Vec<&str> = value
            .as_array()
            .expect("array payload")
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_str))
            .collect();
        assert_eq!(
            ids,
            vec![older.as_uuid().to_string(), newer.as_uuid().to_string()]
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
        );
    }

    #[actix_web::test]
    async fn select_current_sets_cookie_for_member() {
        let memberships = Arc::new(InMemoryMembershipRepository::default());
        let app = actix_test::init_service(test_app(memberships.clone())).await;
        let (user, cookie) = signup_user(&app, "pat@example.com").await;
        let relationship = memberships.add_relationship(5, &[user]);

        let request = actix_test::TestRequest::put()
            .uri("/api/v1/relationships/current")
            .cookie(cookie)
            .set_json(&SelectRelationshipRequest {
                relationship_id: *relationship.as_uuid(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);
        let selection = response
            .response()
            .cookies()
            .find(|c| c.name() == CURRENT_RELATIONSHIP_COOKIE)
            .expect("selection cookie");
        assert_eq!(selection.value(), relationship.as_uuid().to_string());
    }

    #[actix_web::test]
    async fn select_current_refuses_non_member() {
        let memberships = Arc::new(InMemoryMembershipRepository::default());
        let app = actix_test::init_service(test_app(memberships.clone())).await;
        let (_user, cookie) = signup_user(&app, "pat@example.com").await;
        let foreign = memberships.add_relationship(5, &[]);

        let request = actix_test::TestRequest::put()
            .uri("/api/v1/relationships/current")
            .cookie(cookie)
            .set_json(&SelectRelationshipRequest {
                relationship_id: *foreign.as_uuid(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::FORBIDDEN);
        assert!(
            !response
                .response()
                .cookies()
                .any(|c| c.name() == CURRENT_RELATIONSHIP_COOKIE),
            "no selection cookie on refusal"
        );
    }

    #[actix_web::test]
    async fn members_lists_active_only_for_members() {
        let memberships = Arc::new(InMemoryMembershipRepository::default());
        let app = actix_test::init_service(test_app(memberships.clone())).await;
        let (user, cookie) = signup_user(&app, "pat@example.com").await;
        let (partner, _partner_cookie) = signup_user(&app, "sam@example.com").await;
        let relationship = memberships.add_relationship(5, &[user, partner]);
        memberships.depart(&partner, &relationship);

        let uri = format!(
            "/api/v1/relationships/{}/members",
            relationship.as_uuid()
        );
        let request = actix_test::TestRequest::get()
            .uri(&uri)
            .cookie(cookie)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("member list");
        let ids: Vec<&str> = value
            .as_array()
            .expect("array payload")
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(ids, vec![user.to_string()].iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[actix_web::test]
    async fn members_refuses_departed_caller() {
        let memberships = Arc::new(InMemoryMembershipRepository::default());
        let app = actix_test::init_service(test_app(memberships.clone())).await;
        let (user, cookie) = signup_user(&app, "pat@example.com").await;
        let relationship = memberships.add_relationship(5, &[user]);
        memberships.depart(&user, &relationship);

        let uri = format!(
            "/api/v1/relationships/{}/members",
            relationship.as_uuid()
        );
        let request = actix_test::TestRequest::get()
            .uri(&uri)
            .cookie(cookie)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn relationships_require_session() {
        let memberships = Arc::new(InMemoryMembershipRepository::default());
        let app = actix_test::init_service(test_app(memberships)).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/v1/relationships")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }
}
