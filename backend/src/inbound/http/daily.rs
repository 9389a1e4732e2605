//! Daily content API handler.
//!
//! ```text
//! GET /api/v1/daily
//! ```
//!
//! Resolves the caller's current relationship (selection cookie first, then
//! their default relationship), verifies membership, and returns the day's
//! questions and images.

use actix_web::{get, web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::domain::{CurrentRelationship, DailyMaterial, DomainError, RelationshipId};
use crate::inbound::http::relationship_cookie;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Response body for `GET /api/v1/daily`.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyResponse {
    pub relationship_id: RelationshipId,
    #[serde(flatten)]
    pub material: DailyMaterial,
}

/// Today's content for the caller's current relationship.
///
/// A stale or foreign selection cookie is ignored rather than rejected; the
/// response then carries a refreshed cookie pointing at the relationship
/// that was actually used.
#[utoipa::path(
    get,
    path = "/api/v1/daily",
    responses(
        (status = 200, description = "Daily material", body = DailyResponse),
        (status = 401, description = "Unauthorised", body = DomainError),
        (status = 403, description = "Not a member", body = DomainError),
        (status = 404, description = "No active relationship", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["daily"],
    operation_id = "dailyContent"
)]
#[get("/daily")]
pub async fn daily_content(
    req: HttpRequest,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let selection = relationship_cookie::read(&req);
    let current = state.resolver.resolve(&user_id, selection.as_deref()).await?;
    let Some(relationship_id) = current.id() else {
        return Err(DomainError::not_found("no active relationship")
            .with_details(json!({ "code": "no_relationship" })));
    };
    state.guard.require_member(&user_id, &relationship_id).await?;

    let material = state.daily.material_for(Utc::now().date_naive());
    let body = DailyResponse {
        relationship_id,
        material,
    };

    let mut response = HttpResponse::Ok();
    if matches!(current, CurrentRelationship::Selected { from_cookie: false, .. }) {
        response.cookie(relationship_cookie::build(
            &relationship_id,
            state.cookie_secure,
        ));
    }
    Ok(response.json(body))
}
