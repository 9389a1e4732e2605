//! Account API handlers.
//!
//! ```text
//! POST /api/v1/signup {"email":"pat@example.com","password":"hunter22"}
//! POST /api/v1/login  {"email":"pat@example.com","password":"hunter22"}
//! POST /api/v1/logout
//! PUT  /api/v1/password {"password":"new-password"}
//! ```

use actix_web::{post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    DisplayName, DomainError, LoginCredentials, LoginValidationError, User, UserValidationError,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Signup request body for `POST /api/v1/signup`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"email":"pat@example.com","password":"hunter22"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Password change body for `PUT /api/v1/password`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub password: String,
}

/// Create a credential account and establish a session for it.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = User, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 409, description = "Email already registered", body = DomainError),
        (status = 500, description = "Internal server error")
    ),
    tags = ["accounts"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let SignupRequest {
        email,
        password,
        display_name,
    } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&email, &password)
        .map_err(map_login_validation_error)?;
    let display_name = display_name
        .map(DisplayName::new)
        .transpose()
        .map_err(map_display_name_error)?;
    let user = state.accounts.signup(&credentials, display_name).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Created().json(user))
}

/// Authenticate a user and establish a session.
///
/// Uses the centralised `DomainError` type so clients get a consistent
/// error schema across all endpoints.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 401, description = "Invalid credentials", body = DomainError),
        (status = 500, description = "Internal server error")
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Drop the caller's session.
///
/// Idempotent: logging out without a session still succeeds.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session cleared"),
    ),
    tags = ["accounts"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.clear();
    Ok(HttpResponse::NoContent().finish())
}

/// Replace the authenticated user's password.
#[utoipa::path(
    put,
    path = "/api/v1/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password replaced"),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 401, description = "Unauthorised", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["accounts"],
    operation_id = "changePassword"
)]
#[put("/password")]
pub async fn change_password(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<ChangePasswordRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state
        .accounts
        .change_password(&user_id, &payload.password)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

fn map_login_validation_error(err: LoginValidationError) -> DomainError {
    match err {
        LoginValidationError::InvalidEmail(source) => {
            DomainError::invalid_request(source.to_string())
                .with_details(json!({ "field": "email", "code": "invalid_email" }))
        }
        LoginValidationError::EmptyPassword => {
            DomainError::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
    }
}

fn map_display_name_error(err: UserValidationError) -> DomainError {
    DomainError::invalid_request(err.to_string())
        .with_details(json!({ "field": "displayName", "code": "invalid_display_name" }))
}
