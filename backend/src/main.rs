//! Backend entry-point: wires REST endpoints, persistence, and OpenAPI docs.

use std::env;
use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use tandem_backend::doc::ApiDoc;
use tandem_backend::domain::CredentialAccountService;
use tandem_backend::inbound::http::daily::daily_content;
use tandem_backend::inbound::http::health::{live, ready, HealthState};
use tandem_backend::inbound::http::relationships::{
    list_relationship_members, list_relationships, select_current_relationship,
};
use tandem_backend::inbound::http::state::{HttpState, HttpStateOptions, HttpStatePorts};
use tandem_backend::inbound::http::users::{change_password, login, logout, signup};
use tandem_backend::outbound::catalogue::JsonContentCatalogue;
use tandem_backend::outbound::persistence::{
    DbPool, DieselMembershipRepository, DieselUserRepository, PoolConfig,
};
use tandem_backend::Trace;

const DEFAULT_CATALOGUE_PATH: &str = "data/daily_questions.json";

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(std::io::Error::other)?;

    let catalogue_path =
        env::var("CONTENT_CATALOGUE").unwrap_or_else(|_| DEFAULT_CATALOGUE_PATH.into());
    let catalogue = JsonContentCatalogue::load(&catalogue_path).map_err(|e| {
        std::io::Error::other(format!("failed to load catalogue at {catalogue_path}: {e}"))
    })?;

    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let accounts = Arc::new(CredentialAccountService::new(users));
    let state = web::Data::new(HttpState::new(
        HttpStatePorts {
            login: accounts.clone(),
            accounts,
            memberships: Arc::new(DieselMembershipRepository::new(pool)),
            catalogue: Arc::new(catalogue),
        },
        HttpStateOptions {
            cookie_secure,
            ..HttpStateOptions::default()
        },
    ));

    let health_state = web::Data::new(HealthState::new());
    // Clone for server factory so readiness probe remains accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(
            state.clone(),
            server_health_state.clone(),
            key.clone(),
            cookie_secure,
        )
    })
    .bind(("0.0.0.0", 8080))?;

    health_state.mark_ready();
    server.run().await
}

/// Read the session key from disk, falling back to an ephemeral key only in
/// development.
fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

fn build_app(
    state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
    key: Key,
    cookie_secure: bool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(signup)
        .service(login)
        .service(logout)
        .service(change_password)
        .service(list_relationships)
        .service(select_current_relationship)
        .service(list_relationship_members)
        .service(daily_content);

    #[cfg_attr(not(debug_assertions), allow(unused_mut))]
    let mut app = App::new()
        .app_data(state)
        .app_data(health_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    {
        app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app
}
