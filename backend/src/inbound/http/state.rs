//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and services and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountService, ContentCatalogue, LoginService, MembershipRepository};
use crate::domain::{CurrentRelationshipResolver, DailyContentService, MembershipGuard};

/// Parameter object bundling the port implementations handlers need.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn AccountService>,
    pub memberships: Arc<dyn MembershipRepository>,
    pub catalogue: Arc<dyn ContentCatalogue>,
}

/// Presentation options that are deployment-specific rather than port-backed.
#[derive(Debug, Clone)]
pub struct HttpStateOptions {
    /// Fixed pool the daily images are picked from.
    pub image_pool: Vec<String>,
    /// How many images each day shows.
    pub images_per_day: usize,
    /// Whether selection cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

impl Default for HttpStateOptions {
    fn default() -> Self {
        Self {
            image_pool: (1..=12)
                .map(|i| format!("/images/daily/{i:02}.webp"))
                .collect(),
            images_per_day: 4,
            cookie_secure: false,
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn AccountService>,
    pub guard: MembershipGuard,
    pub resolver: CurrentRelationshipResolver,
    pub daily: DailyContentService,
    pub cookie_secure: bool,
}

impl HttpState {
    /// Assemble handler state from ports and deployment options.
    pub fn new(ports: HttpStatePorts, options: HttpStateOptions) -> Self {
        let HttpStatePorts {
            login,
            accounts,
            memberships,
            catalogue,
        } = ports;
        let HttpStateOptions {
            image_pool,
            images_per_day,
            cookie_secure,
        } = options;
        Self {
            login,
            accounts,
            guard: MembershipGuard::new(memberships.clone()),
            resolver: CurrentRelationshipResolver::new(memberships),
            daily: DailyContentService::new(catalogue, image_pool, images_per_day),
            cookie_secure,
        }
    }
}
