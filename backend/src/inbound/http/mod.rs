//! HTTP inbound adapter exposing REST endpoints.

pub mod daily;
pub mod error;
pub mod health;
pub mod relationship_cookie;
pub mod relationships;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
