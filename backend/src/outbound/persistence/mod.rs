//! Outbound persistence adapters backed by Diesel and PostgreSQL.

pub mod diesel_membership_repository;
pub mod diesel_user_repository;
pub(crate) mod models;
pub mod pool;
pub mod schema;

pub use diesel_membership_repository::DieselMembershipRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
