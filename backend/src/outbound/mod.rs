//! Outbound adapters: infrastructure the domain drives through its ports.

pub mod catalogue;
pub mod persistence;
