//! Request middleware.
//!
//! Purpose: request lifecycle concerns such as trace-id propagation; the
//! session cookie itself is handled by `actix-session` middleware wired in
//! `main`.

pub mod trace;

pub use trace::Trace;
