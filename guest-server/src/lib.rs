//! HTTP surface for the guest API: configuration and the axum router.
//!
//! The binary in `main.rs` wires these to a Postgres-backed store; the
//! integration tests drive the same router over the in-memory store.

pub mod config;
pub mod router;
