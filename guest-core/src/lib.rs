//! Core domain logic for the guest API.
//!
//! Everything the HTTP layer consumes lives here: the guest model and
//! request payloads, per-field validation, phone-prefix country
//! resolution, the error taxonomy, and the `GuestStore` persistence
//! seam with Postgres and in-memory backends.

pub mod country;
pub mod error;
pub mod model;
pub mod service;
pub mod store;
pub mod validation;
