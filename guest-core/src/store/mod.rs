//! Persistence seam for guest records.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{Guest, GuestChanges, NewGuest};

mod memory;
mod postgres;

pub use memory::MemoryGuestStore;
pub use postgres::PgGuestStore;

/// Storage contract consumed by the service layer.
///
/// The service operates exclusively through this trait, enabling
/// pluggable backends: Postgres for production, an in-memory table for
/// tests. Backends enforce email/phone uniqueness natively and report
/// violations as [`StoreError::UniqueViolation`]; the `*_taken` probes
/// only back the advisory pre-validation and are not a guard against
/// concurrent writers.
#[async_trait]
pub trait GuestStore: Send + Sync {
    /// Insert a new guest and return the stored row, id and timestamps
    /// assigned by the backend.
    async fn insert(&self, guest: &NewGuest) -> Result<Guest, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Guest>, StoreError>;

    /// Apply only the supplied fields and return the updated row. The
    /// row is expected to exist.
    async fn update_partial(&self, id: i64, changes: &GuestChanges) -> Result<Guest, StoreError>;

    /// Remove a row permanently. Returns `false` when no row with this
    /// id existed.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    async fn email_taken(&self, email: &str) -> Result<bool, StoreError>;

    async fn phone_taken(&self, phone: &str) -> Result<bool, StoreError>;
}
