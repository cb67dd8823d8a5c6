//! Guest entity and operation payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A persisted guest record. Matches the `guests` table column for
/// column; `country` is derived from `phone` at write time and never
/// supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Guest {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fully validated fields for inserting a new guest, country already
/// resolved.
#[derive(Debug, Clone)]
pub struct NewGuest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub country: Option<String>,
}

/// Create payload. Every field is required by validation, but all are
/// optional here so that a missing field surfaces as a field-level
/// validation message instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateGuestRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Update payload. Fields are validated only when present, so the
/// double `Option` distinguishes "absent" (outer `None`, field left
/// untouched) from "present but null" (inner `None`, fails the
/// required rule).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGuestRequest {
    #[serde(default, deserialize_with = "present_or_null")]
    pub firstname: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub lastname: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub phone: Option<Option<String>>,
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Column subset applied by a partial update. `country` is set only
/// when `phone` was supplied; its inner option is the resolver outcome,
/// so a phone with no known prefix clears the column.
#[derive(Debug, Clone, Default)]
pub struct GuestChanges {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: Option<Option<String>>,
}
