//! In-memory `GuestStore` backend.
//!
//! Mirrors the Postgres backend's semantics (sequential ids, unique
//! email/phone, storage-assigned timestamps) without a database.
//! Used by the unit and HTTP tests.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use super::GuestStore;
use crate::error::StoreError;
use crate::model::{Guest, GuestChanges, NewGuest};

#[derive(Debug, Default)]
pub struct MemoryGuestStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    rows: BTreeMap<i64, Guest>,
    last_id: i64,
}

impl MemoryGuestStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl GuestStore for MemoryGuestStore {
    async fn insert(&self, guest: &NewGuest) -> Result<Guest, StoreError> {
        let mut inner = self.lock();

        if inner.rows.values().any(|g| g.email == guest.email) {
            return Err(StoreError::UniqueViolation {
                field: "email".to_string(),
            });
        }
        if inner.rows.values().any(|g| g.phone == guest.phone) {
            return Err(StoreError::UniqueViolation {
                field: "phone".to_string(),
            });
        }

        inner.last_id += 1;
        let now = Utc::now();
        let row = Guest {
            id: inner.last_id,
            firstname: guest.firstname.clone(),
            lastname: guest.lastname.clone(),
            email: guest.email.clone(),
            phone: guest.phone.clone(),
            country: guest.country.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Guest>, StoreError> {
        Ok(self.lock().rows.get(&id).cloned())
    }

    async fn update_partial(&self, id: i64, changes: &GuestChanges) -> Result<Guest, StoreError> {
        let mut inner = self.lock();

        // Same guard the unique indexes give Postgres: other rows only,
        // the row's own current value never collides with itself.
        if let Some(email) = changes.email.as_deref() {
            if inner.rows.values().any(|g| g.id != id && g.email == email) {
                return Err(StoreError::UniqueViolation {
                    field: "email".to_string(),
                });
            }
        }
        if let Some(phone) = changes.phone.as_deref() {
            if inner.rows.values().any(|g| g.id != id && g.phone == phone) {
                return Err(StoreError::UniqueViolation {
                    field: "phone".to_string(),
                });
            }
        }

        let row = inner
            .rows
            .get_mut(&id)
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))?;

        if let Some(firstname) = &changes.firstname {
            row.firstname = firstname.clone();
        }
        if let Some(lastname) = &changes.lastname {
            row.lastname = lastname.clone();
        }
        if let Some(email) = &changes.email {
            row.email = email.clone();
        }
        if let Some(phone) = &changes.phone {
            row.phone = phone.clone();
        }
        if let Some(country) = &changes.country {
            row.country = country.clone();
        }
        row.updated_at = Utc::now();

        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.lock().rows.remove(&id).is_some())
    }

    async fn email_taken(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.lock().rows.values().any(|g| g.email == email))
    }

    async fn phone_taken(&self, phone: &str) -> Result<bool, StoreError> {
        Ok(self.lock().rows.values().any(|g| g.phone == phone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(email: &str, phone: &str) -> NewGuest {
        NewGuest {
            firstname: "Ivan".to_string(),
            lastname: "Petrov".to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            country: Some("Russia".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MemoryGuestStore::new();
        let a = store.insert(&sample("a@example.com", "+71")).await.unwrap();
        let b = store.insert(&sample("b@example.com", "+72")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_insert_enforces_unique_email_and_phone() {
        let store = MemoryGuestStore::new();
        store.insert(&sample("a@example.com", "+71")).await.unwrap();

        let err = store
            .insert(&sample("a@example.com", "+72"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { ref field } if field == "email"));

        let err = store
            .insert(&sample("b@example.com", "+71"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { ref field } if field == "phone"));
    }

    #[tokio::test]
    async fn test_update_partial_touches_only_supplied_fields() {
        let store = MemoryGuestStore::new();
        let created = store.insert(&sample("a@example.com", "+71")).await.unwrap();

        let changes = GuestChanges {
            lastname: Some("Sidorov".to_string()),
            ..GuestChanges::default()
        };
        let updated = store.update_partial(created.id, &changes).await.unwrap();
        assert_eq!(updated.lastname, "Sidorov");
        assert_eq!(updated.firstname, created.firstname);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.country, created.country);
    }

    #[tokio::test]
    async fn test_update_partial_can_clear_country() {
        let store = MemoryGuestStore::new();
        let created = store.insert(&sample("a@example.com", "+71")).await.unwrap();

        let changes = GuestChanges {
            phone: Some("9999999".to_string()),
            country: Some(None),
            ..GuestChanges::default()
        };
        let updated = store.update_partial(created.id, &changes).await.unwrap();
        assert_eq!(updated.country, None);
    }

    #[tokio::test]
    async fn test_update_partial_allows_own_values() {
        let store = MemoryGuestStore::new();
        let created = store.insert(&sample("a@example.com", "+71")).await.unwrap();

        let changes = GuestChanges {
            email: Some("a@example.com".to_string()),
            ..GuestChanges::default()
        };
        // The index-level guard only rejects collisions with other rows.
        assert!(store.update_partial(created.id, &changes).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_reports_missing_rows() {
        let store = MemoryGuestStore::new();
        let created = store.insert(&sample("a@example.com", "+71")).await.unwrap();

        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
        assert_eq!(store.find_by_id(created.id).await.unwrap(), None);
    }
}
