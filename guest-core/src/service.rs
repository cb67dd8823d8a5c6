//! CRUD orchestration for guest records.
//!
//! Each operation validates fully before any mutation, derives the
//! `country` column from the phone prefix on writes that carry a phone,
//! and persists through the [`GuestStore`] seam.

use std::sync::Arc;

use tracing::info;

use crate::country::resolve_country;
use crate::error::GuestError;
use crate::model::{CreateGuestRequest, Guest, GuestChanges, NewGuest, UpdateGuestRequest};
use crate::store::GuestStore;
use crate::validation::{self, ValidationErrors};

#[derive(Clone)]
pub struct GuestService {
    store: Arc<dyn GuestStore>,
}

impl GuestService {
    pub fn new(store: Arc<dyn GuestStore>) -> Self {
        Self { store }
    }

    /// Validate all four fields, resolve the country and insert.
    pub async fn create(&self, req: CreateGuestRequest) -> Result<Guest, GuestError> {
        let mut errors = ValidationErrors::new();
        validation::check_name("firstname", req.firstname.as_deref(), &mut errors);
        validation::check_name("lastname", req.lastname.as_deref(), &mut errors);
        validation::check_email("email", req.email.as_deref(), &mut errors);
        validation::check_required("phone", req.phone.as_deref(), &mut errors);

        // Advisory pre-checks; the unique indexes remain the
        // authoritative guard under concurrent writes.
        if let Some(email) = non_empty(req.email.as_deref()) {
            if self.store.email_taken(email).await? {
                errors.add("email", validation::taken_message("email"));
            }
        }
        if let Some(phone) = non_empty(req.phone.as_deref()) {
            if self.store.phone_taken(phone).await? {
                errors.add("phone", validation::taken_message("phone"));
            }
        }

        let (Some(firstname), Some(lastname), Some(email), Some(phone)) =
            (req.firstname, req.lastname, req.email, req.phone)
        else {
            // A missing field always leaves a required message behind.
            return Err(GuestError::Validation(errors));
        };
        if !errors.is_empty() {
            return Err(GuestError::Validation(errors));
        }

        let country = resolve_country(&phone).map(str::to_string);
        let guest = self
            .store
            .insert(&NewGuest {
                firstname,
                lastname,
                email,
                phone,
                country,
            })
            .await?;

        info!("Stored new guest {}", guest.id);
        Ok(guest)
    }

    pub async fn fetch(&self, id: i64) -> Result<Guest, GuestError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(GuestError::NotFound)
    }

    /// Validate the supplied fields only, recompute the country when a
    /// phone is among them, and persist the partial change set.
    ///
    /// Existence is checked before payload validation, and uniqueness
    /// checks do not exclude the row being updated: setting a guest's
    /// email or phone to its own current value fails the same way a
    /// collision with another row does.
    pub async fn update(&self, id: i64, req: UpdateGuestRequest) -> Result<Guest, GuestError> {
        let Some(existing) = self.store.find_by_id(id).await? else {
            return Err(GuestError::NotFound);
        };

        let mut errors = ValidationErrors::new();
        if let Some(firstname) = &req.firstname {
            validation::check_name("firstname", firstname.as_deref(), &mut errors);
        }
        if let Some(lastname) = &req.lastname {
            validation::check_name("lastname", lastname.as_deref(), &mut errors);
        }
        if let Some(email) = &req.email {
            validation::check_email("email", email.as_deref(), &mut errors);
            if let Some(email) = non_empty(email.as_deref()) {
                if self.store.email_taken(email).await? {
                    errors.add("email", validation::taken_message("email"));
                }
            }
        }
        if let Some(phone) = &req.phone {
            validation::check_required("phone", phone.as_deref(), &mut errors);
            if let Some(phone) = non_empty(phone.as_deref()) {
                if self.store.phone_taken(phone).await? {
                    errors.add("phone", validation::taken_message("phone"));
                }
            }
        }
        if !errors.is_empty() {
            return Err(GuestError::Validation(errors));
        }

        let mut changes = GuestChanges {
            firstname: req.firstname.flatten(),
            lastname: req.lastname.flatten(),
            email: req.email.flatten(),
            phone: req.phone.flatten(),
            country: None,
        };
        if changes.firstname.is_none()
            && changes.lastname.is_none()
            && changes.email.is_none()
            && changes.phone.is_none()
        {
            // Nothing supplied, nothing to write.
            return Ok(existing);
        }
        if let Some(phone) = changes.phone.as_deref() {
            changes.country = Some(resolve_country(phone).map(str::to_string));
        }

        let guest = self.store.update_partial(id, &changes).await?;
        info!("Applied partial update to guest {}", guest.id);
        Ok(guest)
    }

    pub async fn delete(&self, id: i64) -> Result<(), GuestError> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(GuestError::NotFound);
        }

        if !self.store.delete(id).await? {
            return Err(GuestError::NotFound);
        }
        info!("Removed guest {}", id);
        Ok(())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
