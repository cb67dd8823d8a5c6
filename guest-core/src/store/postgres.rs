//! Postgres-backed `GuestStore`.
//!
//! Ids come from the `guests` id sequence, timestamps from `NOW()`,
//! and uniqueness from the unique indexes on `email` and `phone`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use super::GuestStore;
use crate::error::StoreError;
use crate::model::{Guest, GuestChanges, NewGuest};

#[derive(Debug, Clone)]
pub struct PgGuestStore {
    pool: PgPool,
}

impl PgGuestStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map a unique-index violation onto the column it guards.
fn map_unique_violation(err: sqlx::Error) -> StoreError {
    let field = match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => match db.constraint() {
            Some("guests_email_key") => Some("email"),
            Some("guests_phone_key") => Some("phone"),
            _ => None,
        },
        _ => None,
    };
    match field {
        Some(field) => StoreError::UniqueViolation {
            field: field.to_string(),
        },
        None => StoreError::Database(err),
    }
}

#[async_trait]
impl GuestStore for PgGuestStore {
    async fn insert(&self, guest: &NewGuest) -> Result<Guest, StoreError> {
        let row = sqlx::query_as::<_, Guest>(
            r#"
            INSERT INTO guests (firstname, lastname, email, phone, country, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING id, firstname, lastname, email, phone, country, created_at, updated_at
            "#,
        )
        .bind(&guest.firstname)
        .bind(&guest.lastname)
        .bind(&guest.email)
        .bind(&guest.phone)
        .bind(&guest.country)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        info!("Created guest {}", row.id);
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Guest>, StoreError> {
        let row = sqlx::query_as::<_, Guest>(
            r#"
            SELECT id, firstname, lastname, email, phone, country, created_at, updated_at
            FROM guests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_partial(&self, id: i64, changes: &GuestChanges) -> Result<Guest, StoreError> {
        let row = sqlx::query_as::<_, Guest>(
            r#"
            UPDATE guests
            SET firstname  = COALESCE($2, firstname),
                lastname   = COALESCE($3, lastname),
                email      = COALESCE($4, email),
                phone      = COALESCE($5, phone),
                country    = CASE WHEN $6 THEN $7::varchar ELSE country END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, firstname, lastname, email, phone, country, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&changes.firstname)
        .bind(&changes.lastname)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(changes.country.is_some())
        .bind(changes.country.clone().flatten())
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        info!("Updated guest {}", row.id);
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM guests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted guest {}", id);
        }
        Ok(deleted)
    }

    async fn email_taken(&self, email: &str) -> Result<bool, StoreError> {
        let taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM guests WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(taken)
    }

    async fn phone_taken(&self, phone: &str) -> Result<bool, StoreError> {
        let taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM guests WHERE phone = $1)")
                .bind(phone)
                .fetch_one(&self.pool)
                .await?;
        Ok(taken)
    }
}
