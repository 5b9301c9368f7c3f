use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::database::filter::SortDirection;
use crate::database::store_repository::{RepositoryError, StoreRepository};
use crate::domain::Store;
use crate::services::payload::{StorePatch, StorePayload};
use crate::services::validator::{StoreValidator, ValidationError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Store with ID {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Orchestrates validation and persistence; the sole authority on the
/// "not found" vs "invalid" distinction for callers.
#[derive(Clone)]
pub struct StoreService {
    repository: Arc<dyn StoreRepository>,
    validator: StoreValidator,
}

impl StoreService {
    pub fn new(repository: Arc<dyn StoreRepository>) -> Self {
        Self { repository, validator: StoreValidator }
    }

    pub async fn get_store(&self, id: i64) -> Result<Store, ServiceError> {
        match self.repository.find_by_id(id).await {
            Ok(store) => Ok(store),
            Err(RepositoryError::NotFound(_)) => Err(ServiceError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Passes filters and sort through unmodified; the repository whitelist
    /// is the only gate.
    pub async fn list_stores(
        &self,
        filters: Vec<(String, Value)>,
        sort: Vec<(String, SortDirection)>,
    ) -> Result<Vec<Store>, ServiceError> {
        Ok(self.repository.find_all(&filters, &sort).await?)
    }

    pub async fn create_store(&self, payload: StorePayload) -> Result<Store, ServiceError> {
        self.validator.validate_full(&payload)?;

        let store = Store::new(
            payload.name,
            payload.address,
            payload.city,
            payload.country,
            payload.postal_code,
            payload.phone,
            payload.email,
            payload.is_active,
        );
        tracing::debug!(email = %store.email, "creating store");

        Ok(self.repository.save(&store).await?)
    }

    /// Full replace: every field is overwritten, even if unchanged.
    pub async fn update_store(&self, id: i64, payload: StorePayload) -> Result<Store, ServiceError> {
        let mut store = self.get_store(id).await?;
        self.validator.validate_full(&payload)?;

        store.set_name(payload.name);
        store.set_address(payload.address);
        store.set_city(payload.city);
        store.set_country(payload.country);
        store.set_postal_code(payload.postal_code);
        store.set_phone(payload.phone);
        store.set_email(payload.email);
        store.set_is_active(payload.is_active);

        Ok(self.repository.save(&store).await?)
    }

    /// Validates and applies only the supplied fields.
    pub async fn patch_store(&self, id: i64, patch: StorePatch) -> Result<Store, ServiceError> {
        let mut store = self.get_store(id).await?;
        self.validator.validate_partial(&patch)?;

        if let Some(name) = patch.name {
            store.set_name(name);
        }
        if let Some(address) = patch.address {
            store.set_address(address);
        }
        if let Some(city) = patch.city {
            store.set_city(city);
        }
        if let Some(country) = patch.country {
            store.set_country(country);
        }
        if let Some(postal_code) = patch.postal_code {
            store.set_postal_code(postal_code);
        }
        if let Some(phone) = patch.phone {
            store.set_phone(phone);
        }
        if let Some(email) = patch.email {
            store.set_email(email);
        }
        if let Some(is_active) = patch.is_active {
            store.set_is_active(is_active);
        }

        Ok(self.repository.save(&store).await?)
    }

    /// Existence is checked first so an absent id fails "not found" here,
    /// even though the repository's delete itself never errors on absence.
    pub async fn delete_store(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repository.exists(id).await? {
            return Err(ServiceError::NotFound(id));
        }
        self.repository.delete(id).await?;
        Ok(())
    }
}
