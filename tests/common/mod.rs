use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use store_api::auth::AuthGate;
use store_api::database::filter::{SortDirection, StoreField, StoreFilter};
use store_api::database::store_repository::{RepositoryError, StoreRepository};
use store_api::domain::Store;
use store_api::routes::{app, AppState};
use store_api::services::StoreService;

pub const TOKEN: &str = "test-token";

/// In-memory stand-in for the Postgres repository, honoring the same
/// contract: whitelist-checked filters, storage-assigned ids, update-time
/// stamping, and re-read-after-write semantics.
#[derive(Default)]
pub struct InMemoryStoreRepository {
    rows: Mutex<HashMap<i64, Store>>,
    next_id: AtomicI64,
}

#[async_trait]
impl StoreRepository for InMemoryStoreRepository {
    async fn find_by_id(&self, id: i64) -> Result<Store, RepositoryError> {
        self.rows
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn find_all(
        &self,
        filters: &[(String, Value)],
        sort: &[(String, SortDirection)],
    ) -> Result<Vec<Store>, RepositoryError> {
        let filter = StoreFilter::new(filters, sort)?;

        let mut stores: Vec<Store> = self.rows.lock().unwrap().values().cloned().collect();
        stores.retain(|store| {
            filter
                .filters()
                .iter()
                .all(|(field, value)| field_matches(store, *field, value))
        });

        // Multi-key ordering: stable-sort by each key from last to first.
        stores.sort_by_key(|store| store.id);
        for (field, direction) in filter.sort().iter().rev() {
            stores.sort_by(|a, b| {
                let ord = compare_field(a, b, *field);
                match direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        Ok(stores)
    }

    async fn save(&self, store: &Store) -> Result<Store, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let mut stored = store.clone();
        match store.id {
            None => {
                let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst) + 1;
                stored.id = Some(id);
                rows.insert(id, stored.clone());
            }
            Some(id) => {
                stored.updated_at = Some(Utc::now());
                rows.insert(id, stored.clone());
            }
        }
        Ok(stored)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn exists(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.rows.lock().unwrap().contains_key(&id))
    }
}

fn field_matches(store: &Store, field: StoreField, value: &Value) -> bool {
    match field {
        StoreField::Id => value.as_i64() == store.id,
        StoreField::Name => value.as_str() == Some(store.name.as_str()),
        StoreField::Address => value.as_str() == Some(store.address.as_str()),
        StoreField::City => value.as_str() == Some(store.city.as_str()),
        StoreField::Country => value.as_str() == Some(store.country.as_str()),
        StoreField::PostalCode => value.as_str() == Some(store.postal_code.as_str()),
        StoreField::Phone => value.as_str() == Some(store.phone.as_str()),
        StoreField::Email => value.as_str() == Some(store.email.as_str()),
        StoreField::IsActive => value.as_bool() == Some(store.is_active),
        StoreField::CreatedAt => value.as_str() == Some(store.created_at.to_rfc3339().as_str()),
        StoreField::UpdatedAt => {
            value.as_str() == store.updated_at.map(|t| t.to_rfc3339()).as_deref()
        }
    }
}

fn compare_field(a: &Store, b: &Store, field: StoreField) -> Ordering {
    match field {
        StoreField::Id => a.id.cmp(&b.id),
        StoreField::Name => a.name.cmp(&b.name),
        StoreField::Address => a.address.cmp(&b.address),
        StoreField::City => a.city.cmp(&b.city),
        StoreField::Country => a.country.cmp(&b.country),
        StoreField::PostalCode => a.postal_code.cmp(&b.postal_code),
        StoreField::Phone => a.phone.cmp(&b.phone),
        StoreField::Email => a.email.cmp(&b.email),
        StoreField::IsActive => a.is_active.cmp(&b.is_active),
        StoreField::CreatedAt => a.created_at.cmp(&b.created_at),
        StoreField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

/// A fresh app over an empty in-memory repository. The pool is lazy and
/// never connects; only the /health route would touch it.
pub fn test_app() -> Router {
    let repository = Arc::new(InMemoryStoreRepository::default());
    let service = StoreService::new(repository);
    let auth = AuthGate::new(TOKEN);
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .expect("lazy pool");
    app(AppState { service, auth, pool })
}

pub fn bearer() -> String {
    format!("Bearer {}", TOKEN)
}

/// Build a request; `auth` is the verbatim Authorization header value, if any.
pub fn request(method: &str, uri: &str, auth: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Build a request with a raw (possibly malformed) body.
pub fn raw_request(method: &str, uri: &str, auth: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Run one request through the router and decode the envelope (Null for an
/// empty body, e.g. 204).
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("infallible router");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}
