use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A retail store record. `id` stays `None` until storage assigns one;
/// `updated_at` stays `None` until the first mutation.
///
/// Wire format is camelCase (`postalCode`, `isActive`, `createdAt`,
/// `updatedAt`); columns and request payloads are snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: Option<i64>,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
    pub phone: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Store {
    /// Build a fresh, unpersisted store. `created_at` is stamped here and
    /// never changes afterwards.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        address: String,
        city: String,
        country: String,
        postal_code: String,
        phone: String,
        email: String,
        is_active: bool,
    ) -> Self {
        Self {
            id: None,
            name,
            address,
            city,
            country,
            postal_code,
            phone,
            email,
            is_active,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    // Every mutator advances updated_at. No chaining.

    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.touch();
    }

    pub fn set_address(&mut self, address: String) {
        self.address = address;
        self.touch();
    }

    pub fn set_city(&mut self, city: String) {
        self.city = city;
        self.touch();
    }

    pub fn set_country(&mut self, country: String) {
        self.country = country;
        self.touch();
    }

    pub fn set_postal_code(&mut self, postal_code: String) {
        self.postal_code = postal_code;
        self.touch();
    }

    pub fn set_phone(&mut self, phone: String) {
        self.phone = phone;
        self.touch();
    }

    pub fn set_email(&mut self, email: String) {
        self.email = email;
        self.touch();
    }

    pub fn set_is_active(&mut self, is_active: bool) {
        self.is_active = is_active;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
