use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::services::payload::{StorePatch, StorePayload};

const MAX_NAME_LENGTH: usize = 100;
const MAX_ADDRESS_LENGTH: usize = 200;
const MAX_CITY_LENGTH: usize = 100;
const MAX_COUNTRY_LENGTH: usize = 100;
const MAX_POSTAL_CODE_LENGTH: usize = 20;

// E.164-style international phone number.
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").expect("valid phone regex"));

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Business-rule violation. `message` is user-facing; `technical` carries an
/// optional diagnostic hint for the error details block.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub technical: Option<String>,
}

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), technical: None }
    }

    fn with_technical(message: impl Into<String>, technical: impl Into<String>) -> Self {
        Self { message: message.into(), technical: Some(technical.into()) }
    }
}

/// Stateless field-level rule engine. Rules run in a fixed order (name,
/// address, city, country, postal code, phone, email) and stop at the first
/// failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreValidator;

impl StoreValidator {
    pub fn validate_full(&self, data: &StorePayload) -> Result<(), ValidationError> {
        self.validate_name(&data.name)?;
        self.validate_address(&data.address)?;
        self.validate_city(&data.city)?;
        self.validate_country(&data.country)?;
        self.validate_postal_code(&data.postal_code)?;
        self.validate_phone(&data.phone)?;
        self.validate_email(&data.email)?;
        Ok(())
    }

    /// Fields absent from the patch are never checked (and never changed).
    ///
    /// Note the asymmetry with full validation: a patched phone is only
    /// required to be non-empty, the international pattern is not enforced
    /// here. Kept for compatibility with the existing API behavior.
    pub fn validate_partial(&self, data: &StorePatch) -> Result<(), ValidationError> {
        if let Some(name) = &data.name {
            self.validate_name(name)?;
        }
        if let Some(address) = &data.address {
            self.validate_address(address)?;
        }
        if let Some(city) = &data.city {
            self.validate_city(city)?;
        }
        if let Some(country) = &data.country {
            self.validate_country(country)?;
        }
        if let Some(postal_code) = &data.postal_code {
            self.validate_postal_code(postal_code)?;
        }
        if let Some(phone) = &data.phone {
            if phone.is_empty() {
                return Err(ValidationError::new("Store phone is required"));
            }
        }
        if let Some(email) = &data.email {
            self.validate_email(email)?;
        }
        Ok(())
    }

    fn validate_name(&self, name: &str) -> Result<(), ValidationError> {
        self.validate_bounded("name", name, MAX_NAME_LENGTH)
    }

    fn validate_address(&self, address: &str) -> Result<(), ValidationError> {
        self.validate_bounded("address", address, MAX_ADDRESS_LENGTH)
    }

    fn validate_city(&self, city: &str) -> Result<(), ValidationError> {
        self.validate_bounded("city", city, MAX_CITY_LENGTH)
    }

    fn validate_country(&self, country: &str) -> Result<(), ValidationError> {
        self.validate_bounded("country", country, MAX_COUNTRY_LENGTH)
    }

    fn validate_postal_code(&self, postal_code: &str) -> Result<(), ValidationError> {
        self.validate_bounded("postal code", postal_code, MAX_POSTAL_CODE_LENGTH)
    }

    fn validate_bounded(&self, field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::new(format!("Store {} is required", field)));
        }
        if value.chars().count() > max {
            return Err(ValidationError::new(format!(
                "Store {} must not exceed {} characters",
                field, max
            )));
        }
        Ok(())
    }

    fn validate_phone(&self, phone: &str) -> Result<(), ValidationError> {
        if phone.is_empty() {
            return Err(ValidationError::new("Store phone is required"));
        }
        if !PHONE_PATTERN.is_match(phone) {
            return Err(ValidationError::with_technical(
                "Invalid phone format",
                "expected international format, e.g. +5511999999999",
            ));
        }
        Ok(())
    }

    fn validate_email(&self, email: &str) -> Result<(), ValidationError> {
        if email.is_empty() {
            return Err(ValidationError::new("Store email is required"));
        }
        if !EMAIL_PATTERN.is_match(email) {
            return Err(ValidationError::with_technical(
                "Invalid email format",
                "expected a valid address, e.g. contact@example.com",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> StorePayload {
        StorePayload {
            name: "Test Store".into(),
            address: "123 Main St".into(),
            city: "Test City".into(),
            country: "Test Country".into(),
            postal_code: "12345".into(),
            phone: "+1234567890".into(),
            email: "test@store.com".into(),
            is_active: true,
        }
    }

    #[test]
    fn accepts_valid_payload() {
        assert!(StoreValidator.validate_full(&valid_payload()).is_ok());
    }

    #[test]
    fn rejects_empty_name_first() {
        let mut payload = valid_payload();
        payload.name.clear();
        payload.email.clear();
        // Name is checked before email.
        let err = StoreValidator.validate_full(&payload).unwrap_err();
        assert_eq!(err.message, "Store name is required");
    }

    #[test]
    fn rejects_over_length_fields() {
        let cases = [
            ("name", 101, "Store name must not exceed 100 characters"),
            ("address", 201, "Store address must not exceed 200 characters"),
            ("city", 101, "Store city must not exceed 100 characters"),
            ("country", 101, "Store country must not exceed 100 characters"),
            ("postal_code", 21, "Store postal code must not exceed 20 characters"),
        ];
        for (field, len, expected) in cases {
            let mut payload = valid_payload();
            let long = "a".repeat(len);
            match field {
                "name" => payload.name = long,
                "address" => payload.address = long,
                "city" => payload.city = long,
                "country" => payload.country = long,
                "postal_code" => payload.postal_code = long,
                _ => unreachable!(),
            }
            let err = StoreValidator.validate_full(&payload).unwrap_err();
            assert_eq!(err.message, expected);
        }
    }

    #[test]
    fn rejects_bad_phone_on_full_validation() {
        let mut payload = valid_payload();
        payload.phone = "not-a-phone".into();
        let err = StoreValidator.validate_full(&payload).unwrap_err();
        assert_eq!(err.message, "Invalid phone format");
        assert!(err.technical.is_some());
    }

    #[test]
    fn rejects_bad_email() {
        let mut payload = valid_payload();
        payload.email = "not-an-email".into();
        let err = StoreValidator.validate_full(&payload).unwrap_err();
        assert_eq!(err.message, "Invalid email format");
    }

    #[test]
    fn partial_skips_absent_fields() {
        let patch = StorePatch { city: Some("Lisbon".into()), ..Default::default() };
        assert!(StoreValidator.validate_partial(&patch).is_ok());
    }

    #[test]
    fn partial_phone_only_requires_non_empty() {
        let patch = StorePatch { phone: Some("not-a-phone".into()), ..Default::default() };
        assert!(StoreValidator.validate_partial(&patch).is_ok());

        let patch = StorePatch { phone: Some(String::new()), ..Default::default() };
        let err = StoreValidator.validate_partial(&patch).unwrap_err();
        assert_eq!(err.message, "Store phone is required");
    }

    #[test]
    fn partial_email_still_checks_format() {
        let patch = StorePatch { email: Some("not-an-email".into()), ..Default::default() };
        let err = StoreValidator.validate_partial(&patch).unwrap_err();
        assert_eq!(err.message, "Invalid email format");
    }
}
