pub mod payload;
pub mod store_service;
pub mod validator;

pub use payload::{StorePatch, StorePayload};
pub use store_service::StoreService;
pub use validator::StoreValidator;
