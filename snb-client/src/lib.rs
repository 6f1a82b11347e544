pub mod api;
pub mod app_config;
pub mod error;

pub use api::{BackendApi, BackendClient, BookingCreated};
pub use app_config::ClientConfig;
pub use error::ApiError;
