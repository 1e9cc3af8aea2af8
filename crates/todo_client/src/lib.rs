pub mod api;
pub mod client_trait;
pub mod error;
pub mod utils;

pub use api::client::TodoApiClient;
pub use client_trait::TodoApi;
pub use error::{ApiError, Result};
