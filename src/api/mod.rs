// src/api/mod.rs

pub mod auth;
pub mod error;
pub mod http;
pub mod types;
pub mod validation;

pub use error::{ApiError, ApiResult};
pub use http::app;
pub use types::*;
