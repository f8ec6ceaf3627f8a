//! Utilities

pub mod error;
pub mod logger;
pub mod time;

pub use error::{AppError, AppResponse};

/// Application-level Result type, used in HTTP handlers and services
pub type AppResult<T> = Result<T, AppError>;
