//! # mediabox-core
//!
//! Core crate for Mediabox. Contains configuration schemas, shared types,
//! the localization seam, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Mediabox crates.

pub mod config;
pub mod error;
pub mod i18n;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
