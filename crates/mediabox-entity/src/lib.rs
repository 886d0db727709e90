//! # mediabox-entity
//!
//! Domain entity models for Mediabox. Every struct in this crate represents
//! a database table row, a write model, or a domain value object. Database
//! entities derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and
//! `sqlx::FromRow`.

pub mod category;
pub mod media;
