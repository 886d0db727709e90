//! # mediabox-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for the Mediabox entities.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
