//! # mediabox-service
//!
//! Business logic for the media module: write orchestration (validation,
//! params normalization, slug assignment, upload placement, persistence),
//! read-side URL resolution, category/status label lists, and the optional
//! identity capability.

pub mod context;
pub mod identity;
pub mod media;

pub use context::RequestContext;
pub use identity::{Attribution, Identity, IdentityProvider};
pub use media::service::{LoadedMedia, MediaService, SaveError};
