//! Media asset domain entities.

pub mod file;
pub mod model;
pub mod params;
pub mod slug;
pub mod status;
pub mod validate;

pub use file::UploadedFile;
pub use model::{DEFAULT_CATEGORY_ID, Media, MediaInput, MediaWrite};
pub use params::{MediaParams, ParamsError, ParamsInput};
pub use status::MediaStatus;
pub use validate::{ValidationCode, ValidationErrors, ValidationIssue};
