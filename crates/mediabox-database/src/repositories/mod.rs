//! Concrete repository implementations.

pub mod category;
pub mod media;

pub use category::CategoryRepository;
pub use media::MediaRepository;
