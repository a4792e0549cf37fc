//! Media files shown on the display page

pub mod library;

pub use library::{MediaError, MediaLibrary, MEDIA_URL_PREFIX, PLAYABLE_EXTENSIONS};
