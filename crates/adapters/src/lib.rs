pub mod fs;
pub mod memory;
pub mod migrations;
pub mod presenters;
pub mod sqlite;

pub use fs::{
    write_export, FileIdentityProvider, FsImageResizer, SystemClock, UuidIdGenerator,
    WalkdirUploadScanner,
};
pub use memory::{MemoryGalleryRepository, MemoryRatingStore};
pub use presenters::{
    present_dashboard, present_filters, present_gallery_heading, present_gallery_row,
    present_photo_row,
};
pub use sqlite::{SqliteGalleryRepository, SqliteRatingStore, SqliteStore};
