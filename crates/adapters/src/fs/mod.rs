mod clock;
mod export;
mod identity;
mod ids;
mod resize;
mod scanner;

pub use clock::SystemClock;
pub use export::write_export;
pub use identity::FileIdentityProvider;
pub use ids::UuidIdGenerator;
pub use resize::{FsImageResizer, DEFAULT_FULL_SIZE_MAX, DEFAULT_THUMBNAIL_MAX};
pub use scanner::{is_supported_image, WalkdirUploadScanner};
