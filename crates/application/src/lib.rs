mod error;
mod ports;
mod service;
mod session;
mod use_cases;

pub use error::ApplicationError;
pub use ports::{
    Clock, GalleryRepository, IdGenerator, IdentityProvider, ImageResizer, RatingStore,
    ResizedImage, Upload, UploadScanner,
};
pub use service::{GalleryService, ServicePorts, DEFAULT_ADMIN_PASSWORD};
pub use session::{GallerySession, Role, SessionController, User, View};
pub use use_cases::{
    CreateGalleryCommand, DashboardStats, DashboardStatsQuery, DeleteGalleryCommand,
    ExportRatingsCommand, ListGalleriesQuery, LoginCommand, LoginOutcome, OpenGalleryCommand,
    RatePhotoCommand,
};
