mod aggregate;
mod error;
mod export;
mod filter;
mod gallery;
mod ids;
mod stars;

pub use aggregate::{compute_average, rounded_bucket, upsert_rating, viewer_rating};
pub use error::DomainError;
pub use export::{build_export, export_file_name, format_report, ExportArtifact};
pub use filter::{apply_filters, StarFilter, StarFilterSet};
pub use gallery::{Gallery, Photo, RatedPhoto, Rating};
pub use ids::{GalleryId, PhotoId, ViewerId};
pub use stars::Stars;
