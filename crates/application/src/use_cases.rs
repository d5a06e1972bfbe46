use std::path::PathBuf;

use privata_domain::{Gallery, GalleryId, PhotoId, ViewerId};

#[derive(Debug, Clone, Default)]
pub struct ListGalleriesQuery;

#[derive(Debug, Clone)]
pub struct CreateGalleryCommand {
    pub name: String,
    pub password: String,
    pub uploads: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct DeleteGalleryCommand {
    pub gallery_id: GalleryId,
}

#[derive(Debug, Clone)]
pub enum LoginCommand {
    Admin {
        password: String,
    },
    Viewer {
        gallery_id: Option<GalleryId>,
        password: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Admin,
    Viewer { gallery: Gallery },
    Rejected { message: String },
}

#[derive(Debug, Clone)]
pub struct OpenGalleryCommand {
    pub gallery_id: GalleryId,
}

#[derive(Debug, Clone)]
pub struct RatePhotoCommand {
    pub gallery_id: GalleryId,
    pub photo_id: PhotoId,
    pub viewer_id: ViewerId,
    pub stars: i64,
}

#[derive(Debug, Clone)]
pub struct ExportRatingsCommand {
    pub gallery_id: GalleryId,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardStatsQuery;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_galleries: usize,
    pub total_photos: usize,
    pub total_ratings: usize,
}
