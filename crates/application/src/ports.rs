use std::path::{Path, PathBuf};

use privata_domain::{Gallery, GalleryId, PhotoId, Rating, ViewerId};

use crate::ApplicationError;

pub trait GalleryRepository {
    fn list(&self) -> Result<Vec<Gallery>, ApplicationError>;

    fn create(&self, gallery: &Gallery) -> Result<(), ApplicationError>;

    fn delete(&self, gallery_id: &GalleryId) -> Result<(), ApplicationError>;

    fn find(&self, gallery_id: &GalleryId) -> Result<Option<Gallery>, ApplicationError> {
        Ok(self
            .list()?
            .into_iter()
            .find(|gallery| &gallery.id == gallery_id))
    }
}

pub trait RatingStore {
    fn get(&self, gallery_id: &GalleryId, photo_id: &PhotoId)
        -> Result<Vec<Rating>, ApplicationError>;

    fn put(
        &self,
        gallery_id: &GalleryId,
        photo_id: &PhotoId,
        ratings: &[Rating],
    ) -> Result<(), ApplicationError>;
}

pub trait Clock {
    fn now_millis(&self) -> i64;

    fn now_display(&self) -> String;
}

pub trait IdGenerator {
    fn next_id(&self) -> String;
}

pub trait IdentityProvider {
    fn viewer_id(&self) -> Result<ViewerId, ApplicationError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizedImage {
    pub url: String,
    pub thumbnail: String,
}

pub trait ImageResizer {
    fn resize(
        &self,
        source: &Path,
        gallery_id: &GalleryId,
        photo_id: &PhotoId,
    ) -> Result<ResizedImage, ApplicationError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub path: PathBuf,
    pub name: String,
}

pub trait UploadScanner {
    fn scan(&self, inputs: &[PathBuf]) -> Result<Vec<Upload>, ApplicationError>;
}
