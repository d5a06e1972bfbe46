use std::cell::RefCell;
use std::collections::BTreeMap;

use privata_application::{ApplicationError, GalleryRepository, RatingStore};
use privata_domain::{Gallery, GalleryId, PhotoId, Rating};

#[derive(Debug, Default)]
pub struct MemoryGalleryRepository {
    galleries: RefCell<Vec<Gallery>>,
}

impl MemoryGalleryRepository {
    pub fn with_galleries(galleries: Vec<Gallery>) -> Self {
        Self {
            galleries: RefCell::new(galleries),
        }
    }
}

impl GalleryRepository for MemoryGalleryRepository {
    fn list(&self) -> Result<Vec<Gallery>, ApplicationError> {
        Ok(self.galleries.borrow().clone())
    }

    fn create(&self, gallery: &Gallery) -> Result<(), ApplicationError> {
        let mut galleries = self.galleries.borrow_mut();
        if galleries.iter().any(|existing| existing.id == gallery.id) {
            return Err(ApplicationError::InvalidInput(format!(
                "gallery {} already exists",
                gallery.id
            )));
        }
        galleries.push(gallery.clone());
        Ok(())
    }

    fn delete(&self, gallery_id: &GalleryId) -> Result<(), ApplicationError> {
        self.galleries
            .borrow_mut()
            .retain(|gallery| &gallery.id != gallery_id);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryRatingStore {
    ratings: RefCell<BTreeMap<(GalleryId, PhotoId), Vec<Rating>>>,
}

impl RatingStore for MemoryRatingStore {
    fn get(
        &self,
        gallery_id: &GalleryId,
        photo_id: &PhotoId,
    ) -> Result<Vec<Rating>, ApplicationError> {
        Ok(self
            .ratings
            .borrow()
            .get(&(gallery_id.clone(), photo_id.clone()))
            .cloned()
            .unwrap_or_default())
    }

    fn put(
        &self,
        gallery_id: &GalleryId,
        photo_id: &PhotoId,
        ratings: &[Rating],
    ) -> Result<(), ApplicationError> {
        self.ratings.borrow_mut().insert(
            (gallery_id.clone(), photo_id.clone()),
            ratings.to_vec(),
        );
        Ok(())
    }
}
