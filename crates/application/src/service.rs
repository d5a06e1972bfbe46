use privata_domain::{
    build_export, upsert_rating, ExportArtifact, Gallery, GalleryId, Photo, PhotoId, RatedPhoto,
    Rating, Stars,
};
use tracing::{debug, info, warn};

use crate::{
    ApplicationError, Clock, CreateGalleryCommand, DashboardStats, DashboardStatsQuery,
    DeleteGalleryCommand, ExportRatingsCommand, GalleryRepository, GallerySession, IdGenerator,
    ImageResizer, ListGalleriesQuery, LoginCommand, LoginOutcome, OpenGalleryCommand,
    RatePhotoCommand, RatingStore, UploadScanner,
};

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

pub struct ServicePorts {
    pub galleries: Box<dyn GalleryRepository>,
    pub ratings: Box<dyn RatingStore>,
    pub scanner: Box<dyn UploadScanner>,
    pub resizer: Box<dyn ImageResizer>,
    pub ids: Box<dyn IdGenerator>,
    pub clock: Box<dyn Clock>,
}

pub struct GalleryService {
    galleries: Box<dyn GalleryRepository>,
    ratings: Box<dyn RatingStore>,
    scanner: Box<dyn UploadScanner>,
    resizer: Box<dyn ImageResizer>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    admin_password: String,
}

impl GalleryService {
    pub fn new(ports: ServicePorts, admin_password: impl Into<String>) -> Self {
        Self {
            galleries: ports.galleries,
            ratings: ports.ratings,
            scanner: ports.scanner,
            resizer: ports.resizer,
            ids: ports.ids,
            clock: ports.clock,
            admin_password: admin_password.into(),
        }
    }

    pub fn list_galleries(&self, _query: ListGalleriesQuery) -> Vec<Gallery> {
        self.galleries.list().unwrap_or_else(|error| {
            warn!(%error, "failed to load galleries, continuing with none");
            Vec::new()
        })
    }

    pub fn create_gallery(
        &self,
        command: CreateGalleryCommand,
    ) -> Result<Gallery, ApplicationError> {
        let name = command.name.trim();
        let password = command.password.trim();
        if name.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "gallery name must not be empty".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "gallery password must not be empty".to_string(),
            ));
        }
        if command.uploads.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "at least one photo is required".to_string(),
            ));
        }

        let uploads = self.scanner.scan(&command.uploads)?;
        if uploads.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "no supported images found in uploads".to_string(),
            ));
        }

        let gallery_id = GalleryId::new(self.ids.next_id())?;
        let mut photos = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let photo_id = PhotoId::new(self.ids.next_id())?;
            debug!(file = %upload.path.display(), photo = %photo_id, "resizing upload");
            let resized = self
                .resizer
                .resize(&upload.path, &gallery_id, &photo_id)
                .map_err(|error| {
                    warn!(%error, file = %upload.path.display(), "gallery creation aborted");
                    error
                })?;
            photos.push(Photo {
                id: photo_id,
                url: resized.url,
                thumbnail: resized.thumbnail,
                name: upload.name,
            });
        }

        let gallery = Gallery {
            id: gallery_id,
            name: name.to_string(),
            password: password.to_string(),
            photos,
            created_at: self.clock.now_millis(),
        };

        if let Err(error) = self.galleries.create(&gallery) {
            warn!(%error, gallery = %gallery.id, "failed to save gallery");
        }
        info!(gallery = %gallery.id, photos = gallery.photos.len(), "gallery created");
        Ok(gallery)
    }

    pub fn delete_gallery(&self, command: DeleteGalleryCommand) -> Result<(), ApplicationError> {
        self.require_gallery(&command.gallery_id)?;
        if let Err(error) = self.galleries.delete(&command.gallery_id) {
            warn!(%error, gallery = %command.gallery_id, "failed to save galleries after delete");
        }
        info!(gallery = %command.gallery_id, "gallery deleted");
        Ok(())
    }

    pub fn login(&self, command: LoginCommand) -> LoginOutcome {
        match command {
            LoginCommand::Admin { password } => {
                if password == self.admin_password {
                    LoginOutcome::Admin
                } else {
                    rejected("Invalid admin password")
                }
            }
            LoginCommand::Viewer {
                gallery_id,
                password,
            } => {
                let gallery = gallery_id.and_then(|id| {
                    self.list_galleries(ListGalleriesQuery)
                        .into_iter()
                        .find(|gallery| gallery.id == id)
                });
                match gallery {
                    None => rejected("Please select a gallery"),
                    Some(gallery) if gallery.password_matches(&password) => {
                        LoginOutcome::Viewer { gallery }
                    }
                    Some(_) => rejected("Invalid gallery password"),
                }
            }
        }
    }

    pub fn open_gallery(
        &self,
        command: OpenGalleryCommand,
    ) -> Result<GallerySession, ApplicationError> {
        let gallery = self.require_gallery(&command.gallery_id)?;
        let photos = gallery
            .photos
            .iter()
            .map(|photo| self.rated_photo(&gallery.id, photo))
            .collect();
        Ok(GallerySession::new(&gallery, photos))
    }

    pub fn rate_photo(&self, command: RatePhotoCommand) -> Result<RatedPhoto, ApplicationError> {
        let stars = Stars::new(command.stars)?;
        let gallery = self.require_gallery(&command.gallery_id)?;
        let photo = gallery.find_photo(&command.photo_id).ok_or_else(|| {
            ApplicationError::NotFound(format!(
                "photo {} in gallery {}",
                command.photo_id, command.gallery_id
            ))
        })?;

        let current = self.load_ratings(&gallery.id, &photo.id);
        let updated = upsert_rating(
            &current,
            &command.viewer_id,
            stars,
            self.clock.now_millis(),
        );
        if let Err(error) = self.ratings.put(&gallery.id, &photo.id, &updated) {
            warn!(%error, gallery = %gallery.id, photo = %photo.id, "failed to save rating");
        }
        debug!(photo = %photo.id, viewer = %command.viewer_id, %stars, "rating saved");

        Ok(RatedPhoto::new(photo.clone(), updated))
    }

    pub fn export_ratings(
        &self,
        command: ExportRatingsCommand,
    ) -> Result<ExportArtifact, ApplicationError> {
        let session = self.open_gallery(OpenGalleryCommand {
            gallery_id: command.gallery_id,
        })?;
        let artifact = build_export(
            session.gallery_name(),
            &self.clock.now_display(),
            session.photos(),
        );
        info!(file = %artifact.file_name, "ratings exported");
        Ok(artifact)
    }

    pub fn dashboard_stats(&self, _query: DashboardStatsQuery) -> DashboardStats {
        let galleries = self.list_galleries(ListGalleriesQuery);
        let mut stats = DashboardStats {
            total_galleries: galleries.len(),
            ..DashboardStats::default()
        };
        for gallery in &galleries {
            stats.total_photos += gallery.photos.len();
            stats.total_ratings += gallery
                .photos
                .iter()
                .map(|photo| self.load_ratings(&gallery.id, &photo.id).len())
                .sum::<usize>();
        }
        stats
    }

    fn require_gallery(&self, gallery_id: &GalleryId) -> Result<Gallery, ApplicationError> {
        self.galleries
            .find(gallery_id)?
            .ok_or_else(|| ApplicationError::NotFound(format!("gallery {gallery_id}")))
    }

    fn rated_photo(&self, gallery_id: &GalleryId, photo: &Photo) -> RatedPhoto {
        RatedPhoto::new(photo.clone(), self.load_ratings(gallery_id, &photo.id))
    }

    fn load_ratings(&self, gallery_id: &GalleryId, photo_id: &PhotoId) -> Vec<Rating> {
        self.ratings.get(gallery_id, photo_id).unwrap_or_else(|error| {
            warn!(%error, gallery = %gallery_id, photo = %photo_id, "failed to load ratings");
            Vec::new()
        })
    }
}

fn rejected(message: &str) -> LoginOutcome {
    LoginOutcome::Rejected {
        message: message.to_string(),
    }
}
