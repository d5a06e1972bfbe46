use privata_domain::{
    apply_filters, Gallery, GalleryId, PhotoId, RatedPhoto, StarFilter, StarFilterSet, Stars,
};

use crate::{ApplicationError, LoginOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Admin,
    Gallery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Viewer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub role: Role,
    pub gallery_id: Option<GalleryId>,
}

#[derive(Debug, Clone)]
pub struct SessionController {
    view: View,
    user: Option<User>,
    selected: Option<GalleryId>,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            view: View::Login,
            user: None,
            selected: None,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn selected_gallery(&self) -> Option<&GalleryId> {
        self.selected.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self.user,
            Some(User {
                role: Role::Admin,
                ..
            })
        )
    }

    pub fn handle_login(&mut self, outcome: &LoginOutcome) -> Option<String> {
        match outcome {
            LoginOutcome::Admin => {
                self.user = Some(User {
                    role: Role::Admin,
                    gallery_id: None,
                });
                self.selected = None;
                self.view = View::Admin;
                None
            }
            LoginOutcome::Viewer { gallery } => {
                self.user = Some(User {
                    role: Role::Viewer,
                    gallery_id: Some(gallery.id.clone()),
                });
                self.selected = Some(gallery.id.clone());
                self.view = View::Gallery;
                None
            }
            LoginOutcome::Rejected { message } => Some(message.clone()),
        }
    }

    pub fn view_gallery(&mut self, gallery_id: GalleryId) -> Result<(), ApplicationError> {
        match &self.user {
            Some(User {
                role: Role::Admin, ..
            }) => {}
            Some(User {
                role: Role::Viewer,
                gallery_id: Some(own),
            }) if own == &gallery_id => {}
            Some(_) => {
                return Err(ApplicationError::InvalidInput(format!(
                    "viewer is not unlocked for gallery {gallery_id}"
                )))
            }
            None => {
                return Err(ApplicationError::InvalidInput(
                    "log in before opening a gallery".to_string(),
                ))
            }
        }
        self.selected = Some(gallery_id);
        self.view = View::Gallery;
        Ok(())
    }

    /// Leaves the gallery view: admins return to the dashboard, viewers are
    /// sent back to the login screen.
    pub fn back(&mut self) {
        if self.view != View::Gallery {
            return;
        }
        if self.is_admin() {
            self.selected = None;
            self.view = View::Admin;
        } else {
            self.logout();
        }
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.selected = None;
        self.view = View::Login;
    }
}

#[derive(Debug, Clone)]
pub struct GallerySession {
    gallery_id: GalleryId,
    gallery_name: String,
    photos: Vec<RatedPhoto>,
    filters: StarFilterSet,
}

impl GallerySession {
    pub fn new(gallery: &Gallery, photos: Vec<RatedPhoto>) -> Self {
        Self {
            gallery_id: gallery.id.clone(),
            gallery_name: gallery.name.clone(),
            photos,
            filters: StarFilterSet::default(),
        }
    }

    pub fn gallery_id(&self) -> &GalleryId {
        &self.gallery_id
    }

    pub fn gallery_name(&self) -> &str {
        &self.gallery_name
    }

    pub fn photos(&self) -> &[RatedPhoto] {
        &self.photos
    }

    pub fn find_photo(&self, photo_id: &PhotoId) -> Option<&RatedPhoto> {
        self.photos.iter().find(|rated| &rated.photo.id == photo_id)
    }

    pub fn filters(&self) -> Vec<StarFilter> {
        self.filters.filters()
    }

    pub fn filter_set(&self) -> &StarFilterSet {
        &self.filters
    }

    pub fn toggle_filter(&mut self, stars: Stars) {
        self.filters.toggle(stars);
    }

    pub fn set_filter(&mut self, stars: Stars, active: bool) {
        self.filters.set(stars, active);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn visible(&self) -> Vec<RatedPhoto> {
        apply_filters(&self.photos, &self.filters)
    }

    pub fn replace(&mut self, rated: RatedPhoto) -> bool {
        match self
            .photos
            .iter_mut()
            .find(|existing| existing.photo.id == rated.photo.id)
        {
            Some(slot) => {
                *slot = rated;
                true
            }
            None => false,
        }
    }

    pub fn counts(&self) -> (usize, usize) {
        (self.visible().len(), self.photos.len())
    }
}

#[cfg(test)]
mod tests {
    use privata_domain::{Photo, Rating, ViewerId};

    use super::*;

    fn gallery() -> Gallery {
        Gallery {
            id: GalleryId::new("g1").expect("id"),
            name: "Demo".to_string(),
            password: "pw".to_string(),
            photos: vec![],
            created_at: 0,
        }
    }

    fn rated(id: &str, votes: &[i64]) -> RatedPhoto {
        RatedPhoto::new(
            Photo {
                id: PhotoId::new(id).expect("id"),
                url: String::new(),
                thumbnail: String::new(),
                name: id.to_string(),
            },
            votes
                .iter()
                .enumerate()
                .map(|(index, value)| Rating {
                    viewer_id: ViewerId::new(format!("v{index}")).expect("viewer"),
                    stars: Stars::new(*value).expect("stars"),
                    timestamp: 0,
                })
                .collect(),
        )
    }

    #[test]
    fn admin_login_routes_to_dashboard_and_back() {
        let mut session = SessionController::new();
        assert_eq!(session.view(), View::Login);

        assert_eq!(session.handle_login(&LoginOutcome::Admin), None);
        assert_eq!(session.view(), View::Admin);

        session
            .view_gallery(GalleryId::new("g1").expect("id"))
            .expect("admin may open any gallery");
        assert_eq!(session.view(), View::Gallery);

        session.back();
        assert_eq!(session.view(), View::Admin);
        assert!(session.selected_gallery().is_none());

        session.logout();
        assert_eq!(session.view(), View::Login);
        assert!(session.user().is_none());
    }

    #[test]
    fn viewer_login_opens_their_gallery_only() {
        let mut session = SessionController::new();
        session.handle_login(&LoginOutcome::Viewer { gallery: gallery() });
        assert_eq!(session.view(), View::Gallery);
        assert_eq!(session.selected_gallery().map(GalleryId::as_str), Some("g1"));

        let other = session.view_gallery(GalleryId::new("g2").expect("id"));
        assert!(matches!(other, Err(ApplicationError::InvalidInput(_))));

        session.back();
        assert_eq!(session.view(), View::Login);
    }

    #[test]
    fn rejected_login_keeps_login_view() {
        let mut session = SessionController::new();
        let message = session.handle_login(&LoginOutcome::Rejected {
            message: "Invalid gallery password".to_string(),
        });
        assert_eq!(message.as_deref(), Some("Invalid gallery password"));
        assert_eq!(session.view(), View::Login);
        assert!(session
            .view_gallery(GalleryId::new("g1").expect("id"))
            .is_err());
    }

    #[test]
    fn gallery_session_filters_and_counts() {
        let mut session = GallerySession::new(
            &gallery(),
            vec![rated("a", &[5]), rated("b", &[]), rated("c", &[3, 4])],
        );
        assert_eq!(session.counts(), (3, 3));

        session.toggle_filter(Stars::new(4).expect("stars"));
        let visible: Vec<String> = session
            .visible()
            .iter()
            .map(|rated| rated.photo.id.to_string())
            .collect();
        assert_eq!(visible, vec!["c"]);
        assert_eq!(session.counts(), (1, 3));

        session.clear_filters();
        assert_eq!(session.counts(), (3, 3));
    }

    #[test]
    fn replace_updates_the_matching_photo() {
        let mut session = GallerySession::new(&gallery(), vec![rated("a", &[])]);
        assert!(session.replace(rated("a", &[2])));
        assert_eq!(
            session
                .find_photo(&PhotoId::new("a").expect("id"))
                .map(RatedPhoto::average),
            Some(2.0)
        );
        assert!(!session.replace(rated("zzz", &[1])));
    }
}
