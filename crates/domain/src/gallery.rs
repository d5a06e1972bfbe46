use serde::{Deserialize, Serialize};

use crate::aggregate::{compute_average, rounded_bucket, viewer_rating};
use crate::{GalleryId, PhotoId, Stars, ViewerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "userId")]
    pub viewer_id: ViewerId,
    pub stars: Stars,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub url: String,
    pub thumbnail: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gallery {
    pub id: GalleryId,
    pub name: String,
    pub password: String,
    pub photos: Vec<Photo>,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Gallery {
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    pub fn find_photo(&self, photo_id: &PhotoId) -> Option<&Photo> {
        self.photos.iter().find(|photo| &photo.id == photo_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatedPhoto {
    pub photo: Photo,
    pub ratings: Vec<Rating>,
}

impl RatedPhoto {
    pub fn new(photo: Photo, ratings: Vec<Rating>) -> Self {
        Self { photo, ratings }
    }

    pub fn unrated(photo: Photo) -> Self {
        Self::new(photo, Vec::new())
    }

    pub fn average(&self) -> f64 {
        compute_average(&self.ratings)
    }

    pub fn rounded_bucket(&self) -> u8 {
        rounded_bucket(self.average())
    }

    pub fn vote_count(&self) -> usize {
        self.ratings.len()
    }

    pub fn rating_by(&self, viewer: &ViewerId) -> Option<Stars> {
        viewer_rating(&self.ratings, viewer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(id: &str) -> Photo {
        Photo {
            id: PhotoId::new(id).expect("id"),
            url: format!("cache/{id}.jpg"),
            thumbnail: format!("cache/{id}_thumb.jpg"),
            name: format!("{id}.jpg"),
        }
    }

    #[test]
    fn rating_uses_persisted_field_names() {
        let rating = Rating {
            viewer_id: ViewerId::new("u1").expect("id"),
            stars: Stars::new(4).expect("stars"),
            timestamp: 42,
        };
        let json = serde_json::to_string(&rating).expect("json");
        assert_eq!(json, r#"{"userId":"u1","stars":4,"timestamp":42}"#);
    }

    #[test]
    fn stored_rating_with_invalid_stars_fails_to_load() {
        let result = serde_json::from_str::<Rating>(r#"{"userId":"u1","stars":7,"timestamp":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn rated_photo_derives_average_from_its_ratings() {
        let mut rated = RatedPhoto::unrated(photo("p1"));
        assert_eq!(rated.average(), 0.0);
        assert_eq!(rated.rounded_bucket(), 0);

        rated.ratings.push(Rating {
            viewer_id: ViewerId::new("u1").expect("id"),
            stars: Stars::new(5).expect("stars"),
            timestamp: 1,
        });
        rated.ratings.push(Rating {
            viewer_id: ViewerId::new("u2").expect("id"),
            stars: Stars::new(2).expect("stars"),
            timestamp: 2,
        });
        assert_eq!(rated.average(), 3.5);
        assert_eq!(rated.rounded_bucket(), 4);
        assert_eq!(rated.vote_count(), 2);
        assert_eq!(
            rated.rating_by(&ViewerId::new("u2").expect("id")),
            Some(Stars::new(2).expect("stars"))
        );
    }

    #[test]
    fn gallery_password_is_exact_match() {
        let gallery = Gallery {
            id: GalleryId::new("g1").expect("id"),
            name: "Demo".to_string(),
            password: "secret".to_string(),
            photos: vec![photo("p1")],
            created_at: 0,
        };
        assert!(gallery.password_matches("secret"));
        assert!(!gallery.password_matches("Secret"));
        assert!(gallery
            .find_photo(&PhotoId::new("p1").expect("id"))
            .is_some());
    }
}
