mod queries;

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use privata_application::{ApplicationError, GalleryRepository, RatingStore};
use privata_domain::{Gallery, GalleryId, PhotoId, Rating};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::migrations::MIGRATIONS;

pub const GALLERIES_KEY: &str = "privata_galleries";
pub const RATINGS_KEY: &str = "privata_ratings";

type RatingTable = BTreeMap<GalleryId, BTreeMap<PhotoId, Vec<Rating>>>;

#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn initialize(&self) -> Result<(), ApplicationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "data path must not be empty".to_string(),
            ));
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|error| ApplicationError::Io(error.to_string()))?;
            }
        }

        let conn = self.open_connection()?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;

        for migration in MIGRATIONS {
            conn.execute_batch(migration)
                .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        }

        Ok(())
    }

    fn open_connection(&self) -> Result<Connection, ApplicationError> {
        Connection::open(&self.path)
            .map_err(|error| ApplicationError::Persistence(error.to_string()))
    }

    fn read_raw(&self, key: &str) -> Result<Option<String>, ApplicationError> {
        let conn = self.open_connection()?;
        queries::read_record(&conn, key)
            .map_err(|error| ApplicationError::Persistence(error.to_string()))
    }

    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, ApplicationError> {
        let Some(raw) = self.read_raw(key)? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(error) => {
                warn!(key, %error, "stored record is unreadable, using empty value");
                Ok(T::default())
            }
        }
    }

    /// Strict read for read-modify-write, so a corrupt document is never
    /// overwritten with a fresh one.
    fn load_for_update<T: DeserializeOwned + Default>(
        &self,
        key: &str,
    ) -> Result<T, ApplicationError> {
        let Some(raw) = self.read_raw(key)? else {
            return Ok(T::default());
        };
        serde_json::from_str(&raw).map_err(|error| {
            ApplicationError::Persistence(format!("record {key} is unreadable: {error}"))
        })
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ApplicationError> {
        let raw = serde_json::to_string(value)
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        let conn = self.open_connection()?;
        let now = chrono::Utc::now().timestamp_millis();
        queries::write_record(&conn, key, &raw, now)
            .map_err(|error| ApplicationError::Persistence(error.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct SqliteGalleryRepository {
    store: SqliteStore,
}

impl SqliteGalleryRepository {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }
}

impl GalleryRepository for SqliteGalleryRepository {
    fn list(&self) -> Result<Vec<Gallery>, ApplicationError> {
        self.store.load(GALLERIES_KEY)
    }

    fn create(&self, gallery: &Gallery) -> Result<(), ApplicationError> {
        let mut galleries: Vec<Gallery> = self.store.load_for_update(GALLERIES_KEY)?;
        if galleries.iter().any(|existing| existing.id == gallery.id) {
            return Err(ApplicationError::InvalidInput(format!(
                "gallery {} already exists",
                gallery.id
            )));
        }
        galleries.push(gallery.clone());
        self.store.save(GALLERIES_KEY, &galleries)
    }

    fn delete(&self, gallery_id: &GalleryId) -> Result<(), ApplicationError> {
        let mut galleries: Vec<Gallery> = self.store.load_for_update(GALLERIES_KEY)?;
        galleries.retain(|gallery| &gallery.id != gallery_id);
        self.store.save(GALLERIES_KEY, &galleries)
    }
}

#[derive(Debug, Clone)]
pub struct SqliteRatingStore {
    store: SqliteStore,
}

impl SqliteRatingStore {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }
}

impl RatingStore for SqliteRatingStore {
    fn get(
        &self,
        gallery_id: &GalleryId,
        photo_id: &PhotoId,
    ) -> Result<Vec<Rating>, ApplicationError> {
        let table: RatingTable = self.store.load(RATINGS_KEY)?;
        Ok(table
            .get(gallery_id)
            .and_then(|photos| photos.get(photo_id))
            .cloned()
            .unwrap_or_default())
    }

    fn put(
        &self,
        gallery_id: &GalleryId,
        photo_id: &PhotoId,
        ratings: &[Rating],
    ) -> Result<(), ApplicationError> {
        let mut table: RatingTable = self.store.load_for_update(RATINGS_KEY)?;
        table
            .entry(gallery_id.clone())
            .or_default()
            .insert(photo_id.clone(), ratings.to_vec());
        self.store.save(RATINGS_KEY, &table)
    }
}

#[cfg(test)]
mod tests {
    use privata_domain::{Photo, Stars, ViewerId};
    use tempfile::TempDir;

    use super::*;

    fn store(dir: &TempDir) -> SqliteStore {
        let store = SqliteStore::new(dir.path().join("data").join("privata.sqlite3"));
        store.initialize().expect("initialize");
        store
    }

    fn gallery(id: &str) -> Gallery {
        Gallery {
            id: GalleryId::new(id).expect("id"),
            name: format!("Gallery {id}"),
            password: "pw".to_string(),
            photos: vec![Photo {
                id: PhotoId::new("p1").expect("id"),
                url: "full.jpg".to_string(),
                thumbnail: "thumb.jpg".to_string(),
                name: "one.jpg".to_string(),
            }],
            created_at: 1_700_000_000_000,
        }
    }

    fn rating(viewer: &str, stars: i64) -> Rating {
        Rating {
            viewer_id: ViewerId::new(viewer).expect("viewer"),
            stars: Stars::new(stars).expect("stars"),
            timestamp: 5,
        }
    }

    #[test]
    fn initialize_creates_schema() {
        let dir = TempDir::new().expect("tempdir");
        let store = store(&dir);

        let conn = store.open_connection().expect("open");
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='records'",
                [],
                |row| row.get(0),
            )
            .expect("query");
        assert_eq!(count, 1);
    }

    #[test]
    fn galleries_roundtrip_through_the_record() {
        let dir = TempDir::new().expect("tempdir");
        let repo = SqliteGalleryRepository::new(store(&dir));
        assert!(repo.list().expect("list").is_empty());

        repo.create(&gallery("g1")).expect("create g1");
        repo.create(&gallery("g2")).expect("create g2");
        assert!(matches!(
            repo.create(&gallery("g1")),
            Err(ApplicationError::InvalidInput(_))
        ));

        repo.delete(&GalleryId::new("g1").expect("id")).expect("delete");
        let listed = repo.list().expect("list");
        assert_eq!(listed, vec![gallery("g2")]);
        assert!(repo
            .find(&GalleryId::new("g2").expect("id"))
            .expect("find")
            .is_some());
    }

    #[test]
    fn ratings_are_nested_by_gallery_then_photo() {
        let dir = TempDir::new().expect("tempdir");
        let sqlite = store(&dir);
        let ratings = SqliteRatingStore::new(sqlite.clone());
        let g1 = GalleryId::new("g1").expect("id");
        let p1 = PhotoId::new("p1").expect("id");

        assert!(ratings.get(&g1, &p1).expect("get").is_empty());
        ratings
            .put(&g1, &p1, &[rating("u1", 4), rating("u2", 2)])
            .expect("put");
        assert_eq!(
            ratings.get(&g1, &p1).expect("get"),
            vec![rating("u1", 4), rating("u2", 2)]
        );

        let raw = sqlite.read_raw(RATINGS_KEY).expect("read").expect("record");
        assert_eq!(
            raw,
            r#"{"g1":{"p1":[{"userId":"u1","stars":4,"timestamp":5},{"userId":"u2","stars":2,"timestamp":5}]}}"#
        );
    }

    #[test]
    fn unreadable_records_load_as_empty_but_refuse_overwrite() {
        let dir = TempDir::new().expect("tempdir");
        let sqlite = store(&dir);
        sqlite.save(GALLERIES_KEY, &"not a list").expect("save");

        let repo = SqliteGalleryRepository::new(sqlite);
        assert!(repo.list().expect("lenient list").is_empty());
        assert!(matches!(
            repo.create(&gallery("g1")),
            Err(ApplicationError::Persistence(_))
        ));
    }

    #[test]
    fn initialize_rejects_empty_path() {
        let store = SqliteStore::new("");
        assert!(matches!(
            store.initialize(),
            Err(ApplicationError::InvalidInput(_))
        ));
    }
}
