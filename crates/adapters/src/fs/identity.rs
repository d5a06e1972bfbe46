use std::fs;
use std::path::PathBuf;

use privata_application::{ApplicationError, IdentityProvider};
use privata_domain::ViewerId;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct FileIdentityProvider {
    path: PathBuf,
}

impl FileIdentityProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn stored(&self) -> Option<ViewerId> {
        let raw = fs::read_to_string(&self.path).ok()?;
        ViewerId::new(raw.trim()).ok()
    }
}

impl IdentityProvider for FileIdentityProvider {
    fn viewer_id(&self) -> Result<ViewerId, ApplicationError> {
        if let Some(existing) = self.stored() {
            return Ok(existing);
        }

        let viewer = ViewerId::new(format!("user_{}", chrono::Utc::now().timestamp_millis()))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(error) = fs::create_dir_all(parent) {
                    warn!(%error, "failed to create identity directory");
                }
            }
        }
        match fs::write(&self.path, viewer.as_str()) {
            Ok(()) => info!(viewer = %viewer, "new viewer identity created"),
            Err(error) => warn!(%error, path = %self.path.display(), "failed to persist viewer identity"),
        }
        Ok(viewer)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn identity_is_generated_once_and_reused() {
        let dir = TempDir::new().expect("tempdir");
        let provider = FileIdentityProvider::new(dir.path().join("nested").join("viewer"));

        let first = provider.viewer_id().expect("first");
        assert!(first.as_str().starts_with("user_"));

        let second = FileIdentityProvider::new(dir.path().join("nested").join("viewer"))
            .viewer_id()
            .expect("second");
        assert_eq!(first, second);
    }

    #[test]
    fn existing_token_is_trimmed() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("viewer");
        fs::write(&path, "user_42\n").expect("write");
        let viewer = FileIdentityProvider::new(path).viewer_id().expect("viewer");
        assert_eq!(viewer.as_str(), "user_42");
    }
}
