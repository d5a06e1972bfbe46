use std::path::{Path, PathBuf};

use privata_application::{ApplicationError, Upload, UploadScanner};
use tracing::debug;
use walkdir::WalkDir;

const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

#[derive(Debug, Default)]
pub struct WalkdirUploadScanner;

impl UploadScanner for WalkdirUploadScanner {
    fn scan(&self, inputs: &[PathBuf]) -> Result<Vec<Upload>, ApplicationError> {
        let mut uploads = Vec::new();

        for input in inputs {
            if input.is_file() {
                if is_supported_image(input) {
                    uploads.push(upload_for(input));
                } else {
                    debug!(file = %input.display(), "skipping unsupported upload");
                }
                continue;
            }

            if !input.is_dir() {
                return Err(ApplicationError::InvalidInput(format!(
                    "upload does not exist: {}",
                    input.display()
                )));
            }

            for entry in WalkDir::new(input)
                .sort_by_file_name()
                .into_iter()
                .filter_map(Result::ok)
            {
                if entry.file_type().is_file() && is_supported_image(entry.path()) {
                    uploads.push(upload_for(entry.path()));
                }
            }
        }

        Ok(uploads)
    }
}

fn upload_for(path: &Path) -> Upload {
    Upload {
        path: path.to_path_buf(),
        name: path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default(),
    }
}
