use std::fs;
use std::path::{Path, PathBuf};

use privata_application::ApplicationError;
use privata_domain::ExportArtifact;

pub fn write_export(dir: &Path, artifact: &ExportArtifact) -> Result<PathBuf, ApplicationError> {
    fs::create_dir_all(dir).map_err(|error| ApplicationError::Io(error.to_string()))?;
    let target = dir.join(&artifact.file_name);
    fs::write(&target, &artifact.contents)
        .map_err(|error| ApplicationError::Io(error.to_string()))?;
    Ok(target)
}
