use crate::{RatedPhoto, Stars};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub contents: String,
}

/// Entries keep their 1-based position in `photos`, not in the bucket.
pub fn format_report(gallery_name: &str, exported_at: &str, photos: &[RatedPhoto]) -> String {
    let mut buckets: [Vec<String>; 5] = Default::default();
    for (index, photo) in photos.iter().enumerate() {
        let Ok(stars) = Stars::new(i64::from(photo.rounded_bucket())) else {
            continue;
        };
        buckets[stars.index()].push(format!("{}. {}", index + 1, photo.photo.name));
    }

    let mut report = format!("Gallery: {gallery_name}\nExported: {exported_at}\n\n");

    for stars in Stars::DESCENDING {
        let entries = &buckets[stars.index()];
        let plural = if stars.get() == 1 { "" } else { "s" };
        report.push_str(&format!(
            "{stars} Star{plural} ({} photos):\n",
            entries.len()
        ));
        if entries.is_empty() {
            report.push_str("No photos\n");
        } else {
            for entry in entries {
                report.push_str(entry);
                report.push('\n');
            }
        }
        report.push('\n');
    }

    report
}

pub fn export_file_name(gallery_name: &str) -> String {
    let stem: String = gallery_name
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect();
    format!("{stem}_ratings.txt")
}

pub fn build_export(gallery_name: &str, exported_at: &str, photos: &[RatedPhoto]) -> ExportArtifact {
    ExportArtifact {
        file_name: export_file_name(gallery_name),
        contents: format_report(gallery_name, exported_at, photos),
    }
}
