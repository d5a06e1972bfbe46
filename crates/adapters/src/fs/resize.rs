use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{io::Reader as ImageReader, ColorType, DynamicImage};
use privata_application::{ApplicationError, ImageResizer, ResizedImage};
use privata_domain::{GalleryId, PhotoId};

pub const DEFAULT_FULL_SIZE_MAX: u32 = 1024;
pub const DEFAULT_THUMBNAIL_MAX: u32 = 300;
const JPEG_QUALITY: u8 = 80;

#[derive(Debug, Clone)]
pub struct FsImageResizer {
    cache_dir: PathBuf,
    full_size_max: u32,
    thumbnail_max: u32,
}

impl FsImageResizer {
    pub fn new(cache_dir: impl Into<PathBuf>, full_size_max: u32, thumbnail_max: u32) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            full_size_max,
            thumbnail_max,
        }
    }
}

impl ImageResizer for FsImageResizer {
    fn resize(
        &self,
        source: &Path,
        gallery_id: &GalleryId,
        photo_id: &PhotoId,
    ) -> Result<ResizedImage, ApplicationError> {
        let image = ImageReader::open(source)
            .map_err(|error| ApplicationError::Io(error.to_string()))?
            .with_guessed_format()
            .map_err(|error| ApplicationError::Decode(error.to_string()))?
            .decode()
            .map_err(|error| ApplicationError::Decode(error.to_string()))?;

        let target_dir = self.cache_dir.join(gallery_id.as_str());
        fs::create_dir_all(&target_dir).map_err(|error| ApplicationError::Io(error.to_string()))?;

        let full_path = target_dir.join(format!("{photo_id}.jpg"));
        let thumb_path = target_dir.join(format!("{photo_id}_thumb.jpg"));
        save_jpeg(&fit_within(&image, self.full_size_max), &full_path)?;
        save_jpeg(&fit_within(&image, self.thumbnail_max), &thumb_path)?;

        Ok(ResizedImage {
            url: full_path.to_string_lossy().to_string(),
            thumbnail: thumb_path.to_string_lossy().to_string(),
        })
    }
}

fn fit_within(image: &DynamicImage, max: u32) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    if width.max(height) <= max || width == 0 || height == 0 {
        return image.clone();
    }
    let (new_width, new_height) = if width > height {
        (max, scaled(height, max, width))
    } else {
        (scaled(width, max, height), max)
    };
    image.resize_exact(new_width, new_height, FilterType::Triangle)
}

fn scaled(side: u32, max: u32, longest: u32) -> u32 {
    ((u64::from(side) * u64::from(max)) / u64::from(longest)).max(1) as u32
}

fn save_jpeg(image: &DynamicImage, path: &Path) -> Result<(), ApplicationError> {
    let file = File::create(path).map_err(|error| ApplicationError::Io(error.to_string()))?;
    let mut writer = BufWriter::new(file);
    let rgb = image.to_rgb8();
    JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY)
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
        .map_err(|error| ApplicationError::Io(error.to_string()))
}
