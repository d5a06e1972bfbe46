use chrono::{TimeZone, Utc};
use privata_application::{DashboardStats, GallerySession};
use privata_domain::{Gallery, RatedPhoto, StarFilter, ViewerId};

pub fn present_gallery_row(gallery: &Gallery) -> String {
    format!(
        "{}\t{}\t{} photos\tcreated {}",
        gallery.id,
        gallery.name,
        gallery.photos.len(),
        format_created(gallery.created_at)
    )
}

pub fn present_photo_row(position: usize, rated: &RatedPhoto, viewer: Option<&ViewerId>) -> String {
    let own = viewer
        .and_then(|viewer| rated.rating_by(viewer))
        .map(|stars| stars.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{}. {}\t{}\t{} {:.1} ({} votes)\tyours: {}",
        position,
        rated.photo.name,
        rated.photo.id,
        star_bar(rated.rounded_bucket()),
        rated.average(),
        rated.vote_count(),
        own
    )
}

pub fn present_gallery_heading(session: &GallerySession) -> String {
    let (visible, total) = session.counts();
    format!("{}\n{} of {} photos", session.gallery_name(), visible, total)
}

pub fn present_filters(filters: &[StarFilter]) -> String {
    let parts: Vec<String> = filters
        .iter()
        .map(|filter| {
            if filter.active {
                format!("[{}*]", filter.stars)
            } else {
                format!("[{}]", filter.stars)
            }
        })
        .collect();
    format!("filter by rating: {}", parts.join(" "))
}

pub fn present_dashboard(stats: &DashboardStats) -> String {
    format!(
        "total galleries: {}\ntotal photos: {}\ntotal ratings: {}",
        stats.total_galleries, stats.total_photos, stats.total_ratings
    )
}

pub fn star_bar(filled: u8) -> String {
    (1..=5)
        .map(|slot| if slot <= filled { '*' } else { '.' })
        .collect()
}

fn format_created(millis: i64) -> String {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|created| created.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use privata_domain::{GalleryId, Photo, PhotoId, Rating, StarFilterSet, Stars};

    use super::*;

    fn photo() -> Photo {
        Photo {
            id: PhotoId::new("p1").expect("id"),
            url: String::new(),
            thumbnail: String::new(),
            name: "beach.jpg".to_string(),
        }
    }

    #[test]
    fn gallery_row_shows_count_and_date() {
        let gallery = Gallery {
            id: GalleryId::new("g1").expect("id"),
            name: "Demo".to_string(),
            password: "pw".to_string(),
            photos: vec![photo()],
            created_at: 1_700_000_000_000,
        };
        assert_eq!(
            present_gallery_row(&gallery),
            "g1\tDemo\t1 photos\tcreated 2023-11-14"
        );
    }

    #[test]
    fn photo_row_shows_average_and_own_vote() {
        let viewer = ViewerId::new("u1").expect("viewer");
        let rated = RatedPhoto::new(
            photo(),
            vec![
                Rating {
                    viewer_id: viewer.clone(),
                    stars: Stars::new(4).expect("stars"),
                    timestamp: 0,
                },
                Rating {
                    viewer_id: ViewerId::new("u2").expect("viewer"),
                    stars: Stars::new(5).expect("stars"),
                    timestamp: 0,
                },
            ],
        );
        assert_eq!(
            present_photo_row(3, &rated, Some(&viewer)),
            "3. beach.jpg\tp1\t***** 4.5 (2 votes)\tyours: 4"
        );
        assert_eq!(
            present_photo_row(1, &RatedPhoto::unrated(photo()), None),
            "1. beach.jpg\tp1\t..... 0.0 (0 votes)\tyours: -"
        );
    }

    #[test]
    fn filters_mark_active_buckets() {
        let set = StarFilterSet::from_buckets([Stars::new(4).expect("stars")]);
        assert_eq!(
            present_filters(&set.filters()),
            "filter by rating: [5] [4*] [3] [2] [1]"
        );
    }

    #[test]
    fn dashboard_lists_totals() {
        let stats = DashboardStats {
            total_galleries: 2,
            total_photos: 7,
            total_ratings: 11,
        };
        assert_eq!(
            present_dashboard(&stats),
            "total galleries: 2\ntotal photos: 7\ntotal ratings: 11"
        );
    }
}
