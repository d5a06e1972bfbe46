use serde::{Deserialize, Serialize};

use crate::{RatedPhoto, Stars};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarFilter {
    pub stars: Stars,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarFilterSet {
    active: [bool; 5],
}

impl StarFilterSet {
    pub fn from_buckets(buckets: impl IntoIterator<Item = Stars>) -> Self {
        let mut set = Self::default();
        for stars in buckets {
            set.set(stars, true);
        }
        set
    }

    pub fn toggle(&mut self, stars: Stars) {
        let slot = &mut self.active[stars.index()];
        *slot = !*slot;
    }

    pub fn set(&mut self, stars: Stars, active: bool) {
        self.active[stars.index()] = active;
    }

    pub fn clear(&mut self) {
        self.active = [false; 5];
    }

    pub fn is_active(&self, stars: Stars) -> bool {
        self.active[stars.index()]
    }

    pub fn is_empty(&self) -> bool {
        !self.active.iter().any(|active| *active)
    }

    pub fn active_buckets(&self) -> Vec<Stars> {
        Stars::ALL
            .into_iter()
            .filter(|stars| self.is_active(*stars))
            .collect()
    }

    pub fn filters(&self) -> Vec<StarFilter> {
        Stars::DESCENDING
            .into_iter()
            .map(|stars| StarFilter {
                stars,
                active: self.is_active(stars),
            })
            .collect()
    }

    fn matches_bucket(&self, bucket: u8) -> bool {
        Stars::new(i64::from(bucket))
            .map(|stars| self.is_active(stars))
            .unwrap_or(false)
    }
}

/// Unrated photos round to 0, which has no toggle, so any non-empty filter
/// leaves them out.
pub fn apply_filters(photos: &[RatedPhoto], filters: &StarFilterSet) -> Vec<RatedPhoto> {
    if filters.is_empty() {
        return photos.to_vec();
    }
    photos
        .iter()
        .filter(|photo| filters.matches_bucket(photo.rounded_bucket()))
        .cloned()
        .collect()
}
