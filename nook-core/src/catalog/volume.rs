//! Catalog wire format and its normalization into [`BookRecord`]

use crate::types::{BookRecord, DEFAULT_AUTHOR, DEFAULT_LANGUAGE, DEFAULT_TITLE};
use serde::Deserialize;

/// Top-level search response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VolumesResponse {
    /// Missing when the search matched nothing
    #[serde(default)]
    pub items: Vec<Volume>,
}

/// One search hit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Volume {
    pub id: Option<String>,

    #[serde(rename = "volumeInfo", default)]
    pub volume_info: VolumeInfo,
}

/// Volume metadata, every field optional on the wire
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub description: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<i64>,
    pub categories: Option<Vec<String>>,
    pub language: Option<String>,
    pub image_links: Option<ImageLinks>,
    pub preview_link: Option<String>,
    pub info_link: Option<String>,
    pub average_rating: Option<f64>,
    pub ratings_count: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
    pub small_thumbnail: Option<String>,
}

impl VolumesResponse {
    /// Normalize every hit, preserving catalog order
    ///
    /// Hits without an id are dropped since they cannot be keyed.
    pub fn into_records(self) -> Vec<BookRecord> {
        self.items
            .into_iter()
            .filter_map(BookRecord::from_volume)
            .collect()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn non_negative(value: Option<i64>) -> u32 {
    value
        .map(|n| n.clamp(0, i64::from(u32::MAX)) as u32)
        .unwrap_or(0)
}

impl BookRecord {
    /// Build a record from a catalog volume, applying the documented defaults
    pub fn from_volume(volume: Volume) -> Option<Self> {
        let id = non_empty(volume.id)?;
        let info = volume.volume_info;

        let authors = info
            .authors
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_AUTHOR.to_string()]);

        let thumbnail = info
            .image_links
            .and_then(|links| non_empty(links.thumbnail).or(non_empty(links.small_thumbnail)))
            .unwrap_or_default();

        let average_rating = info
            .average_rating
            .filter(|r| r.is_finite())
            .map(|r| r.clamp(0.0, 5.0))
            .unwrap_or(0.0);

        Some(Self {
            id,
            title: non_empty(info.title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            authors,
            description: info.description.unwrap_or_default(),
            published_date: info.published_date.unwrap_or_default(),
            page_count: non_negative(info.page_count),
            categories: info.categories.unwrap_or_default(),
            language: non_empty(info.language).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            thumbnail,
            preview_link: info.preview_link.unwrap_or_default(),
            info_link: info.info_link.unwrap_or_default(),
            average_rating,
            ratings_count: non_negative(info.ratings_count),
        })
    }
}
