use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Document,
}

/// A media attachment on an event, served via short-lived SAS URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMedia {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub mime: String,
    #[serde(rename = "sasUrl")]
    pub sas_url: String,
    #[serde(rename = "posterSasUrl", default)]
    pub poster_sas_url: Option<String>,
    #[serde(rename = "sortOrder", default)]
    pub sort_order: i32,
}

/// An event as returned by the backend feed and my-events endpoints.
///
/// `media`, `participant_count` and `available_spots` are only present
/// when the caller asked for them (`include_media` /
/// `include_participants` query flags); `available_spots == None` with
/// a count present means unlimited capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubEvent {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub max_participants: Option<u32>,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub media: Option<Vec<EventMedia>>,
    #[serde(default)]
    pub participant_count: Option<u32>,
    #[serde(default)]
    pub available_spots: Option<u32>,
}

impl ClubEvent {
    /// First image by sort order, for use as a card thumbnail.
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.images().first().map(|m| m.sas_url.as_str())
    }

    /// All image attachments, sorted by their configured order.
    pub fn images(&self) -> Vec<&EventMedia> {
        let Some(media) = &self.media else {
            return Vec::new();
        };
        let mut images: Vec<&EventMedia> = media
            .iter()
            .filter(|m| m.kind == MediaKind::Image)
            .collect();
        images.sort_by_key(|m| m.sort_order);
        images
    }
}
