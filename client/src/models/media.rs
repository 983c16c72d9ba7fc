//! User-submitted content: concerts, videos and track tests.
//!
//! Each kind has a stored record (returned by the backend) and a `New*`
//! payload assembled by the matching form in [`crate::forms`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Engagement, Entity, ModerationStatus, PriceRange};

// =============================================================================
// Concerts
// =============================================================================

wire_enum! {
    /// Kind of live event.
    pub enum EventType as "event type" {
        Concert => "concert",
        Festival => "festival",
        Club => "club",
        Private => "private",
        Online => "online",
    }
}

/// A concert announcement as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concert {
    pub id: String,
    pub title: String,
    /// Missing only on drafts.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// `HH:MM`, local to the venue.
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "type", default)]
    pub event_type: Option<EventType>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "PriceRange::is_empty")]
    pub price: PriceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
    /// Poster image reference (object URL or data URI until the backend stores it).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(default)]
    pub status: ModerationStatus,
    #[serde(flatten)]
    pub stats: Engagement,
    #[serde(default)]
    pub promoted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Concert {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload for `POST /concerts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConcert {
    pub title: String,
    pub date: Option<NaiveDate>,
    pub time: String,
    pub city: String,
    pub venue: String,
    pub address: String,
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "PriceRange::is_empty", default)]
    pub price: PriceRange,
    pub ticket_url: Option<String>,
    pub banner: Option<String>,
    pub status: ModerationStatus,
}

impl NewConcert {
    /// Local stand-in shown while the create request is in flight.
    pub fn to_pending(&self, id: impl Into<String>, created_at: DateTime<Utc>) -> Concert {
        Concert {
            id: id.into(),
            title: self.title.clone(),
            date: self.date,
            time: self.time.clone(),
            city: self.city.clone(),
            venue: self.venue.clone(),
            address: self.address.clone(),
            event_type: self.event_type,
            description: self.description.clone(),
            tags: self.tags.clone(),
            price: self.price,
            ticket_url: self.ticket_url.clone(),
            banner: self.banner.clone(),
            status: self.status,
            stats: Engagement::default(),
            promoted: false,
            rejection_reason: None,
            created_at,
        }
    }
}

// =============================================================================
// Videos
// =============================================================================

wire_enum! {
    /// Video category shown as a filter chip.
    pub enum VideoCategory as "video category" {
        MusicVideo => "music-video",
        Live => "live",
        Lyric => "lyric",
        Backstage => "backstage",
        Interview => "interview",
        Other => "other",
    }
}

/// A video as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<VideoCategory>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub status: ModerationStatus,
    #[serde(flatten)]
    pub stats: Engagement,
    #[serde(default)]
    pub promoted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Video {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload for `POST /videos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub category: Option<VideoCategory>,
    pub tags: Vec<String>,
    pub video_url: Option<String>,
    pub thumbnail: Option<String>,
    pub status: ModerationStatus,
}

// =============================================================================
// Track tests
// =============================================================================

/// A track sent for a listener test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSubmission {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default)]
    pub status: ModerationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Entity for TrackSubmission {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload for `POST /track-tests`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrackSubmission {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub description: String,
    pub audio: Option<String>,
    pub cover: Option<String>,
    pub status: ModerationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_concert_from_payload() {
        let payload = NewConcert {
            title: "Весенний тур".into(),
            date: NaiveDate::from_ymd_opt(2026, 6, 15),
            time: "19:00".into(),
            city: "Москва".into(),
            venue: "Adrenaline Stadium".into(),
            address: String::new(),
            event_type: Some(EventType::Concert),
            description: String::new(),
            tags: vec!["тур".into()],
            price: PriceRange::default(),
            ticket_url: None,
            banner: Some("blob:poster".into()),
            status: ModerationStatus::Pending,
        };

        let concert = payload.to_pending("tmp-1", Utc::now());
        assert_eq!(concert.id(), "tmp-1");
        assert_eq!(concert.city, "Москва");
        assert_eq!(concert.status, ModerationStatus::Pending);
        assert_eq!(concert.stats, Engagement::default());
        assert!(!concert.promoted);
    }

    #[test]
    fn test_concert_deserialization() {
        let json = r#"{
            "id": "c-1",
            "title": "Весенний тур",
            "date": "2026-06-15",
            "time": "19:00",
            "city": "Москва",
            "venue": "Adrenaline Stadium",
            "type": "concert",
            "status": "approved",
            "views": 1200,
            "clicks": 85,
            "promoted": true,
            "createdAt": "2026-05-01T10:00:00Z"
        }"#;

        let concert: Concert = serde_json::from_str(json).unwrap();
        assert_eq!(concert.event_type, Some(EventType::Concert));
        assert_eq!(concert.date, NaiveDate::from_ymd_opt(2026, 6, 15));
        assert_eq!(concert.stats.views, 1200);
        assert_eq!(concert.stats.likes, 0);
        assert!(concert.price.is_empty());
        assert!(concert.rejection_reason.is_none());
    }

    #[test]
    fn test_video_category_wire_name() {
        let json = serde_json::to_string(&VideoCategory::MusicVideo).unwrap();
        assert_eq!(json, "\"music-video\"");
    }
}
