//! Upload forms for concerts, videos and track tests.

use serde::Deserialize;

use super::{empty_as_none, non_blank, parse_amount, Form};
use crate::attachment::Attachment;
use crate::models::{
    EventType, ModerationStatus, NewConcert, NewTrackSubmission, NewVideo, PriceRange, VideoCategory,
};
use crate::validation::{
    is_valid_time, parse_date_input, parse_tags, FieldErrors, FILE_REQUIRED, REQUIRED,
};

const DESCRIPTION_MAX: usize = 2000;

// =============================================================================
// Concert
// =============================================================================

/// "Add concert" modal.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConcertForm {
    pub title: String,
    /// `YYYY-MM-DD` as typed.
    pub date: String,
    /// `HH:MM` as typed.
    pub time: String,
    pub city: String,
    pub venue: String,
    pub address: String,
    #[serde(rename = "type", deserialize_with = "empty_as_none")]
    pub event_type: Option<EventType>,
    pub description: String,
    /// Comma separated.
    pub tags: String,
    pub price_min: String,
    pub price_max: String,
    pub ticket_url: String,
    /// Poster image.
    pub banner: Option<Attachment>,
}

impl Form for ConcertForm {
    type Payload = NewConcert;

    const REQUIRED: &'static [&'static str] =
        &["title", "date", "time", "city", "venue", "type", "banner"];

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        errors.require_text("title", &self.title);

        if self.date.trim().is_empty() {
            errors.insert("date", REQUIRED);
        } else if parse_date_input(&self.date).is_none() {
            errors.insert("date", "Некорректная дата");
        }

        if self.time.trim().is_empty() {
            errors.insert("time", REQUIRED);
        } else if !is_valid_time(self.time.trim()) {
            errors.insert("time", "Формат времени ЧЧ:ММ");
        }

        errors.require_text("city", &self.city);
        errors.require_text("venue", &self.venue);
        errors.require_choice("type", &self.event_type);
        errors.require_file("banner", &self.banner);
        errors.check_url("ticketUrl", &self.ticket_url);
        errors.check_max_len("description", &self.description, DESCRIPTION_MAX);

        match (parse_amount(&self.price_min), parse_amount(&self.price_max)) {
            (Ok(min), Ok(max)) => {
                if !(PriceRange { min, max }).is_consistent() {
                    errors.insert("price", "Минимальная цена больше максимальной");
                }
            }
            _ => errors.insert("price", "Цена должна быть целым числом"),
        }

        errors
    }

    fn build(&self, is_draft: bool) -> NewConcert {
        NewConcert {
            title: self.title.trim().to_string(),
            date: parse_date_input(&self.date),
            time: self.time.trim().to_string(),
            city: self.city.trim().to_string(),
            venue: self.venue.trim().to_string(),
            address: self.address.trim().to_string(),
            event_type: self.event_type,
            description: self.description.trim().to_string(),
            tags: parse_tags(&self.tags),
            price: PriceRange {
                min: parse_amount(&self.price_min).ok().flatten(),
                max: parse_amount(&self.price_max).ok().flatten(),
            },
            ticket_url: non_blank(&self.ticket_url),
            banner: self.banner.as_ref().map(|b| b.reference().to_string()),
            status: ModerationStatus::for_submission(is_draft),
        }
    }

    fn attachments(&self) -> Vec<&Attachment> {
        self.banner.iter().collect()
    }
}

// =============================================================================
// Video
// =============================================================================

/// "Upload video" modal. Either a file or an external link is required.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoForm {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub category: Option<VideoCategory>,
    pub tags: String,
    pub video: Option<Attachment>,
    pub video_url: String,
    pub thumbnail: Option<Attachment>,
}

impl Form for VideoForm {
    type Payload = NewVideo;

    const REQUIRED: &'static [&'static str] = &["title", "category", "video"];

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_text("title", &self.title);
        errors.require_choice("category", &self.category);
        if self.video.is_none() && self.video_url.trim().is_empty() {
            errors.insert("video", FILE_REQUIRED);
        }
        errors.check_url("videoUrl", &self.video_url);
        errors.check_max_len("description", &self.description, DESCRIPTION_MAX);
        errors
    }

    fn build(&self, is_draft: bool) -> NewVideo {
        let video_url = self
            .video
            .as_ref()
            .map(|v| v.reference().to_string())
            .or_else(|| non_blank(&self.video_url));

        NewVideo {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category,
            tags: parse_tags(&self.tags),
            video_url,
            thumbnail: self.thumbnail.as_ref().map(|t| t.reference().to_string()),
            status: ModerationStatus::for_submission(is_draft),
        }
    }

    fn attachments(&self) -> Vec<&Attachment> {
        self.video.iter().chain(self.thumbnail.iter()).collect()
    }
}

// =============================================================================
// Track test
// =============================================================================

/// "Test a track" modal.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackForm {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub description: String,
    pub audio: Option<Attachment>,
    pub cover: Option<Attachment>,
}

impl Form for TrackForm {
    type Payload = NewTrackSubmission;

    const REQUIRED: &'static [&'static str] = &["title", "artist", "genre", "audio"];

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_text("title", &self.title);
        errors.require_text("artist", &self.artist);
        errors.require_text("genre", &self.genre);
        errors.require_file("audio", &self.audio);
        errors.check_max_len("description", &self.description, DESCRIPTION_MAX);
        errors
    }

    fn build(&self, is_draft: bool) -> NewTrackSubmission {
        NewTrackSubmission {
            title: self.title.trim().to_string(),
            artist: self.artist.trim().to_string(),
            genre: self.genre.trim().to_string(),
            description: self.description.trim().to_string(),
            audio: self.audio.as_ref().map(|a| a.reference().to_string()),
            cover: self.cover.as_ref().map(|c| c.reference().to_string()),
            status: ModerationStatus::for_submission(is_draft),
        }
    }

    fn attachments(&self) -> Vec<&Attachment> {
        self.audio.iter().chain(self.cover.iter()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::AttachmentData;

    fn poster() -> Attachment {
        Attachment {
            file_name: "poster.jpg".into(),
            mime_type: "image/jpeg".into(),
            size_bytes: 200_000,
            data: AttachmentData::ObjectUrl("blob:poster".into()),
        }
    }

    fn filled_concert() -> ConcertForm {
        ConcertForm {
            title: "Весенний тур".into(),
            date: "2026-06-15".into(),
            time: "19:00".into(),
            city: "Москва".into(),
            venue: "Adrenaline Stadium".into(),
            event_type: Some(EventType::Concert),
            banner: Some(poster()),
            ..ConcertForm::default()
        }
    }

    #[test]
    fn test_concert_blocks_on_missing_fields() {
        let form: ConcertForm = serde_json::from_str(
            r#"{"title":"","date":"2026-06-15","time":"19:00","city":"Москва",
                "venue":"","type":"","description":"","banner":null}"#,
        )
        .unwrap();

        let errors = form.validate();
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["banner", "title", "type", "venue"]);
    }

    fn assert_empty_fails_on_required<F: Form>() {
        let mut reported: Vec<_> = F::default().validate().keys().collect();
        reported.sort_unstable();
        let mut expected = F::REQUIRED.to_vec();
        expected.sort_unstable();
        assert_eq!(reported, expected);
    }

    #[test]
    fn test_empty_forms_report_exactly_required_fields() {
        assert_empty_fails_on_required::<ConcertForm>();
        assert_empty_fails_on_required::<VideoForm>();
        assert_empty_fails_on_required::<TrackForm>();
    }

    #[test]
    fn test_filled_concert_is_valid() {
        assert!(filled_concert().validate().is_empty());
    }

    #[test]
    fn test_concert_format_checks() {
        let form = ConcertForm {
            time: "7pm".into(),
            ticket_url: "ticketland".into(),
            price_min: "3000".into(),
            price_max: "1500".into(),
            ..filled_concert()
        };
        let errors = form.validate();
        assert!(errors.contains("time"));
        assert!(errors.contains("ticketUrl"));
        assert!(errors.contains("price"));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_build_concert_payload() {
        let form = ConcertForm {
            tags: "рок, live".into(),
            price_min: "1500".into(),
            ticket_url: " https://ticketland.ru/e/1 ".into(),
            ..filled_concert()
        };
        let payload = form.build(false);
        assert_eq!(payload.status, ModerationStatus::Pending);
        assert_eq!(payload.tags, vec!["рок", "live"]);
        assert_eq!(payload.price, PriceRange { min: Some(1500), max: None });
        assert_eq!(payload.ticket_url.as_deref(), Some("https://ticketland.ru/e/1"));
        assert_eq!(payload.banner.as_deref(), Some("blob:poster"));

        let draft = ConcertForm::default().build(true);
        assert_eq!(draft.status, ModerationStatus::Draft);
        assert!(draft.date.is_none());
    }

    #[test]
    fn test_video_accepts_link_instead_of_file() {
        let form = VideoForm {
            title: "Live at Stereo".into(),
            category: Some(VideoCategory::Live),
            video_url: "https://youtu.be/abc".into(),
            ..VideoForm::default()
        };
        assert!(form.validate().is_empty());
        assert_eq!(form.build(false).video_url.as_deref(), Some("https://youtu.be/abc"));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = filled_concert();
        form.reset();
        assert_eq!(form, ConcertForm::default());
    }
}
