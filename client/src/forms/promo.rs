//! Promotion forms: banner booking, email campaigns and pitching.

use chrono::{NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

use super::{empty_as_none, non_blank, Form};
use crate::attachment::Attachment;
use crate::models::{
    BannerPlacement, CampaignStatus, ModerationStatus, NewBanner, NewCampaign, NewPitchRequest,
};
use crate::validation::{parse_date_input, FieldErrors, REQUIRED};

// =============================================================================
// Banner
// =============================================================================

/// "Book a banner" wizard.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BannerForm {
    pub title: String,
    pub image: Option<Attachment>,
    pub link_url: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub placement: Option<BannerPlacement>,
    pub start_date: String,
    pub end_date: String,
}

impl Form for BannerForm {
    type Payload = NewBanner;

    const REQUIRED: &'static [&'static str] =
        &["title", "image", "placement", "startDate", "endDate"];

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_text("title", &self.title);
        errors.require_file("image", &self.image);
        errors.require_choice("placement", &self.placement);
        errors.check_url("linkUrl", &self.link_url);

        let start = required_date(&mut errors, "startDate", &self.start_date);
        let end = required_date(&mut errors, "endDate", &self.end_date);
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                errors.insert("endDate", "Дата окончания раньше даты начала");
            }
        }

        errors
    }

    fn build(&self, is_draft: bool) -> NewBanner {
        NewBanner {
            title: self.title.trim().to_string(),
            image: self.image.as_ref().map(|i| i.reference().to_string()),
            link_url: non_blank(&self.link_url),
            placement: self.placement,
            start_date: parse_date_input(&self.start_date),
            end_date: parse_date_input(&self.end_date),
            status: ModerationStatus::for_submission(is_draft),
        }
    }

    fn attachments(&self) -> Vec<&Attachment> {
        self.image.iter().collect()
    }
}

fn required_date(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
) -> Option<chrono::NaiveDate> {
    if value.trim().is_empty() {
        errors.insert(field, REQUIRED);
        return None;
    }
    let parsed = parse_date_input(value);
    if parsed.is_none() {
        errors.insert(field, "Некорректная дата");
    }
    parsed
}

// =============================================================================
// Email campaign
// =============================================================================

/// "New mailing" editor. A filled schedule makes it a scheduled campaign,
/// otherwise it is sent right away.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CampaignForm {
    pub subject: String,
    pub body: String,
    /// `YYYY-MM-DDTHH:MM` from a datetime-local input, UTC.
    pub scheduled_at: String,
}

const SUBJECT_MAX: usize = 150;

impl CampaignForm {
    fn schedule(&self) -> Option<chrono::DateTime<Utc>> {
        let value = self.scheduled_at.trim();
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive))
    }
}

impl Form for CampaignForm {
    type Payload = NewCampaign;

    const REQUIRED: &'static [&'static str] = &["subject", "body"];

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_text("subject", &self.subject);
        errors.check_max_len("subject", &self.subject, SUBJECT_MAX);
        errors.require_text("body", &self.body);
        if !self.scheduled_at.trim().is_empty() && self.schedule().is_none() {
            errors.insert("scheduledAt", "Некорректная дата отправки");
        }
        errors
    }

    fn build(&self, is_draft: bool) -> NewCampaign {
        let scheduled_at = self.schedule();
        let status = match (is_draft, scheduled_at) {
            (true, _) => CampaignStatus::Draft,
            (false, Some(_)) => CampaignStatus::Scheduled,
            (false, None) => CampaignStatus::Sending,
        };
        NewCampaign {
            subject: self.subject.trim().to_string(),
            body: self.body.clone(),
            scheduled_at,
            status,
        }
    }
}

// =============================================================================
// Pitching
// =============================================================================

/// "Pitch a track" dialog, opened from a platform card.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PitchForm {
    pub platform_id: String,
    pub track_id: String,
    pub message: String,
}

impl Form for PitchForm {
    type Payload = NewPitchRequest;

    const REQUIRED: &'static [&'static str] = &["platformId", "trackId"];

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_text("platformId", &self.platform_id);
        errors.require_text("trackId", &self.track_id);
        errors.check_max_len("message", &self.message, 1000);
        errors
    }

    fn build(&self, _is_draft: bool) -> NewPitchRequest {
        NewPitchRequest {
            platform_id: self.platform_id.clone(),
            track_id: self.track_id.clone(),
            message: self.message.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::AttachmentData;

    fn filled_banner() -> BannerForm {
        BannerForm {
            title: "Новый альбом".into(),
            image: Some(Attachment {
                file_name: "banner.png".into(),
                mime_type: "image/png".into(),
                size_bytes: 900_000,
                data: AttachmentData::DataUri("data:image/png;base64,AAAA".into()),
            }),
            link_url: String::new(),
            placement: Some(BannerPlacement::HomeSidebar),
            start_date: "2026-07-01".into(),
            end_date: "2026-07-14".into(),
        }
    }

    #[test]
    fn test_banner_required_fields() {
        let keys: Vec<_> = BannerForm::default().validate().keys().collect();
        assert_eq!(keys, vec!["endDate", "image", "placement", "startDate", "title"]);
        assert!(filled_banner().validate().is_empty());
    }

    #[test]
    fn test_banner_end_before_start() {
        let form = BannerForm { end_date: "2026-06-30".into(), ..filled_banner() };
        let errors = form.validate();
        assert_eq!(errors.get("endDate"), Some("Дата окончания раньше даты начала"));
    }

    #[test]
    fn test_campaign_status_from_schedule() {
        let mut form = CampaignForm {
            subject: "Новый сингл".into(),
            body: "Слушайте везде".into(),
            scheduled_at: String::new(),
        };
        assert_eq!(form.build(false).status, CampaignStatus::Sending);
        assert_eq!(form.build(true).status, CampaignStatus::Draft);

        form.scheduled_at = "2026-11-01T10:30".into();
        assert!(form.validate().is_empty());
        let payload = form.build(false);
        assert_eq!(payload.status, CampaignStatus::Scheduled);
        assert_eq!(payload.scheduled_at.unwrap().to_rfc3339(), "2026-11-01T10:30:00+00:00");

        form.scheduled_at = "завтра".into();
        assert!(form.validate().contains("scheduledAt"));
    }

    #[test]
    fn test_pitch_requires_platform_and_track() {
        let keys: Vec<_> = PitchForm::default().validate().keys().collect();
        assert_eq!(keys, vec!["platformId", "trackId"]);
    }
}
