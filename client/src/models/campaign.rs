//! Email campaigns and pitching to third-party channels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

// =============================================================================
// Email campaigns
// =============================================================================

wire_enum! {
    pub enum CampaignStatus as "campaign status" {
        Draft => "draft",
        Scheduled => "scheduled",
        Sending => "sending",
        Sent => "sent",
        Failed => "failed",
    }
}

/// An email campaign sent to the artist's subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailCampaign {
    pub id: String,
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub recipient_count: u32,
    pub status: CampaignStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Percent, present once sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_rate: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click_rate: Option<f32>,
    pub created_at: DateTime<Utc>,
}

impl Entity for EmailCampaign {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload for `POST /campaigns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    pub subject: String,
    pub body: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: CampaignStatus,
}

// =============================================================================
// Pitching
// =============================================================================

wire_enum! {
    pub enum PitchChannel as "pitch channel" {
        Radio => "radio",
        Streaming => "streaming",
        Playlist => "playlist",
        Blog => "blog",
        Venue => "venue",
    }
}

wire_enum! {
    pub enum PitchStatus as "pitch status" {
        Idle => "idle",
        Pending => "pending",
        Accepted => "accepted",
        Rejected => "rejected",
    }
}

impl Default for PitchStatus {
    fn default() -> Self {
        PitchStatus::Idle
    }
}

/// A channel the artist can pitch to, with this artist's request state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchingPlatform {
    pub id: String,
    pub name: String,
    pub channel: PitchChannel,
    #[serde(default)]
    pub description: String,
    /// Cost in coins.
    pub cost: u64,
    #[serde(default)]
    pub status: PitchStatus,
}

impl Entity for PitchingPlatform {
    fn id(&self) -> &str {
        &self.id
    }
}

impl PitchingPlatform {
    /// A new request is possible when none is open.
    pub fn can_pitch(&self) -> bool {
        matches!(self.status, PitchStatus::Idle | PitchStatus::Rejected)
    }
}

/// Payload for `POST /pitching/requests`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPitchRequest {
    pub platform_id: String,
    pub track_id: String,
    #[serde(default)]
    pub message: String,
}

/// A submitted pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchRequest {
    pub id: String,
    pub platform_id: String,
    pub track_id: String,
    pub status: PitchStatus,
    pub cost: u64,
    pub created_at: DateTime<Utc>,
}

impl Entity for PitchRequest {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_rates_optional() {
        let json = r#"{
            "id": "e-1",
            "subject": "Новый сингл",
            "status": "scheduled",
            "recipientCount": 340,
            "createdAt": "2026-04-02T08:30:00Z"
        }"#;
        let campaign: EmailCampaign = serde_json::from_str(json).unwrap();
        assert_eq!(campaign.status, CampaignStatus::Scheduled);
        assert!(campaign.open_rate.is_none());
    }

    #[test]
    fn test_can_pitch() {
        let mut platform = PitchingPlatform {
            id: "p-1".into(),
            name: "Радио Рекорд".into(),
            channel: PitchChannel::Radio,
            description: String::new(),
            cost: 150,
            status: PitchStatus::Idle,
        };
        assert!(platform.can_pitch());
        platform.status = PitchStatus::Pending;
        assert!(!platform.can_pitch());
    }
}
