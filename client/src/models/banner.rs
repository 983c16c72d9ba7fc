//! Banner placements.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Entity, ModerationStatus};

wire_enum! {
    /// Fixed site position a banner is shown in.
    pub enum BannerPlacement as "banner placement" {
        HomeTop => "home-top",
        HomeSidebar => "home-sidebar",
        Catalog => "catalog",
        Player => "player",
    }
}

/// A paid banner as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    pub placement: BannerPlacement,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ModerationStatus,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    /// Price in coins.
    #[serde(default)]
    pub price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderation_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Banner {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Banner {
    /// Click-through rate in percent, 0 when never shown.
    pub fn ctr(&self) -> f64 {
        if self.impressions == 0 {
            0.0
        } else {
            self.clicks as f64 * 100.0 / self.impressions as f64
        }
    }

    /// Whether `day` falls within the booked run (inclusive).
    pub fn is_running_on(&self, day: NaiveDate) -> bool {
        self.status == ModerationStatus::Approved
            && self.start_date.map_or(false, |start| start <= day)
            && self.end_date.map_or(true, |end| day <= end)
    }
}

/// Payload for `POST /banners`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBanner {
    pub title: String,
    pub image: Option<String>,
    pub link_url: Option<String>,
    pub placement: Option<BannerPlacement>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: ModerationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banner() -> Banner {
        Banner {
            id: "b-1".into(),
            title: "Новый альбом".into(),
            artist_name: "Nova".into(),
            image: Some("data:image/png;base64,AAAA".into()),
            link_url: None,
            placement: BannerPlacement::HomeTop,
            start_date: NaiveDate::from_ymd_opt(2026, 7, 1),
            end_date: NaiveDate::from_ymd_opt(2026, 7, 14),
            status: ModerationStatus::Approved,
            impressions: 2000,
            clicks: 50,
            price: 300,
            moderation_note: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_ctr() {
        let mut b = banner();
        assert!((b.ctr() - 2.5).abs() < 1e-9);
        b.impressions = 0;
        assert_eq!(b.ctr(), 0.0);
    }

    #[test]
    fn test_running_window_is_inclusive() {
        let b = banner();
        assert!(b.is_running_on(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()));
        assert!(b.is_running_on(NaiveDate::from_ymd_opt(2026, 7, 14).unwrap()));
        assert!(!b.is_running_on(NaiveDate::from_ymd_opt(2026, 7, 15).unwrap()));

        let pending = Banner { status: ModerationStatus::Pending, ..banner() };
        assert!(!pending.is_running_on(NaiveDate::from_ymd_opt(2026, 7, 2).unwrap()));
    }
}
