//! Artist profile.

use serde::{Deserialize, Serialize};

wire_enum! {
    pub enum SubscriptionTier as "subscription tier" {
        Free => "free",
        Basic => "basic",
        Pro => "pro",
        Premium => "premium",
    }
}

impl Default for SubscriptionTier {
    fn default() -> Self {
        SubscriptionTier::Free
    }
}

impl SubscriptionTier {
    /// Banner booking and pitching are paid-tier features.
    pub fn includes_promotion(&self) -> bool {
        *self >= SubscriptionTier::Basic
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// `GET /profile`: who is signed in and what they can spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub profile: Profile,
    #[serde(default)]
    pub tier: SubscriptionTier,
    /// Display only; the economy lives server-side.
    #[serde(default)]
    pub coins: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_defaults() {
        let json = r#"{"profile":{"id":"u-1","displayName":"Иван"}}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.profile.display_name, "Иван");
        assert_eq!(account.tier, SubscriptionTier::Free);
        assert_eq!(account.coins, 0);
    }

    #[test]
    fn test_promotion_needs_paid_tier() {
        assert!(!SubscriptionTier::Free.includes_promotion());
        assert!(SubscriptionTier::Basic.includes_promotion());
        assert!(SubscriptionTier::Premium.includes_promotion());
    }
}
