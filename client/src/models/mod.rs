//! Domain models exchanged with the Edge Function backend.
//!
//! - [`media`] - Concerts, videos and track tests (user-submitted content)
//! - [`banner`] - Paid banner placements
//! - [`ticket`] - Support tickets and their message threads
//! - [`campaign`] - Email campaigns and pitching
//! - [`profile`] - Artist profile and subscription tier
//!
//! All records use camelCase on the wire. Enum variants serialize to the
//! exact strings the backend stores (`in_progress`, `home-top`, ...).

use serde::{Deserialize, Serialize};

/// Declares a fieldless enum whose serde name, `as_str` and `FromStr` agree.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_lowercase();
                match normalized.as_str() {
                    $( $wire => Ok($name::$variant), )+
                    _ => Err($crate::error::ModelError::UnknownVariant { kind: $kind, value: s.to_string() }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.pad(self.as_str())
            }
        }
    };
}

pub mod banner;
pub mod campaign;
pub mod media;
pub mod profile;
pub mod ticket;

pub use banner::*;
pub use campaign::*;
pub use media::*;
pub use profile::*;
pub use ticket::*;

// =============================================================================
// Shared Types
// =============================================================================

/// Anything the backend identifies by a string id.
pub trait Entity {
    fn id(&self) -> &str;
}

wire_enum! {
    /// Lifecycle tag on user-submitted content, advanced by explicit actions.
    pub enum ModerationStatus as "moderation status" {
        Draft => "draft",
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

impl Default for ModerationStatus {
    fn default() -> Self {
        ModerationStatus::Draft
    }
}

impl ModerationStatus {
    /// Status a fresh submission is created with.
    pub fn for_submission(is_draft: bool) -> Self {
        if is_draft {
            ModerationStatus::Draft
        } else {
            ModerationStatus::Pending
        }
    }

    /// Owners may edit drafts and rejected items; the edit button is hidden otherwise.
    pub fn allows_owner_edit(&self) -> bool {
        matches!(self, ModerationStatus::Draft | ModerationStatus::Rejected)
    }

    /// Waiting for an admin decision.
    pub fn is_awaiting_review(&self) -> bool {
        matches!(self, ModerationStatus::Pending)
    }
}

/// Engagement counters shown on cards and used for sorting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub likes: u64,
}

/// Ticket price bounds in roubles; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

impl PriceRange {
    /// `min <= max` when both are set.
    pub fn is_consistent(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use std::str::FromStr;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&ModerationStatus::Pending).unwrap(), "\"pending\"");
        assert_eq!(ModerationStatus::from_str(" Approved ").unwrap(), ModerationStatus::Approved);
        assert!(matches!(
            ModerationStatus::from_str("archived"),
            Err(ModelError::UnknownVariant { kind: "moderation status", .. })
        ));
    }

    #[test]
    fn test_owner_edit_predicate() {
        assert!(ModerationStatus::Draft.allows_owner_edit());
        assert!(ModerationStatus::Rejected.allows_owner_edit());
        assert!(!ModerationStatus::Pending.allows_owner_edit());
        assert!(!ModerationStatus::Approved.allows_owner_edit());
    }

    #[test]
    fn test_price_range_consistency() {
        assert!(PriceRange { min: Some(500), max: Some(1500) }.is_consistent());
        assert!(!PriceRange { min: Some(2000), max: Some(1500) }.is_consistent());
        assert!(PriceRange { min: None, max: Some(10) }.is_consistent());
    }
}
