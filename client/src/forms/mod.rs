//! Typed form state for every submission modal.
//!
//! A form holds raw input values (strings as typed, choices as `Option`,
//! files as [`Attachment`](crate::attachment::Attachment)) and knows how to
//! validate itself and assemble the backend payload. Forms are re-created
//! from `Default` on every open/close cycle.
//!
//! - [`media`] - Concert, video and track-test uploads
//! - [`promo`] - Banner booking, email campaigns, pitching
//! - [`support`] - Support tickets and replies

use serde::{Deserialize, Deserializer};
use std::str::FromStr;

use crate::attachment::Attachment;
use crate::validation::FieldErrors;

pub mod media;
pub mod promo;
pub mod support;

pub use media::*;
pub use promo::*;
pub use support::*;

/// A submission form.
pub trait Form: Default + Clone {
    /// What the persistence callback receives.
    type Payload;

    /// Fields that must be filled for a non-draft submission.
    const REQUIRED: &'static [&'static str];

    /// Pure check of the current input. Empty result means valid.
    fn validate(&self) -> FieldErrors;

    /// Assembles the payload. Drafts are built from whatever is filled in.
    fn build(&self, is_draft: bool) -> Self::Payload;

    /// Back to initial values.
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Picked files, so their previews can be released on close.
    fn attachments(&self) -> Vec<&Attachment> {
        Vec::new()
    }
}

/// Treats `""` (an untouched `<select>`) as no choice.
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Parses an optional whole-number input; blank is `None`, garbage is `Err`.
pub(crate) fn parse_amount(value: &str) -> Result<Option<u32>, ()> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| ())
}

/// Trimmed text, or `None` when blank.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(""), Ok(None));
        assert_eq!(parse_amount(" 1500 "), Ok(Some(1500)));
        assert_eq!(parse_amount("полторы"), Err(()));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  "), None);
        assert_eq!(non_blank(" https://x.ru "), Some("https://x.ru".to_string()));
    }
}
