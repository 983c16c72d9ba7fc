//! Form validation primitives.
//!
//! Validators never fail: they return a [`FieldErrors`] map from field name
//! to a user-facing message, rendered inline under the offending input.
//! An empty map means the form is valid.
//!
//! # Example
//!
//! ```rust
//! use artistdash::validation::{FieldErrors, REQUIRED};
//!
//! let mut errors = FieldErrors::new();
//! errors.require_text("title", "   ");
//! errors.require_text("city", "Москва");
//! assert_eq!(errors.get("title"), Some(REQUIRED));
//! assert!(!errors.contains("city"));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Message for an empty required input.
pub const REQUIRED: &str = "Обязательное поле";

/// Message for an unselected required choice.
pub const SELECT_REQUIRED: &str = "Выберите значение";

/// Message for a missing required file.
pub const FILE_REQUIRED: &str = "Загрузите файл";

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("valid URL pattern")
});

static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid time pattern")
});

/// Field name → message. Ordered by field name so output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message; the first message for a field wins.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.errors.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Clears the message for one field, e.g. when the user edits it.
    pub fn clear_field(&mut self, field: &str) {
        self.errors.remove(field);
    }

    /// Blank or whitespace-only text is missing.
    pub fn require_text(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.insert(field, REQUIRED);
        }
    }

    /// An unset choice is missing.
    pub fn require_choice<T>(&mut self, field: &'static str, value: &Option<T>) {
        if value.is_none() {
            self.insert(field, SELECT_REQUIRED);
        }
    }

    /// An absent attachment is missing.
    pub fn require_file<T>(&mut self, field: &'static str, value: &Option<T>) {
        if value.is_none() {
            self.insert(field, FILE_REQUIRED);
        }
    }

    /// Optional URL: checked only when filled in.
    pub fn check_url(&mut self, field: &'static str, value: &str) {
        let value = value.trim();
        if !value.is_empty() && !is_valid_url(value) {
            self.insert(field, "Введите корректную ссылку (http:// или https://)");
        }
    }

    /// Text longer than `max` characters.
    pub fn check_max_len(&mut self, field: &'static str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.insert(field, format!("Не более {max} символов"));
        }
    }
}

impl IntoIterator for FieldErrors {
    type Item = (&'static str, String);
    type IntoIter = std::collections::btree_map::IntoIter<&'static str, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// `http(s)://` followed by a host.
pub fn is_valid_url(value: &str) -> bool {
    URL_RE.is_match(value)
}

/// 24-hour `HH:MM`.
pub fn is_valid_time(value: &str) -> bool {
    TIME_RE.is_match(value)
}

/// Parses a `YYYY-MM-DD` input; blank means unset.
pub fn parse_date_input(value: &str) -> Option<chrono::NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Splits a comma-separated tag input, dropping blanks and duplicates.
pub fn parse_tags(value: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            tags.push(tag.to_string());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_wins() {
        let mut errors = FieldErrors::new();
        errors.insert("date", REQUIRED);
        errors.insert("date", "Дата в прошлом");
        assert_eq!(errors.get("date"), Some(REQUIRED));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_require_helpers() {
        let mut errors = FieldErrors::new();
        errors.require_text("title", "");
        errors.require_choice::<u8>("type", &None);
        errors.require_file::<String>("banner", &None);
        errors.require_text("city", "Казань");
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["banner", "title", "type"]);
    }

    #[test]
    fn test_url_check_is_optional() {
        let mut errors = FieldErrors::new();
        errors.check_url("ticketUrl", "");
        assert!(errors.is_empty());
        errors.check_url("ticketUrl", "tickets.example");
        assert!(errors.contains("ticketUrl"));
        assert!(is_valid_url("https://tickets.example/show/42"));
    }

    #[test]
    fn test_time_format() {
        assert!(is_valid_time("19:00"));
        assert!(is_valid_time("00:59"));
        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("7:30"));
    }

    #[test]
    fn test_parse_inputs() {
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("2026-06-15"), chrono::NaiveDate::from_ymd_opt(2026, 6, 15));
        assert_eq!(parse_date_input("15.06.2026"), None);
        assert_eq!(parse_tags("rock, Rock, , indie"), vec!["rock", "indie"]);
    }
}
