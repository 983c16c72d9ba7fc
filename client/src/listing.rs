//! Client-side search, filter and sort for list and grid views.
//!
//! The pipeline is pure: it borrows the collection and returns references
//! into it, so views can recompute on every keystroke.
//!
//! 1. Free-text search, case-insensitive, over each entity's text fields
//! 2. Exact-match facet filters, all must hold
//! 3. Inclusive date range, blank bounds ignored
//! 4. Stable sort

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::models::{
    Banner, Concert, Engagement, Entity, SupportTicket, TrackSubmission, Video,
};
use crate::validation::parse_date_input;

// =============================================================================
// Listable
// =============================================================================

/// Categorical attribute a list can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Facet {
    Status,
    City,
    Category,
    EventType,
    Priority,
    Placement,
}

impl Facet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Status => "status",
            Facet::City => "city",
            Facet::Category => "category",
            Facet::EventType => "event-type",
            Facet::Priority => "priority",
            Facet::Placement => "placement",
        }
    }
}

impl FromStr for Facet {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "status" => Ok(Facet::Status),
            "city" => Ok(Facet::City),
            "category" => Ok(Facet::Category),
            "event-type" | "type" => Ok(Facet::EventType),
            "priority" => Ok(Facet::Priority),
            "placement" => Ok(Facet::Placement),
            _ => Err(ModelError::UnknownVariant { kind: "facet", value: s.to_string() }),
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// An entity shown in a filterable list.
pub trait Listable: Entity {
    /// Text fields matched by the search box.
    fn search_fields(&self) -> Vec<&str>;

    /// Wire value of `facet`, `None` if unset or not applicable.
    fn facet(&self, facet: Facet) -> Option<&str>;

    fn created_at(&self) -> DateTime<Utc>;

    /// Date used by range filters and date sorts.
    fn list_date(&self) -> Option<NaiveDate> {
        Some(self.created_at().date_naive())
    }

    fn engagement(&self) -> Engagement {
        Engagement::default()
    }
}

impl Listable for Concert {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.title.as_str(),
            self.city.as_str(),
            self.venue.as_str(),
            self.description.as_str(),
        ];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.status.as_str()),
            Facet::City => Some(self.city.as_str()),
            Facet::EventType => self.event_type.map(|t| t.as_str()),
            _ => None,
        }
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn list_date(&self) -> Option<NaiveDate> {
        self.date
    }

    fn engagement(&self) -> Engagement {
        self.stats
    }
}

impl Listable for Video {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.description.as_str()];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.status.as_str()),
            Facet::Category => self.category.map(|c| c.as_str()),
            _ => None,
        }
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn engagement(&self) -> Engagement {
        self.stats
    }
}

impl Listable for TrackSubmission {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.artist.as_str(), self.genre.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.status.as_str()),
            Facet::Category => Some(self.genre.as_str()),
            _ => None,
        }
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Listable for Banner {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.artist_name.as_str()]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.status.as_str()),
            Facet::Placement => Some(self.placement.as_str()),
            _ => None,
        }
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn list_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    fn engagement(&self) -> Engagement {
        Engagement { views: self.impressions, clicks: self.clicks, likes: 0 }
    }
}

impl Listable for SupportTicket {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.subject.as_str(), self.id.as_str()];
        fields.extend(self.messages.iter().map(|m| m.text.as_str()));
        fields
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.status.as_str()),
            Facet::Category => Some(self.category.as_str()),
            Facet::Priority => Some(self.priority.as_str()),
            _ => None,
        }
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// =============================================================================
// Query
// =============================================================================

/// Sort orders offered by list toolbars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    DateAsc,
    DateDesc,
    /// Most viewed first.
    Views,
    /// Most clicked first.
    Clicks,
    /// Most recently created first.
    #[default]
    Newest,
}

impl SortKey {
    pub const ALL: &'static [SortKey] =
        &[SortKey::DateAsc, SortKey::DateDesc, SortKey::Views, SortKey::Clicks, SortKey::Newest];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateAsc => "date-asc",
            SortKey::DateDesc => "date-desc",
            SortKey::Views => "views",
            SortKey::Clicks => "clicks",
            SortKey::Newest => "newest",
        }
    }

    fn compare<T: Listable>(&self, a: &T, b: &T) -> Ordering {
        match self {
            SortKey::DateAsc => a.list_date().cmp(&b.list_date()),
            SortKey::DateDesc => b.list_date().cmp(&a.list_date()),
            SortKey::Views => b.engagement().views.cmp(&a.engagement().views),
            SortKey::Clicks => b.engagement().clicks.cmp(&a.engagement().clicks),
            SortKey::Newest => b.created_at().cmp(&a.created_at()),
        }
    }
}

impl FromStr for SortKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| ModelError::UnknownVariant { kind: "sort key", value: s.to_string() })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Inclusive date bounds; `None` means unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// From two date inputs; blank or unparsable strings leave that side open.
    pub fn from_inputs(from: &str, to: &str) -> Self {
        Self { from: parse_date_input(from), to: parse_date_input(to) }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Undated items only pass an unbounded range.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Search box, filter dropdowns, date pickers and sort select of one toolbar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListQuery {
    pub search: String,
    pub filters: BTreeMap<Facet, String>,
    pub date_range: DateRange,
    /// `None` keeps collection order.
    pub sort: Option<SortKey>,
}

/// Dropdown value meaning "no filter".
pub const ALL_VALUES: &str = "all";

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    /// Sets or clears a facet filter. Blank and `"all"` clear it.
    pub fn filter(mut self, facet: Facet, value: impl Into<String>) -> Self {
        self.set_filter(facet, value);
        self
    }

    pub fn set_filter(&mut self, facet: Facet, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() || value == ALL_VALUES {
            self.filters.remove(&facet);
        } else {
            self.filters.insert(facet, value);
        }
    }

    pub fn dates(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }

    /// Whether `item` passes search, filters and date range.
    pub fn matches<T: Listable>(&self, item: &T) -> bool {
        matches_search(item, &self.search)
            && self.filters.iter().all(|(facet, value)| item.facet(*facet) == Some(value.as_str()))
            && self.date_range.contains(item.list_date())
    }

    /// Runs the whole pipeline.
    pub fn apply<'a, T: Listable>(&self, items: &'a [T]) -> Vec<&'a T> {
        let mut visible: Vec<&T> = items.iter().filter(|item| self.matches(*item)).collect();
        if let Some(key) = self.sort {
            // stable
            visible.sort_by(|a, b| key.compare(*a, *b));
        }
        visible
    }
}

fn matches_search<T: Listable>(item: &T, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    item.search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(&query))
}

// =============================================================================
// Summaries
// =============================================================================

/// Count of items per facet value, for tab badges.
pub fn facet_counts<T: Listable>(items: &[T], facet: Facet) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for value in items.iter().filter_map(|item| item.facet(facet)) {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Count of items per status.
pub fn status_counts<T: Listable>(items: &[T]) -> BTreeMap<&str, usize> {
    facet_counts(items, Facet::Status)
}

/// Sorted distinct non-blank values of `facet`, for filter dropdowns.
pub fn distinct_values<T: Listable>(items: &[T], facet: Facet) -> Vec<&str> {
    facet_counts(items, facet)
        .into_keys()
        .filter(|v| !v.trim().is_empty())
        .collect()
}
