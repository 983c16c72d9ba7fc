//! Types shared by the dashboard views.

use std::fmt;

use artistdash::ApiError;

// =============================================================================
// Remote data
// =============================================================================

/// State of a list fetched from the backend.
#[derive(Clone, Debug, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
    /// User-facing message.
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Loadable::Ready(value),
            Err(e) => {
                log::error!("load failed: {}", e);
                Loadable::Failed(e.user_message())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(message) => Some(message),
            _ => None,
        }
    }
}

// =============================================================================
// Navigation
// =============================================================================

/// Top-level dashboard sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Concerts,
    Moderation,
    Tickets,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Concerts, Section::Moderation, Section::Tickets];

    pub fn path(&self) -> &'static str {
        match self {
            Section::Concerts => "/",
            Section::Moderation => "/moderation",
            Section::Tickets => "/tickets",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Concerts => "Концерты",
            Section::Moderation => "Модерация",
            Section::Tickets => "Поддержка",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loadable_from_backend_error() {
        let loaded: Loadable<Vec<u8>> = Loadable::from_result(Err(ApiError::Backend("Нет доступа".into())));
        assert_eq!(loaded.error(), Some("Нет доступа"));
        assert!(loaded.ready().is_none());
        assert!(!loaded.is_loading());
    }

    #[test]
    fn test_sections_have_distinct_paths() {
        let mut paths: Vec<_> = Section::ALL.iter().map(Section::path).collect();
        paths.dedup();
        assert_eq!(paths.len(), Section::ALL.len());
        assert_eq!(Section::Concerts.path(), "/");
    }
}
