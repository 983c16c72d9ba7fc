//! Error types for the artist dashboard client.
//!
//! - [`ConfigError`] - Missing or malformed configuration
//! - [`ApiError`] - Edge Function calls (transport, HTTP status, envelope)
//! - [`ModelError`] - Domain value parsing and invariants
//! - [`SubmitError`] - Submission workflow outcomes
//! - [`ModerationError`] - Single and bulk moderation actions
//! - [`StateError`] - Optimistic list bookkeeping
//!
//! Form validation is not an error path: validators return
//! [`FieldErrors`](crate::validation::FieldErrors). It only becomes a
//! [`SubmitError`] when a non-draft submission is blocked by it.

use thiserror::Error;

use crate::validation::FieldErrors;

/// Fallback shown to users when an error carries no message at all.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Неизвестная ошибка";

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while loading client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is absent or empty.
    #[error("Missing {0} environment variable")]
    MissingVar(&'static str),

    /// Value present but unusable.
    #[error("Invalid value for {name}: {message}")]
    InvalidValue { name: &'static str, message: String },
}

// =============================================================================
// API Errors
// =============================================================================

/// Errors from the Edge Function client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never produced a response (DNS, connect, TLS, aborted fetch).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx status without a readable `{ success, error }` envelope.
    #[error("Server error ({status}): {body}")]
    Status { status: u16, body: String },

    /// Envelope reported `success: false`.
    #[error("{0}")]
    Backend(String),

    /// Envelope reported success but carried no `data`.
    #[error("Response has no data")]
    MissingData,

    /// Body was not valid JSON for the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client could not be configured.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Request rejected locally before sending.
    #[error("Invalid request: {0}")]
    Model(#[from] ModelError),
}

impl ApiError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Only transport failures and 5xx statuses qualify; an explicit
    /// `success: false` from the backend is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Message suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Backend(error) => best_effort_message(Some(error), None),
            other => best_effort_message(None, Some(&other.to_string())),
        }
    }
}

/// `error || message || "Неизвестная ошибка"`, skipping blank strings.
pub fn best_effort_message(error: Option<&str>, message: Option<&str>) -> String {
    error
        .filter(|e| !e.trim().is_empty())
        .or_else(|| message.filter(|m| !m.trim().is_empty()))
        .unwrap_or(UNKNOWN_ERROR_MESSAGE)
        .to_string()
}

// =============================================================================
// Model Errors
// =============================================================================

/// Errors raised by domain types.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    /// String does not name a known variant.
    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// Ticket ratings are 1 to 5.
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
}

// =============================================================================
// Submission Errors
// =============================================================================

/// Why a submission did not complete.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Non-draft submission blocked by validation.
    #[error("Form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),

    /// Another submission is still in flight.
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    /// The persistence callback failed.
    #[error("{0}")]
    Persist(#[from] ApiError),
}

impl SubmitError {
    /// Message suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Invalid(_) => "Заполните обязательные поля".to_string(),
            SubmitError::AlreadySubmitting => "Отправка уже выполняется".to_string(),
            SubmitError::Persist(e) => e.user_message(),
        }
    }
}

// =============================================================================
// Moderation Errors
// =============================================================================

/// Errors from moderation actions.
#[derive(Debug, Error)]
pub enum ModerationError {
    /// Reject was requested without a reason.
    #[error("A rejection note is required")]
    MissingNote,

    /// Bulk action with nothing selected.
    #[error("No items selected")]
    EmptySelection,

    /// Backend call failed.
    #[error("{0}")]
    Api(#[from] ApiError),
}

impl ModerationError {
    /// Message suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            ModerationError::MissingNote => "Укажите причину отклонения".to_string(),
            ModerationError::EmptySelection => "Ничего не выбрано".to_string(),
            ModerationError::Api(e) => e.user_message(),
        }
    }
}

// =============================================================================
// State Errors
// =============================================================================

/// Errors from local list bookkeeping.
#[derive(Debug, Error, PartialEq)]
pub enum StateError {
    /// No pending change under this key.
    #[error("No pending change for '{0}'")]
    UnknownPending(String),

    /// No confirmed item with this id.
    #[error("Item '{0}' not found")]
    NotFound(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type for submissions.
pub type SubmitResult<T> = Result<T, SubmitError>;

/// Result type for moderation.
pub type ModerationResult<T> = Result<T, ModerationError>;

/// Result type for local state changes.
pub type StateResult<T> = Result<T, StateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_effort_message_chain() {
        assert_eq!(best_effort_message(Some("Quota exceeded"), Some("HTTP 400")), "Quota exceeded");
        assert_eq!(best_effort_message(Some("  "), Some("HTTP 400")), "HTTP 400");
        assert_eq!(best_effort_message(None, None), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn test_backend_error_user_message() {
        let err = ApiError::Backend(String::new());
        assert_eq!(err.user_message(), UNKNOWN_ERROR_MESSAGE);

        let err = ApiError::Backend("Banner not found".into());
        assert_eq!(err.user_message(), "Banner not found");
    }

    #[test]
    fn test_local_errors_have_russian_toasts() {
        assert_eq!(SubmitError::AlreadySubmitting.user_message(), "Отправка уже выполняется");
        assert_eq!(SubmitError::Invalid(FieldErrors::new()).user_message(), "Заполните обязательные поля");
        assert_eq!(ModerationError::MissingNote.user_message(), "Укажите причину отклонения");
        assert_eq!(ModerationError::EmptySelection.user_message(), "Ничего не выбрано");
    }

    #[test]
    fn test_retry_classification() {
        assert!(ApiError::Status { status: 503, body: String::new() }.is_retryable());
        assert!(!ApiError::Status { status: 404, body: String::new() }.is_retryable());
        assert!(!ApiError::Backend("nope".into()).is_retryable());
    }

    #[test]
    fn test_error_conversion_chain() {
        let api_err = ApiError::Backend("Duplicate concert".into());
        let submit_err: SubmitError = api_err.into();
        assert_eq!(submit_err.user_message(), "Duplicate concert");

        let moderation_err: ModerationError = ApiError::Backend("Banner not found".into()).into();
        assert_eq!(moderation_err.user_message(), "Banner not found");

        let config_err = ConfigError::MissingVar("SUPABASE_PROJECT_ID");
        let api_err: ApiError = config_err.into();
        assert!(api_err.to_string().contains("SUPABASE_PROJECT_ID"));
    }
}
