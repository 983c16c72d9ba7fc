//! # Artistdash - client core of the artist dashboard
//!
//! Everything the dashboard does short of drawing pixels: typed models of
//! the backend's records, form validation, the upload/submission workflow,
//! list search/filter/sort, admin moderation, optimistic list state and the
//! Supabase Edge Function client. Builds natively (CLI) and for wasm32
//! (the Leptos dashboard).
//!
//! ## Submission flow
//!
//! ```text
//! ┌────────────┐     ┌────────────┐     ┌────────────┐     ┌────────────┐
//! │    Form    │────▶│  Validate  │────▶│  Progress  │────▶│  Persist   │
//! │  (typed)   │     │ (skip for  │     │ (cosmetic, │     │ (Edge Fn,  │
//! │            │     │   drafts)  │     │  0..100)   │     │  envelope) │
//! └────────────┘     └────────────┘     └────────────┘     └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use artistdash::{ConcertForm, EdgeClient, FormSession, Submitter, TokioTicker};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EdgeClient::from_env()?;
//!     let mut session: FormSession<ConcertForm> = FormSession::new();
//!     session.open();
//!     // ... fill the form ...
//!     let saved = session
//!         .submit(&Submitter::default(), false, &TokioTicker, |payload, _| async move {
//!             client.create_concert(&payload).await
//!         })
//!         .await?;
//!     println!("Created {}", saved.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Backend records (concerts, banners, tickets, ...)
//! - [`validation`] - Field error map and format checks
//! - [`attachment`] - Picked files and their size limits
//! - [`forms`] - Typed form state per modal
//! - [`workflow`] - Submission workflow, progress ticker, liveness
//! - [`listing`] - Search, filter and sort pipeline
//! - [`moderation`] - Selection and bulk approve/reject
//! - [`overlay`] - Optimistic pending changes
//! - [`state`] - Profile, tier and coin balance store
//! - [`notify`] - Toast broadcaster
//! - [`config`] - Backend connection settings
//! - [`api`] - Edge Function client

// Core modules
pub mod error;
pub mod models;

// Input
pub mod attachment;
pub mod forms;
pub mod validation;

// Workflow
pub mod workflow;

// Views
pub mod listing;
pub mod moderation;
pub mod overlay;

// Shared state
pub mod notify;
pub mod state;

// Backend
pub mod api;
pub mod config;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ApiError, ApiResult, ConfigError, ModelError, ModerationError, ModerationResult, StateError,
    StateResult, SubmitError, SubmitResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    Account, Banner, BannerPlacement, Concert, EmailCampaign, Entity, EventType, Message,
    ModerationStatus, PitchingPlatform, Profile, SubscriptionTier, SupportTicket, TicketStatus,
    TrackSubmission, Video,
};

// =============================================================================
// Re-exports - Forms & validation
// =============================================================================

pub use attachment::{Attachment, AttachmentData, AttachmentKind};
pub use forms::{
    BannerForm, CampaignForm, ConcertForm, Form, PitchForm, ReplyForm, TicketForm, TrackForm,
    VideoForm,
};
pub use validation::FieldErrors;

// =============================================================================
// Re-exports - Workflow
// =============================================================================

#[cfg(not(target_arch = "wasm32"))]
pub use workflow::TokioTicker;
pub use workflow::{
    FormSession, ImmediateTicker, Liveness, ProgressConfig, SubmissionPhase, Submitter, Ticker,
};

// =============================================================================
// Re-exports - Lists & moderation
// =============================================================================

pub use listing::{DateRange, Facet, ListQuery, Listable, SortKey};
pub use moderation::{awaiting_review, bulk_approve, bulk_reject, BulkReport, Decision, Moderatable, Selection};
pub use overlay::{PendingOverlay, ReloadMark};

// =============================================================================
// Re-exports - State & notifications
// =============================================================================

pub use notify::{Notifier, Toast, ToastLevel};
pub use state::{Action, AppState, Store};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::{EdgeClient, Envelope, RetryPolicy};
pub use config::ApiConfig;
