//! Browser-side services.
//!
//! # Services
//!
//! - [`api`] - Edge Function client shared through context, list loading
//! - [`files`] - File inputs to [`Attachment`](artistdash::Attachment)s
//! - [`ticker`] - `gloo-timers` based progress and retry timing

pub mod api;
pub mod files;
pub mod ticker;

pub use api::*;
pub use files::*;
pub use ticker::*;
