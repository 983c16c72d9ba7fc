//! UI Components for the dashboard.
//!
//! # Layout Components
//! - [`Header`] - Section links, profile, tier and coin balance
//! - [`Footer`] - Page footer
//! - [`ToastStack`] - Notifications
//!
//! # Pages
//! - [`ConcertsPage`] - Concert list with status tabs and upload modal
//! - [`ModerationPage`] - Banner bookings with bulk approve/reject
//! - [`TicketsPage`] - Support tickets
//!
//! # Building blocks
//! - [`ListToolbar`] - Search, filters, date range and sort
//! - [`ConcertUploadModal`] - Concert form and submission
//! - [`ProgressBar`] - Submission progress

mod header;
mod footer;
mod toasts;
mod toolbar;
mod progress;
mod concerts;
mod concert_form;
mod moderation;
mod tickets;

pub use header::*;
pub use footer::*;
pub use toasts::*;
pub use toolbar::*;
pub use progress::*;
pub use concerts::*;
pub use concert_form::*;
pub use moderation::*;
pub use tickets::*;
