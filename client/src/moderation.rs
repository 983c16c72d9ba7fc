//! Admin moderation: selection, single decisions and bulk actions.
//!
//! Bulk actions call the single-item action once per selected id, in the
//! order the ids were selected. There is no atomicity: each call stands on
//! its own and a failure does not stop the rest. The [`BulkReport`] records
//! every outcome so one toast can be shown per item.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::{ApiResult, ModerationError, ModerationResult};
use crate::models::{Banner, Concert, Entity, ModerationStatus, TrackSubmission, Video};
use crate::notify::Notifier;

// =============================================================================
// Moderatable
// =============================================================================

/// Content an admin can approve or reject.
pub trait Moderatable: Entity {
    fn moderation_status(&self) -> ModerationStatus;

    fn set_moderation(&mut self, status: ModerationStatus, note: Option<String>);
}

macro_rules! moderatable {
    ($ty:ty, $note:ident) => {
        impl Moderatable for $ty {
            fn moderation_status(&self) -> ModerationStatus {
                self.status
            }

            fn set_moderation(&mut self, status: ModerationStatus, note: Option<String>) {
                self.status = status;
                self.$note = note;
            }
        }
    };
}

moderatable!(Concert, rejection_reason);
moderatable!(Video, rejection_reason);
moderatable!(TrackSubmission, rejection_reason);
moderatable!(Banner, moderation_note);

/// An admin's verdict on one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "note", rename_all = "lowercase")]
pub enum Decision {
    Approve,
    /// Carries the trimmed, non-empty note.
    Reject(String),
}

impl Decision {
    /// Builds a rejection; a blank note is refused.
    pub fn reject(note: &str) -> ModerationResult<Self> {
        let note = note.trim();
        if note.is_empty() {
            return Err(ModerationError::MissingNote);
        }
        Ok(Decision::Reject(note.to_string()))
    }

    /// Applies the verdict to a local copy.
    pub fn apply_to<T: Moderatable>(&self, item: &mut T) {
        match self {
            Decision::Approve => item.set_moderation(ModerationStatus::Approved, None),
            Decision::Reject(note) => item.set_moderation(ModerationStatus::Rejected, Some(note.clone())),
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            Decision::Approve => "одобрено",
            Decision::Reject(_) => "отклонено",
        }
    }
}

/// Items still waiting for a decision; only these can be selected.
pub fn awaiting_review<T: Moderatable + Clone>(items: &[T]) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.moderation_status().is_awaiting_review())
        .cloned()
        .collect()
}

// =============================================================================
// Selection
// =============================================================================

/// Checked rows of an admin table, in the order they were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn select(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.is_selected(&id) {
            self.ids.push(id);
        }
    }

    pub fn deselect(&mut self, id: &str) {
        self.ids.retain(|s| s != id);
    }

    /// Checkbox click.
    pub fn toggle(&mut self, id: &str) {
        if self.is_selected(id) {
            self.deselect(id);
        } else {
            self.select(id);
        }
    }

    /// Header checkbox: selects every visible item, or clears when all already are.
    pub fn toggle_all<'a, T: Entity + 'a>(&mut self, visible: impl IntoIterator<Item = &'a T>) {
        let visible: Vec<&str> = visible.into_iter().map(Entity::id).collect();
        if !visible.is_empty() && visible.iter().all(|id| self.is_selected(id)) {
            self.ids.retain(|s| !visible.contains(&s.as_str()));
        } else {
            for id in visible {
                self.select(id);
            }
        }
    }

    /// Drops ids that are no longer in `items`.
    pub fn retain_existing<T: Entity>(&mut self, items: &[T]) {
        self.ids.retain(|id| items.iter().any(|item| item.id() == id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// =============================================================================
// Bulk actions
// =============================================================================

/// Per-item outcome of a bulk action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkReport {
    pub decision: Decision,
    pub succeeded: Vec<String>,
    /// `(id, message)` pairs.
    pub failed: Vec<(String, String)>,
}

impl BulkReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Applies the decision to local copies of the items that succeeded.
    pub fn apply_to<T: Moderatable>(&self, items: &mut [T]) {
        for item in items.iter_mut() {
            if self.succeeded.iter().any(|id| id == item.id()) {
                self.decision.apply_to(item);
            }
        }
    }

    /// One toast per outcome.
    pub fn notify(&self, notifier: &Notifier) {
        for id in &self.succeeded {
            notifier.success(format!("#{}: {}", id, self.decision.verb()));
        }
        for (id, message) in &self.failed {
            notifier.error(format!("#{}: {}", id, message));
        }
    }
}

/// Runs `call` once per selected id with `decision`.
pub async fn run_bulk<F, Fut>(
    selection: &Selection,
    decision: Decision,
    mut call: F,
) -> ModerationResult<BulkReport>
where
    F: FnMut(String, Decision) -> Fut,
    Fut: Future<Output = ApiResult<()>>,
{
    if selection.is_empty() {
        return Err(ModerationError::EmptySelection);
    }

    let mut report = BulkReport { decision: decision.clone(), succeeded: Vec::new(), failed: Vec::new() };
    for id in selection.ids() {
        match call(id.clone(), decision.clone()).await {
            Ok(()) => report.succeeded.push(id.clone()),
            Err(e) => {
                log::warn!("moderation of {} failed: {}", id, e);
                report.failed.push((id.clone(), e.user_message()));
            }
        }
    }

    log::info!(
        "bulk {:?}: {}/{} succeeded",
        report.decision,
        report.succeeded.len(),
        report.total()
    );
    Ok(report)
}

pub async fn bulk_approve<F, Fut>(selection: &Selection, mut approve_one: F) -> ModerationResult<BulkReport>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = ApiResult<()>>,
{
    run_bulk(selection, Decision::Approve, |id, _| approve_one(id)).await
}

/// The note is checked before any call is made.
pub async fn bulk_reject<F, Fut>(
    selection: &Selection,
    note: &str,
    mut reject_one: F,
) -> ModerationResult<BulkReport>
where
    F: FnMut(String, String) -> Fut,
    Fut: Future<Output = ApiResult<()>>,
{
    let decision = Decision::reject(note)?;
    run_bulk(selection, decision, |id, decision| {
        let note = match decision {
            Decision::Reject(note) => note,
            Decision::Approve => String::new(),
        };
        reject_one(id, note)
    })
    .await
}
