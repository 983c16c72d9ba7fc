//! Upload/submission workflow shared by every form modal.
//!
//! ```text
//! idle ─▶ validating ─┬─▶ invalid (errors shown, back to idle)
//!                     └─▶ submitting 0..100 ─▶ persist ─┬─▶ success (reset, close)
//!                                                       └─▶ failure (toast, keep form)
//! ```
//!
//! Drafts skip validation entirely. The progress phase is a cosmetic
//! animation driven by a [`Ticker`]; it has no relation to transfer progress.
//! A [`Submitter`] is shared by every trigger of one modal so a second
//! submission while one is in flight is rejected instead of persisted twice.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ApiError, SubmitError, SubmitResult};
use crate::forms::Form;
use crate::validation::FieldErrors;

// =============================================================================
// Timing
// =============================================================================

/// Source of delays for the progress animation and retry back-off.
pub trait Ticker {
    fn sleep(&self, period: Duration) -> impl Future<Output = ()>;
}

/// Never waits. Used by the CLI with `--no-animation` and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateTicker;

impl Ticker for ImmediateTicker {
    fn sleep(&self, _period: Duration) -> impl Future<Output = ()> {
        std::future::ready(())
    }
}

/// Tokio timer, for native builds.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTicker;

#[cfg(not(target_arch = "wasm32"))]
impl Ticker for TokioTicker {
    fn sleep(&self, period: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(period)
    }
}

/// Shape of the fake progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressConfig {
    /// Percent added per tick.
    pub step: u8,
    pub interval: Duration,
}

impl ProgressConfig {
    /// Concert, video, banner and ticket uploads.
    pub const UPLOAD: ProgressConfig = ProgressConfig { step: 5, interval: Duration::from_millis(100) };

    /// Track tests animate a little slower.
    pub const TRACK_TEST: ProgressConfig = ProgressConfig { step: 5, interval: Duration::from_millis(150) };

    /// Jump straight to 100.
    pub const INSTANT: ProgressConfig = ProgressConfig { step: 100, interval: Duration::ZERO };

    /// Progress values after each tick, always ending at exactly 100.
    pub fn steps(&self) -> impl Iterator<Item = u8> {
        let step = self.step.clamp(1, 100);
        let mut current: u8 = 0;
        std::iter::from_fn(move || {
            if current >= 100 {
                return None;
            }
            current = current.saturating_add(step).min(100);
            Some(current)
        })
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self::UPLOAD
    }
}

// =============================================================================
// Phases
// =============================================================================

/// Where one submission attempt currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    /// Blocked by validation; the form is back to idle with inline errors.
    Invalid(FieldErrors),
    Submitting { progress: u8 },
    Succeeded,
    /// Persistence failed with this toast message; the form is kept.
    Failed(String),
}

impl SubmissionPhase {
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmissionPhase::Validating | SubmissionPhase::Submitting { .. })
    }

    pub fn progress(&self) -> u8 {
        match self {
            SubmissionPhase::Submitting { progress } => *progress,
            SubmissionPhase::Succeeded => 100,
            _ => 0,
        }
    }
}

// =============================================================================
// Submitter
// =============================================================================

/// Runs submissions for one modal; clones share the in-flight flag.
#[derive(Debug, Clone, Default)]
pub struct Submitter {
    in_flight: Arc<AtomicBool>,
    progress: ProgressConfig,
}

/// Clears the in-flight flag when the submission ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Submitter {
    pub fn new(progress: ProgressConfig) -> Self {
        Self {
            in_flight: Arc::new(AtomicBool::new(false)),
            progress,
        }
    }

    /// Drives the submit button's disabled state.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn progress_config(&self) -> ProgressConfig {
        self.progress
    }

    /// Validates (unless draft), animates progress, then calls `persist`
    /// once with the payload and the draft flag.
    pub async fn submit<F, T, P, Fut, Tk>(
        &self,
        form: &F,
        is_draft: bool,
        ticker: &Tk,
        mut on_phase: impl FnMut(SubmissionPhase),
        persist: P,
    ) -> SubmitResult<T>
    where
        F: Form,
        P: FnOnce(F::Payload, bool) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
        Tk: Ticker,
    {
        let _guard = InFlight::acquire(&self.in_flight).ok_or(SubmitError::AlreadySubmitting)?;

        if !is_draft {
            on_phase(SubmissionPhase::Validating);
            let errors = form.validate();
            if !errors.is_empty() {
                log::debug!("submission blocked by {} invalid field(s)", errors.len());
                on_phase(SubmissionPhase::Invalid(errors.clone()));
                return Err(SubmitError::Invalid(errors));
            }
        }

        let payload = form.build(is_draft);

        on_phase(SubmissionPhase::Submitting { progress: 0 });
        for progress in self.progress.steps() {
            ticker.sleep(self.progress.interval).await;
            on_phase(SubmissionPhase::Submitting { progress });
        }

        match persist(payload, is_draft).await {
            Ok(saved) => {
                on_phase(SubmissionPhase::Succeeded);
                Ok(saved)
            }
            Err(e) => {
                log::warn!("submission failed: {}", e);
                on_phase(SubmissionPhase::Failed(e.user_message()));
                Err(SubmitError::Persist(e))
            }
        }
    }
}

// =============================================================================
// Form session
// =============================================================================

/// State of one modal between open and close.
#[derive(Debug, Clone, Default)]
pub struct FormSession<F: Form> {
    form: F,
    errors: FieldErrors,
    phase: SubmissionPhase,
    open: bool,
    released: Vec<String>,
}

impl<F: Form> FormSession<F> {
    pub fn new() -> Self {
        Self {
            form: F::default(),
            errors: FieldErrors::new(),
            phase: SubmissionPhase::Idle,
            open: false,
            released: Vec::new(),
        }
    }

    /// Opens with fresh initial values.
    pub fn open(&mut self) -> Vec<String> {
        let released = self.reset();
        self.open = true;
        released
    }

    /// Closes and discards input. Returns object URLs to revoke.
    ///
    /// An in-flight request is not cancelled; guard its result with a
    /// [`Liveness`] if it must not land after close.
    pub fn close(&mut self) -> Vec<String> {
        let released = self.reset();
        self.open = false;
        released
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    /// Edits the form; the edited field's inline error is cleared.
    pub fn edit(&mut self, field: &str, apply: impl FnOnce(&mut F)) {
        apply(&mut self.form);
        self.errors.clear_field(field);
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    /// Runs `submitter` on a snapshot of the form.
    ///
    /// Success resets and closes the session. Validation failure stores the
    /// inline errors. Persistence failure keeps the input for a retry.
    pub async fn submit<T, P, Fut, Tk>(
        &mut self,
        submitter: &Submitter,
        is_draft: bool,
        ticker: &Tk,
        persist: P,
    ) -> SubmitResult<T>
    where
        P: FnOnce(F::Payload, bool) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
        Tk: Ticker,
    {
        let snapshot = self.form.clone();
        let phase = &mut self.phase;
        let result = submitter
            .submit(&snapshot, is_draft, ticker, |p| *phase = p, persist)
            .await;

        let released = self.finish(&result);
        self.released.extend(released);
        result
    }

    /// Records a phase reported by a [`Submitter`] driven from outside.
    pub fn set_phase(&mut self, phase: SubmissionPhase) {
        self.phase = phase;
    }

    /// Applies the outcome of a submission run on a snapshot of this form.
    ///
    /// Returns object URLs to revoke when the session was reset.
    pub fn finish<T>(&mut self, result: &SubmitResult<T>) -> Vec<String> {
        match result {
            Ok(_) => self.close(),
            Err(SubmitError::Invalid(errors)) => {
                self.errors = errors.clone();
                Vec::new()
            }
            Err(SubmitError::Persist(e)) => {
                self.phase = SubmissionPhase::Failed(e.user_message());
                Vec::new()
            }
            Err(SubmitError::AlreadySubmitting) => Vec::new(),
        }
    }

    /// Object URLs freed by a successful [`submit`](Self::submit).
    pub fn take_released(&mut self) -> Vec<String> {
        std::mem::take(&mut self.released)
    }

    fn reset(&mut self) -> Vec<String> {
        let released = self
            .form
            .attachments()
            .into_iter()
            .filter_map(|a| a.object_url().map(str::to_string))
            .collect();
        self.form.reset();
        self.errors = FieldErrors::new();
        self.phase = SubmissionPhase::Idle;
        released
    }
}

// =============================================================================
// Liveness
// =============================================================================

/// Whether the view that started an async call is still around.
///
/// Clones share the flag. The view calls [`Liveness::end`] on unmount;
/// late responses check [`Liveness::is_alive`] before touching state.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn end(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Hands `value` to `apply` only while alive. Returns whether it ran.
    pub fn deliver<T>(&self, value: T, apply: impl FnOnce(T)) -> bool {
        if self.is_alive() {
            apply(value);
            true
        } else {
            log::debug!("dropping late response for an unmounted view");
            false
        }
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::{Attachment, AttachmentData};
    use crate::forms::ConcertForm;
    use crate::models::{EventType, ModerationStatus, NewConcert};
    use std::cell::{Cell, RefCell};

    /// Yields once per tick so concurrent submissions interleave.
    struct YieldTicker;

    impl Ticker for YieldTicker {
        fn sleep(&self, _period: Duration) -> impl Future<Output = ()> {
            tokio::task::yield_now()
        }
    }

    fn filled_form() -> ConcertForm {
        ConcertForm {
            title: "Весенний тур".into(),
            date: "2026-06-15".into(),
            time: "19:00".into(),
            city: "Москва".into(),
            venue: "Adrenaline Stadium".into(),
            event_type: Some(EventType::Concert),
            banner: Some(Attachment {
                file_name: "poster.jpg".into(),
                mime_type: "image/jpeg".into(),
                size_bytes: 1024,
                data: AttachmentData::ObjectUrl("blob:poster".into()),
            }),
            ..ConcertForm::default()
        }
    }

    #[test]
    fn test_progress_steps_end_at_100() {
        let steps: Vec<u8> = ProgressConfig::UPLOAD.steps().collect();
        assert_eq!(steps.len(), 20);
        assert_eq!(steps.first(), Some(&5));
        assert_eq!(steps.last(), Some(&100));

        let odd = ProgressConfig { step: 30, interval: Duration::ZERO };
        assert_eq!(odd.steps().collect::<Vec<_>>(), vec![30, 60, 90, 100]);
        assert_eq!(ProgressConfig::INSTANT.steps().collect::<Vec<_>>(), vec![100]);
    }

    #[tokio::test]
    async fn test_invalid_form_never_persists() {
        let submitter = Submitter::new(ProgressConfig::INSTANT);
        let calls = Cell::new(0);
        let result = submitter
            .submit(&ConcertForm::default(), false, &ImmediateTicker, |_| {}, |_p: NewConcert, _d| {
                calls.set(calls.get() + 1);
                async { Ok::<_, ApiError>(()) }
            })
            .await;

        assert!(matches!(result, Err(SubmitError::Invalid(ref e)) if e.contains("title")));
        assert_eq!(calls.get(), 0);
        assert!(!submitter.is_submitting());
    }

    #[tokio::test]
    async fn test_draft_bypasses_validation() {
        let submitter = Submitter::new(ProgressConfig::INSTANT);
        let seen = RefCell::new(None);
        let result = submitter
            .submit(&ConcertForm::default(), true, &ImmediateTicker, |_| {}, |payload: NewConcert, is_draft| {
                *seen.borrow_mut() = Some((payload.status, is_draft));
                async { Ok::<_, ApiError>("c-1") }
            })
            .await;

        assert_eq!(result.unwrap(), "c-1");
        assert_eq!(*seen.borrow(), Some((ModerationStatus::Draft, true)));
    }

    #[tokio::test]
    async fn test_phases_in_order() {
        let submitter = Submitter::new(ProgressConfig { step: 50, interval: Duration::ZERO });
        let mut phases = Vec::new();
        submitter
            .submit(&filled_form(), false, &ImmediateTicker, |p| phases.push(p), |_p, _d| async {
                Ok::<_, ApiError>(())
            })
            .await
            .unwrap();

        assert_eq!(
            phases,
            vec![
                SubmissionPhase::Validating,
                SubmissionPhase::Submitting { progress: 0 },
                SubmissionPhase::Submitting { progress: 50 },
                SubmissionPhase::Submitting { progress: 100 },
                SubmissionPhase::Succeeded,
            ]
        );
    }

    #[tokio::test]
    async fn test_double_submit_persists_once() {
        let submitter = Submitter::new(ProgressConfig::UPLOAD);
        let calls = Cell::new(0);
        let form = filled_form();

        let persist = |_p: NewConcert, _d: bool| {
            calls.set(calls.get() + 1);
            async { Ok::<_, ApiError>(()) }
        };

        let (first, second) = futures::future::join(
            submitter.submit(&form, false, &YieldTicker, |_| {}, persist),
            submitter.submit(&form, false, &YieldTicker, |_| {}, persist),
        )
        .await;

        assert!(first.is_ok());
        assert!(matches!(second, Err(SubmitError::AlreadySubmitting)));
        assert_eq!(calls.get(), 1);
        assert!(!submitter.is_submitting());
    }

    #[tokio::test]
    async fn test_session_resets_on_success() {
        let submitter = Submitter::new(ProgressConfig::INSTANT);
        let mut session: FormSession<ConcertForm> = FormSession::new();
        session.open();
        session.edit("title", |f| *f = filled_form());

        let saved = session
            .submit(&submitter, false, &ImmediateTicker, |p, _| async move { Ok::<_, ApiError>(p.title) })
            .await
            .unwrap();

        assert_eq!(saved, "Весенний тур");
        assert_eq!(session.take_released(), vec!["blob:poster".to_string()]);
        assert!(!session.is_open());
        assert_eq!(session.form(), &ConcertForm::default());
        assert_eq!(session.phase(), &SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn test_session_keeps_form_on_failure() {
        let submitter = Submitter::new(ProgressConfig::INSTANT);
        let mut session: FormSession<ConcertForm> = FormSession::new();
        session.open();
        session.edit("title", |f| *f = filled_form());

        let result = session
            .submit(&submitter, false, &ImmediateTicker, |_p, _| async {
                Err::<(), _>(ApiError::Backend("Сервер недоступен".into()))
            })
            .await;

        assert_eq!(result.unwrap_err().user_message(), "Сервер недоступен");
        assert!(session.is_open());
        assert_eq!(session.form(), &filled_form());
        assert_eq!(session.phase(), &SubmissionPhase::Failed("Сервер недоступен".into()));
    }

    #[tokio::test]
    async fn test_session_shows_inline_errors() {
        let submitter = Submitter::new(ProgressConfig::INSTANT);
        let mut session: FormSession<ConcertForm> = FormSession::new();
        session.open();

        let _ = session
            .submit(&submitter, false, &ImmediateTicker, |_p, _| async { Ok::<_, ApiError>(()) })
            .await;
        assert!(session.errors().contains("venue"));

        session.edit("venue", |f| f.venue = "Клуб Космонавт".into());
        assert!(!session.errors().contains("venue"));
        assert!(session.errors().contains("title"));
    }

    #[test]
    fn test_close_releases_object_urls() {
        let mut session: FormSession<ConcertForm> = FormSession::new();
        session.open();
        session.edit("banner", |f| *f = filled_form());
        assert_eq!(session.close(), vec!["blob:poster".to_string()]);
        assert!(session.close().is_empty());
    }

    #[test]
    fn test_liveness_drops_late_responses() {
        let liveness = Liveness::new();
        let handle = liveness.clone();
        let delivered = Cell::new(0);

        assert!(handle.deliver(1, |v| delivered.set(v)));
        liveness.end();
        assert!(!handle.deliver(2, |v| delivered.set(v)));
        assert_eq!(delivered.get(), 1);
    }
}
