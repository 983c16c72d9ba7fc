//! Browser timer for the submission progress bar and retry back-off.

use std::future::Future;
use std::time::Duration;

use artistdash::Ticker;
use gloo_timers::future::TimeoutFuture;

/// [`Ticker`] backed by `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTicker;

impl Ticker for GlooTicker {
    fn sleep(&self, period: Duration) -> impl Future<Output = ()> {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis)
    }
}
