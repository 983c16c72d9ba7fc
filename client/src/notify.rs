//! Toast notifications.
//!
//! A [`Notifier`] fans toasts out over a broadcast channel to whatever
//! renders them (the dashboard's toast stack, the CLI's stderr printer).
//! Every toast is also written through the `log` facade.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::Stream;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Toast severity, also picks the toast colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single toast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    /// Unique per notifier, used to dismiss.
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

/// Global notifier for code that has no handle threaded to it.
pub static NOTIFIER: Lazy<Notifier> = Lazy::new(Notifier::new);

/// Broadcasts toasts to all subscribers. Clones share the channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Toast>,
    next_id: Arc<AtomicU64>,
}

impl Notifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(64);
        Self { sender, next_id: Arc::new(AtomicU64::new(1)) }
    }

    /// Send a toast to all subscribers and return it
    pub fn notify(&self, level: ToastLevel, message: impl Into<String>) -> Toast {
        let toast = Toast {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            level,
            message: message.into(),
        };

        match level {
            ToastLevel::Info | ToastLevel::Success => log::info!("{}", toast.message),
            ToastLevel::Warning => log::warn!("{}", toast.message),
            ToastLevel::Error => log::error!("{}", toast.message),
        }

        // Nobody listening is fine
        let _ = self.sender.send(toast.clone());
        toast
    }

    pub fn info(&self, message: impl Into<String>) -> Toast {
        self.notify(ToastLevel::Info, message)
    }

    pub fn success(&self, message: impl Into<String>) -> Toast {
        self.notify(ToastLevel::Success, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> Toast {
        self.notify(ToastLevel::Warning, message)
    }

    pub fn error(&self, message: impl Into<String>) -> Toast {
        self.notify(ToastLevel::Error, message)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.sender.subscribe()
    }

    /// Toasts sent from now on. A subscriber that falls behind skips ahead.
    pub fn stream(&self) -> impl Stream<Item = Toast> {
        futures::stream::unfold(self.subscribe(), |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(toast) => return Some((toast, rx)),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        log::warn!("toast stream skipped {} toast(s)", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_receive_toasts_in_order() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();
        let handle = notifier.clone();

        notifier.success("Концерт сохранён");
        handle.error("Сервер недоступен");

        let first = rx.try_recv().unwrap();
        let second = rx.try_recv().unwrap();
        assert_eq!(first.level, ToastLevel::Success);
        assert_eq!(second.message, "Сервер недоступен");
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_stream_yields_toasts() {
        use futures::StreamExt;

        let notifier = Notifier::new();
        let stream = notifier.stream();
        futures::pin_mut!(stream);

        notifier.info("Черновик сохранён");
        let toast = stream.next().await.unwrap();
        assert_eq!(toast.message, "Черновик сохранён");
    }

    #[test]
    fn test_notify_without_subscribers() {
        let toast = Notifier::new().warning("Нет подписчиков");
        assert_eq!(toast.level, ToastLevel::Warning);
    }

    #[test]
    fn test_toast_wire_format() {
        let toast = Toast { id: 7, level: ToastLevel::Error, message: "x".into() };
        let json = serde_json::to_string(&toast).unwrap();
        assert_eq!(json, r#"{"id":7,"level":"error","message":"x"}"#);
    }
}
