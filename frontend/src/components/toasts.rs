//! Toast stack fed by the [`Notifier`] broadcast.
//!
//! Subscribes once when mounted; each toast dismisses itself after
//! [`TOAST_TTL_MS`] or on click. At most [`MAX_TOASTS`] stay on screen.

use artistdash::{Notifier, Toast, ToastLevel};
use futures::StreamExt;
use gloo_timers::future::TimeoutFuture;
use leptos::*;

use crate::{MAX_TOASTS, TOAST_TTL_MS};

fn level_class(level: ToastLevel) -> &'static str {
    match level {
        ToastLevel::Info => "toast-info",
        ToastLevel::Success => "toast-success",
        ToastLevel::Warning => "toast-warning",
        ToastLevel::Error => "toast-error",
    }
}

fn push_capped(toasts: &mut Vec<Toast>, toast: Toast) {
    toasts.push(toast);
    if toasts.len() > MAX_TOASTS {
        let overflow = toasts.len() - MAX_TOASTS;
        toasts.drain(..overflow);
    }
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let notifier = expect_context::<Notifier>();
    let (toasts, set_toasts) = create_signal(Vec::<Toast>::new());

    let dismiss = move |id: u64| set_toasts.update(|list| list.retain(|t| t.id != id));

    let stream = notifier.stream();
    spawn_local(async move {
        futures::pin_mut!(stream);
        while let Some(toast) = stream.next().await {
            let id = toast.id;
            set_toasts.update(|list| push_capped(list, toast));

            spawn_local(async move {
                TimeoutFuture::new(TOAST_TTL_MS).await;
                // Stack may be gone with the app
                let _ = set_toasts.try_update(|list| list.retain(|t| t.id != id));
            });
        }
    });

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class=format!("toast {}", level_class(toast.level))
                            on:click=move |_| dismiss(id)
                        >
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(id: u64) -> Toast {
        Toast { id, level: ToastLevel::Info, message: format!("#{}", id) }
    }

    #[test]
    fn test_stack_keeps_newest() {
        let mut stack = Vec::new();
        for id in 1..=(MAX_TOASTS as u64 + 2) {
            push_capped(&mut stack, toast(id));
        }

        assert_eq!(stack.len(), MAX_TOASTS);
        assert_eq!(stack.first().map(|t| t.id), Some(3));
        assert_eq!(stack.last().map(|t| t.id), Some(MAX_TOASTS as u64 + 2));
    }
}
