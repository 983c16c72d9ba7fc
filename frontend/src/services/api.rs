//! Edge Function access for components.
//!
//! One [`EdgeClient`] is created at startup and provided through Leptos
//! context. List loads go through the default [`RetryPolicy`]; submissions
//! and moderation calls do not retry.

use std::future::Future;

use artistdash::{ApiResult, EdgeClient, Liveness, RetryPolicy};
use leptos::*;

use crate::config::api_config;
use crate::services::GlooTicker;
use crate::types::Loadable;

/// Builds the client from the build-time configuration.
pub fn connect() -> Option<EdgeClient> {
    match api_config() {
        Ok(config) => {
            log::info!("🔌 Edge Function at {}", config.base_url());
            Some(EdgeClient::new(config))
        }
        Err(e) => {
            log::error!("❌ Backend not configured: {}", e);
            None
        }
    }
}

/// The client provided by [`App`](crate::App), if configured.
pub fn use_client() -> Option<EdgeClient> {
    use_context::<Option<EdgeClient>>().flatten()
}

/// Fetches a list into `target`, retrying transient failures.
///
/// The result is dropped if the view that asked for it has gone away.
pub fn load_list<T, F, Fut>(target: RwSignal<Loadable<T>>, liveness: Liveness, fetch: F)
where
    T: 'static,
    F: Fn(EdgeClient) -> Fut + 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
{
    let Some(client) = use_client() else {
        target.set(Loadable::Failed("Бэкенд не настроен".to_string()));
        return;
    };

    target.set(Loadable::Loading);
    spawn_local(async move {
        let result = RetryPolicy::default()
            .run(&GlooTicker, || fetch(client.clone()))
            .await;
        liveness.deliver(Loadable::from_result(result), |loaded| target.set(loaded));
    });
}
