//! Concerts page: status tabs, toolbar, list and the upload modal.
//!
//! Drafts and rejected concerts can be removed by their owner; items under
//! review or already published cannot.

use artistdash::listing::{distinct_values, status_counts};
use artistdash::{
    Concert, Facet, ListQuery, Liveness, ModerationStatus, Notifier, PendingOverlay, SortKey,
};
use leptos::*;

use crate::components::{ConcertUploadModal, ListToolbar};
use crate::services::{load_list, use_client};
use crate::types::Loadable;

pub fn status_label(status: ModerationStatus) -> &'static str {
    match status {
        ModerationStatus::Draft => "Черновик",
        ModerationStatus::Pending => "На модерации",
        ModerationStatus::Approved => "Одобрено",
        ModerationStatus::Rejected => "Отклонено",
    }
}

#[component]
pub fn ConcertsPage() -> impl IntoView {
    let notifier = store_value(expect_context::<Notifier>());
    let client = store_value(use_client());

    let liveness = Liveness::new();
    on_cleanup({
        let liveness = liveness.clone();
        move || liveness.end()
    });

    let loaded = create_rw_signal(Loadable::<Vec<Concert>>::Loading);
    let overlay = create_rw_signal(PendingOverlay::<Concert>::default());
    let query = create_rw_signal(ListQuery::new().sort(SortKey::Newest));
    let (modal_open, set_modal_open) = create_signal(false);

    let reload = overlay.try_update(PendingOverlay::begin_reload);
    load_list(loaded, liveness.clone(), |client| async move { client.list_concerts().await });

    create_effect(move |_| {
        if let (Some(reload), Some(items)) = (reload, loaded.with(|l| l.ready().cloned())) {
            overlay.update(|o| o.finish_reload(reload, items));
        }
    });

    let items = create_memo(move |_| overlay.with(PendingOverlay::snapshot));
    let visible = create_memo(move |_| {
        items.with(|all| query.with(|q| q.apply(all).into_iter().cloned().collect::<Vec<_>>()))
    });
    let facets = Signal::derive(move || {
        items.with(|all| {
            [Facet::Status, Facet::City, Facet::EventType]
                .into_iter()
                .map(|facet| (facet, distinct_values(all, facet).into_iter().map(str::to_string).collect()))
                .collect::<Vec<(Facet, Vec<String>)>>()
        })
    });
    let tabs = move || {
        items.with(|all| {
            let counts = status_counts(all);
            ModerationStatus::ALL
                .iter()
                .map(|status| (*status, counts.get(status.as_str()).copied().unwrap_or(0)))
                .collect::<Vec<_>>()
        })
    };

    let liveness = store_value(liveness);
    let remove = move |id: String| {
        let Some(client) = client.get_value() else {
            return;
        };
        if let Some(Err(e)) = overlay.try_update(|o| o.begin_remove(&id)) {
            log::warn!("cannot remove {}: {}", id, e);
            return;
        }

        let liveness = liveness.get_value();
        spawn_local(async move {
            let result = client.delete_concert(&id).await;
            liveness.deliver(result, |result| {
                let resolved = overlay.try_update(|o| match &result {
                    Ok(()) => o.confirm_remove(&id),
                    Err(_) => o.fail_remove(&id),
                });
                if let Some(Err(e)) = resolved {
                    log::warn!("pending removal of {} already resolved: {}", id, e);
                }
                notifier.with_value(|n| match result {
                    Ok(()) => n.success("Концерт удалён"),
                    Err(e) => n.error(e.user_message()),
                });
            });
        });
    };

    view! {
        <section class="page concerts">
            <div class="page-header">
                <h1>"Концерты"</h1>
                <button class="button primary" on:click=move |_| set_modal_open.set(true)>
                    "+ Добавить концерт"
                </button>
            </div>

            <div class="status-tabs">
                {move || tabs()
                    .into_iter()
                    .map(|(status, count)| view! {
                        <button
                            class="status-tab"
                            class:active=move || query.with(|q| q.filters.get(&Facet::Status).map(String::as_str) == Some(status.as_str()))
                            on:click=move |_| query.update(|q| {
                                let current = q.filters.get(&Facet::Status).cloned();
                                let next = if current.as_deref() == Some(status.as_str()) { "" } else { status.as_str() };
                                q.set_filter(Facet::Status, next);
                            })
                        >
                            {status_label(status)} " " <span class="count">{count}</span>
                        </button>
                    })
                    .collect_view()}
            </div>

            <ListToolbar query=query facets=facets with_dates=true with_sort=true/>

            {move || match loaded.get() {
                Loadable::Loading => view! { <div class="loading">"Загрузка…"</div> }.into_view(),
                Loadable::Failed(message) => view! { <div class="error-message">{message}</div> }.into_view(),
                Loadable::Ready(_) => view! {
                    <Show
                        when=move || !visible.with(Vec::is_empty)
                        fallback=|| view! { <div class="empty">"Ничего не найдено"</div> }
                    >
                        <div class="card-list">
                            <For
                                each=move || visible.get()
                                key=|concert| (concert.id.clone(), concert.status)
                                children=move |concert| {
                                    let id = concert.id.clone();
                                    let pending = move || overlay.with(|o| o.is_pending(&id));
                                    view! { <ConcertCard concert=concert pending=Signal::derive(pending) on_remove=Callback::new(remove)/> }
                                }
                            />
                        </div>
                    </Show>
                }.into_view(),
            }}

            <Show when=move || modal_open.get() fallback=|| ()>
                <ConcertUploadModal overlay=overlay on_close=Callback::new(move |_| set_modal_open.set(false))/>
            </Show>
        </section>
    }
}

#[component]
fn ConcertCard(concert: Concert, pending: Signal<bool>, on_remove: Callback<String>) -> impl IntoView {
    let id = concert.id.clone();
    let when = match concert.date {
        Some(date) => format!("{} {}", date.format("%d.%m.%Y"), concert.time),
        None => "Дата не указана".to_string(),
    };
    let place = [concert.city.as_str(), concert.venue.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    view! {
        <div class="card" class:pending=pending>
            {concert.banner.clone().map(|src| view! { <img class="card-poster" src=src/> })}
            <div class="card-body">
                <div class="card-title">
                    {concert.title.clone()}
                    <span class=format!("status status-{}", concert.status)>{status_label(concert.status)}</span>
                    {concert.promoted.then(|| view! { <span class="badge promoted">"Продвигается"</span> })}
                </div>
                <div class="card-meta">{when} " • " {place}</div>
                {concert.rejection_reason.clone().map(|reason| view! { <div class="rejection">"Причина: " {reason}</div> })}
                <div class="card-stats">
                    "👁 " {concert.stats.views} "  🖱 " {concert.stats.clicks} "  ♥ " {concert.stats.likes}
                </div>
            </div>
            {concert.status.allows_owner_edit().then(|| view! {
                <button
                    class="button danger"
                    prop:disabled=pending
                    on:click=move |_| on_remove.call(id.clone())
                >
                    "Удалить"
                </button>
            })}
        </div>
    }
}
