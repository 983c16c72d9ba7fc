//! Banner moderation: select bookings, approve them or reject with a note.
//!
//! Bulk actions call the backend once per selected banner in selection
//! order. Whatever succeeded is applied to the list; every failure gets
//! its own toast and stays selected for another try. Only bookings
//! still awaiting review can be selected.

use artistdash::listing::distinct_values;
use artistdash::{
    awaiting_review, bulk_approve, bulk_reject, Banner, BulkReport, Facet, ListQuery, Liveness, ModerationError,
    ModerationStatus, Notifier, Selection,
};
use leptos::*;

use crate::components::{status_label, ListToolbar};
use crate::services::{load_list, use_client};
use crate::types::Loadable;

#[component]
pub fn ModerationPage() -> impl IntoView {
    let notifier = store_value(expect_context::<Notifier>());
    let client = store_value(use_client());

    let liveness = Liveness::new();
    on_cleanup({
        let liveness = liveness.clone();
        move || liveness.end()
    });

    let banners = create_rw_signal(Loadable::<Vec<Banner>>::Loading);
    let query = create_rw_signal(ListQuery::new().filter(Facet::Status, ModerationStatus::Pending.as_str()));
    let selection = create_rw_signal(Selection::new());
    let (note, set_note) = create_signal(String::new());
    let (working, set_working) = create_signal(false);

    load_list(banners, liveness.clone(), |client| async move { client.list_banners().await });

    let visible = create_memo(move |_| {
        banners.with(|b| {
            b.ready()
                .map(|all| query.with(|q| q.apply(all).into_iter().cloned().collect::<Vec<_>>()))
                .unwrap_or_default()
        })
    });
    let facets = Signal::derive(move || {
        banners.with(|b| {
            let all = b.ready().map(Vec::as_slice).unwrap_or_default();
            [Facet::Status, Facet::Placement]
                .into_iter()
                .map(|facet| (facet, distinct_values(all, facet).into_iter().map(str::to_string).collect()))
                .collect::<Vec<(Facet, Vec<String>)>>()
        })
    });

    let reviewable = create_memo(move |_| visible.with(|rows| awaiting_review(rows)));

    // Hidden or already decided rows drop out of the selection
    create_effect(move |_| {
        reviewable.with(|rows| selection.update(|s| s.retain_existing(rows)));
    });

    let liveness = store_value(liveness);
    let finish = move |outcome: Result<BulkReport, ModerationError>| {
        set_working.set(false);
        match outcome {
            Ok(report) => {
                banners.update(|b| {
                    if let Loadable::Ready(items) = b {
                        report.apply_to(items);
                    }
                });
                selection.update(|s| {
                    for id in &report.succeeded {
                        s.deselect(id);
                    }
                });
                if report.all_succeeded() {
                    set_note.set(String::new());
                }
                notifier.with_value(|n| report.notify(n));
            }
            Err(e) => {
                notifier.with_value(|n| n.warning(e.user_message()));
            }
        }
    };

    let approve = move |_| {
        let Some(client) = client.get_value() else {
            return;
        };
        let picked = selection.get_untracked();
        let liveness = liveness.get_value();
        set_working.set(true);

        spawn_local(async move {
            let outcome = bulk_approve(&picked, |id| {
                let client = client.clone();
                async move { client.approve_banner(&id).await }
            })
            .await;
            liveness.deliver(outcome, finish);
        });
    };

    let reject = move |_| {
        let Some(client) = client.get_value() else {
            return;
        };
        let picked = selection.get_untracked();
        let text = note.get_untracked();
        let liveness = liveness.get_value();
        set_working.set(true);

        spawn_local(async move {
            let outcome = bulk_reject(&picked, &text, |id, note| {
                let client = client.clone();
                async move { client.reject_banner(&id, &note).await }
            })
            .await;
            liveness.deliver(outcome, finish);
        });
    };

    let all_selected = move || {
        reviewable.with(|rows| !rows.is_empty() && selection.with(|s| rows.iter().all(|b| s.is_selected(&b.id))))
    };

    view! {
        <section class="page moderation">
            <div class="page-header">
                <h1>"Модерация баннеров"</h1>
            </div>

            <ListToolbar query=query facets=facets with_sort=true/>

            <div class="bulk-bar">
                <span class="bulk-count">{move || format!("Выбрано: {}", selection.with(Selection::len))}</span>
                <button
                    class="button primary"
                    prop:disabled=move || working.get() || selection.with(Selection::is_empty)
                    on:click=approve
                >
                    "Одобрить"
                </button>
                <input
                    type="text"
                    class="bulk-note"
                    placeholder="Причина отклонения"
                    prop:value=note
                    on:input=move |ev| set_note.set(event_target_value(&ev))
                />
                <button
                    class="button danger"
                    prop:disabled=move || working.get() || selection.with(Selection::is_empty)
                    on:click=reject
                >
                    "Отклонить"
                </button>
            </div>

            {move || match banners.with(|b| b.error().map(str::to_string)) {
                Some(message) => view! { <div class="error-message">{message}</div> }.into_view(),
                None if banners.with(Loadable::is_loading) => view! { <div class="loading">"Загрузка…"</div> }.into_view(),
                None => view! {
                    <table class="moderation-table">
                        <thead>
                            <tr>
                                <th>
                                    <input
                                        type="checkbox"
                                        prop:checked=all_selected
                                        prop:disabled=move || reviewable.with(Vec::is_empty)
                                        on:change=move |_| reviewable.with_untracked(|rows| selection.update(|s| s.toggle_all(rows)))
                                    />
                                </th>
                                <th>"Баннер"</th>
                                <th>"Артист"</th>
                                <th>"Размещение"</th>
                                <th>"Период"</th>
                                <th>"Цена"</th>
                                <th>"Статус"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || visible.get()
                                key=|banner| (banner.id.clone(), banner.status)
                                children=move |banner| view! { <BannerRow banner=banner selection=selection/> }
                            />
                        </tbody>
                    </table>
                }.into_view(),
            }}
        </section>
    }
}

#[component]
fn BannerRow(banner: Banner, selection: RwSignal<Selection>) -> impl IntoView {
    let id = store_value(banner.id.clone());
    let reviewable = banner.status.is_awaiting_review();
    let period = match (banner.start_date, banner.end_date) {
        (Some(start), Some(end)) => format!("{} – {}", start.format("%d.%m"), end.format("%d.%m.%Y")),
        (Some(start), None) => format!("с {}", start.format("%d.%m.%Y")),
        _ => "—".to_string(),
    };

    view! {
        <tr class:selected=move || id.with_value(|id| selection.with(|s| s.is_selected(id)))>
            <td>
                {reviewable.then(|| view! {
                    <input
                        type="checkbox"
                        prop:checked=move || id.with_value(|id| selection.with(|s| s.is_selected(id)))
                        on:change=move |_| id.with_value(|id| selection.update(|s| s.toggle(id)))
                    />
                })}
            </td>
            <td>
                {banner.image.clone().map(|src| view! { <img class="banner-thumb" src=src/> })}
                {banner.title.clone()}
            </td>
            <td>{banner.artist_name.clone()}</td>
            <td>{banner.placement.to_string()}</td>
            <td>{period}</td>
            <td>{format!("🪙 {}", banner.price)}</td>
            <td>
                <span class=format!("status status-{}", banner.status)>{status_label(banner.status)}</span>
                {banner.moderation_note.clone().map(|note| view! { <div class="moderation-note">{note}</div> })}
            </td>
        </tr>
    }
}
