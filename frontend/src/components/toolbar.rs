//! Search, filter, date and sort controls above every list.
//!
//! The toolbar only edits a [`ListQuery`]; pages run the query over their
//! items in a memo so nothing is filtered twice.

use artistdash::listing::ALL_VALUES;
use artistdash::{DateRange, Facet, ListQuery, SortKey};
use leptos::*;

pub fn facet_label(facet: Facet) -> &'static str {
    match facet {
        Facet::Status => "Статус",
        Facet::City => "Город",
        Facet::Category => "Категория",
        Facet::EventType => "Тип",
        Facet::Priority => "Приоритет",
        Facet::Placement => "Размещение",
    }
}

pub fn sort_label(key: SortKey) -> &'static str {
    match key {
        SortKey::DateAsc => "Дата ↑",
        SortKey::DateDesc => "Дата ↓",
        SortKey::Views => "Просмотры",
        SortKey::Clicks => "Клики",
        SortKey::Newest => "Новые",
    }
}

#[component]
pub fn ListToolbar(
    query: RwSignal<ListQuery>,
    /// Dropdowns to show, with the values each offers.
    #[prop(into)]
    facets: Signal<Vec<(Facet, Vec<String>)>>,
    #[prop(optional)] with_dates: bool,
    #[prop(optional)] with_sort: bool,
) -> impl IntoView {
    let (date_from, set_date_from) = create_signal(String::new());
    let (date_to, set_date_to) = create_signal(String::new());

    let update_dates = move || {
        let range = DateRange::from_inputs(&date_from.get_untracked(), &date_to.get_untracked());
        query.update(|q| q.date_range = range);
    };

    view! {
        <div class="list-toolbar">
            <input
                type="search"
                class="toolbar-search"
                placeholder="Поиск…"
                prop:value=move || query.with(|q| q.search.clone())
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    query.update(|q| q.search = text);
                }
            />

            {move || facets.get()
                .into_iter()
                .map(|(facet, values)| {
                    let selected = move || query.with(|q| {
                        q.filters.get(&facet).cloned().unwrap_or_else(|| ALL_VALUES.to_string())
                    });
                    view! {
                        <label class="toolbar-filter">
                            {facet_label(facet)}
                            <select
                                prop:value=selected
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    query.update(|q| q.set_filter(facet, value));
                                }
                            >
                                <option value=ALL_VALUES>"Все"</option>
                                {values.into_iter()
                                    .map(|value| view! { <option value=value.clone()>{value.clone()}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                    }
                })
                .collect_view()}

            <Show when=move || with_dates fallback=|| ()>
                <label class="toolbar-date">
                    "С"
                    <input type="date" prop:value=date_from on:change=move |ev| {
                        set_date_from.set(event_target_value(&ev));
                        update_dates();
                    }/>
                </label>
                <label class="toolbar-date">
                    "По"
                    <input type="date" prop:value=date_to on:change=move |ev| {
                        set_date_to.set(event_target_value(&ev));
                        update_dates();
                    }/>
                </label>
            </Show>

            <Show when=move || with_sort fallback=|| ()>
                <select
                    class="toolbar-sort"
                    prop:value=move || query.with(|q| q.sort.unwrap_or_default().as_str())
                    on:change=move |ev| {
                        let key = event_target_value(&ev).parse::<SortKey>().ok();
                        query.update(|q| q.sort = key);
                    }
                >
                    {SortKey::ALL.iter()
                        .map(|key| view! { <option value=key.as_str()>{sort_label(*key)}</option> })
                        .collect_view()}
                </select>
            </Show>
        </div>
    }
}
