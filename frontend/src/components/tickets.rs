//! Support page: the artist's tickets, filtered and searched, with a star
//! rating on resolved or closed tickets that have not been rated yet.

use artistdash::listing::distinct_values;
use artistdash::{Facet, ListQuery, Liveness, Notifier, SortKey, SupportTicket, TicketStatus};
use leptos::*;

use crate::components::ListToolbar;
use crate::services::{load_list, use_client};
use crate::types::Loadable;

fn ticket_status_label(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::Open => "Открыт",
        TicketStatus::InProgress => "В работе",
        TicketStatus::WaitingResponse => "Ждёт ответа",
        TicketStatus::Resolved => "Решён",
        TicketStatus::Closed => "Закрыт",
    }
}

/// Support tickets with search, filters and rating of finished ones.
#[component]
pub fn TicketsPage() -> impl IntoView {
    let notifier = store_value(expect_context::<Notifier>());
    let client = store_value(use_client());

    let liveness = Liveness::new();
    on_cleanup({
        let liveness = liveness.clone();
        move || liveness.end()
    });

    let tickets = create_rw_signal(Loadable::<Vec<SupportTicket>>::Loading);
    let query = create_rw_signal(ListQuery::new().sort(SortKey::Newest));

    load_list(tickets, liveness.clone(), |client| async move { client.list_tickets().await });

    let visible = create_memo(move |_| {
        tickets.with(|t| {
            t.ready()
                .map(|all| query.with(|q| q.apply(all).into_iter().cloned().collect::<Vec<_>>()))
                .unwrap_or_default()
        })
    });
    let facets = Signal::derive(move || {
        tickets.with(|t| {
            let all = t.ready().map(Vec::as_slice).unwrap_or_default();
            [Facet::Status, Facet::Priority, Facet::Category]
                .into_iter()
                .map(|facet| (facet, distinct_values(all, facet).into_iter().map(str::to_string).collect()))
                .collect::<Vec<(Facet, Vec<String>)>>()
        })
    });

    let liveness = store_value(liveness);
    let rate = move |(id, stars): (String, u8)| {
        let Some(client) = client.get_value() else {
            return;
        };
        let liveness = liveness.get_value();
        spawn_local(async move {
            let result = client.rate_ticket(&id, stars).await;
            liveness.deliver(result, |result| match result {
                Ok(()) => {
                    tickets.update(|t| {
                        if let Loadable::Ready(items) = t {
                            if let Some(ticket) = items.iter_mut().find(|t| t.id == id) {
                                if let Err(e) = ticket.rate(stars) {
                                    log::warn!("rating not applied: {}", e);
                                }
                            }
                        }
                    });
                    notifier.with_value(|n| n.success("Спасибо за оценку"));
                }
                Err(e) => {
                    notifier.with_value(|n| n.error(e.user_message()));
                }
            });
        });
    };

    view! {
        <section class="page tickets">
            <div class="page-header">
                <h1>"Поддержка"</h1>
            </div>

            <ListToolbar query=query facets=facets with_sort=true/>

            {move || match tickets.with(|t| t.error().map(str::to_string)) {
                Some(message) => view! { <div class="error-message">{message}</div> }.into_view(),
                None if tickets.with(Loadable::is_loading) => view! { <div class="loading">"Загрузка…"</div> }.into_view(),
                None => view! {
                    <div class="ticket-list">
                        <For
                            each=move || visible.get()
                            key=|ticket| (ticket.id.clone(), ticket.updated_at, ticket.rating)
                            children=move |ticket| view! { <TicketRow ticket=ticket on_rate=Callback::new(rate)/> }
                        />
                    </div>
                }.into_view(),
            }}
        </section>
    }
}

#[component]
fn TicketRow(ticket: SupportTicket, on_rate: Callback<(String, u8)>) -> impl IntoView {
    let last = ticket
        .last_message()
        .map(|m| m.text.clone())
        .unwrap_or_default();
    let can_rate = ticket.status.is_finished() && ticket.rating.is_none();
    let id = ticket.id.clone();

    view! {
        <div class="ticket" class:unread=ticket.has_unread_reply()>
            <div class="ticket-header">
                <span class="ticket-id">"#" {ticket.id.clone()}</span>
                <span class="ticket-subject">{ticket.subject.clone()}</span>
                <span class=format!("priority priority-{}", ticket.priority)>{ticket.priority.to_string()}</span>
                <span class=format!("status status-{}", ticket.status)>{ticket_status_label(ticket.status)}</span>
            </div>
            <div class="ticket-last">{last}</div>
            {ticket.rating.map(|stars| view! { <div class="ticket-rating">{"★".repeat(stars as usize)}</div> })}
            <Show when=move || can_rate fallback=|| ()>
                <div class="ticket-rate">
                    "Оцените ответ: "
                    {(1..=5u8)
                        .map(|stars| {
                            let id = id.clone();
                            view! {
                                <button class="star" on:click=move |_| on_rate.call((id.clone(), stars))>"☆"</button>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}
