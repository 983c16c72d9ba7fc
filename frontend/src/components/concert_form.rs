//! "Add concert" modal.
//!
//! The modal owns a [`FormSession`]. Submitting snapshots the form, runs the
//! shared [`Submitter`] with a browser ticker and mirrors each phase into
//! the session signal; the outcome is applied with [`FormSession::finish`].
//! The created concert shows up in the list immediately as a pending entry.

use artistdash::forms::Form;
use artistdash::{
    AttachmentKind, Concert, ConcertForm, EdgeClient, EventType, FormSession, Liveness, Notifier,
    PendingOverlay, ProgressConfig, SubmitError, Submitter,
};
use leptos::*;

use crate::components::ProgressBar;
use crate::services::{
    load_attachment, picked_file, release, revoke_object_urls, use_client, GlooTicker,
};

type Getter = fn(&ConcertForm) -> String;
type Setter = fn(&mut ConcertForm, String);

fn event_type_label(kind: EventType) -> &'static str {
    match kind {
        EventType::Concert => "Концерт",
        EventType::Festival => "Фестиваль",
        EventType::Club => "Клубное выступление",
        EventType::Private => "Частное мероприятие",
        EventType::Online => "Онлайн",
    }
}

#[component]
pub fn ConcertUploadModal(
    overlay: RwSignal<PendingOverlay<Concert>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let notifier = store_value(expect_context::<Notifier>());
    let client = store_value(use_client());
    let submitter = store_value(Submitter::new(ProgressConfig::UPLOAD));

    let session = create_rw_signal({
        let mut session = FormSession::<ConcertForm>::new();
        session.open();
        session
    });

    // Closing does not cancel a running request; it only stops it touching this view
    let liveness = Liveness::new();
    on_cleanup({
        let liveness = liveness.clone();
        move || {
            liveness.end();
            if let Some(urls) = session.try_update(|s| s.close()) {
                revoke_object_urls(urls);
            }
        }
    });
    let liveness = store_value(liveness);

    let phase = Signal::derive(move || session.with(|s| s.phase().clone()));
    let busy = move || phase.with(|p| p.is_busy());
    let error_of = move |field: &'static str| {
        move || session.with(|s| s.errors().get(field).map(str::to_string))
    };

    let submit = move |is_draft: bool| {
        let Some(client) = client.get_value() else {
            notifier.with_value(|n| n.error("Бэкенд не настроен"));
            return;
        };
        let form = session.with_untracked(|s| s.form().clone());
        let submitter = submitter.get_value();
        let liveness = liveness.get_value();

        spawn_local(async move {
            let alive = liveness.clone();
            let result = submitter
                .submit(
                    &form,
                    is_draft,
                    &GlooTicker,
                    |next| {
                        if alive.is_alive() {
                            session.update(|s| s.set_phase(next));
                        }
                    },
                    |payload, _| persist_optimistically(client, overlay, payload),
                )
                .await;

            match &result {
                Ok(_) if is_draft => notifier.with_value(|n| n.success("Черновик сохранён")),
                Ok(_) => notifier.with_value(|n| n.success("Концерт отправлен на модерацию")),
                Err(SubmitError::Invalid(_)) => {
                    notifier.with_value(|n| n.warning("Заполните обязательные поля"))
                }
                Err(e) => notifier.with_value(|n| n.error(e.user_message())),
            };

            liveness.deliver(result, |result| {
                if let Some(urls) = session.try_update(|s| s.finish(&result)) {
                    revoke_object_urls(urls);
                }
                if result.is_ok() {
                    on_close.call(());
                }
            });
        });
    };

    let text_field = move |name: &'static str, label: &'static str, input_type: &'static str, get: Getter, set: Setter| {
        let required = ConcertForm::REQUIRED.contains(&name);
        view! {
            <label class="form-field" class:invalid=move || error_of(name)().is_some()>
                <span class="form-label">{label} {required.then_some(" *")}</span>
                <input
                    type=input_type
                    prop:value=move || session.with(|s| get(s.form()))
                    prop:disabled=busy
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        session.update(|s| s.edit(name, |f| set(f, value)));
                    }
                />
                <span class="field-error">{error_of(name)}</span>
            </label>
        }
    };

    let on_poster = move |ev: web_sys::Event| {
        let Some(file) = picked_file(&ev) else {
            return;
        };
        let liveness = liveness.get_value();
        spawn_local(async move {
            let picked = load_attachment(file, AttachmentKind::Image).await;
            liveness.deliver(picked, |picked| match picked {
                Ok(poster) => session.update(|s| {
                    s.edit("banner", |f| release(f.banner.replace(poster)));
                }),
                Err(message) => {
                    notifier.with_value(|n| n.warning(message));
                }
            });
        });
    };

    let poster_preview = move || session.with(|s| s.form().banner.as_ref().map(|b| b.reference().to_string()));

    view! {
        <div class="modal-backdrop">
            <div class="modal">
                <div class="modal-header">
                    <h2>"Добавить концерт"</h2>
                    <button class="modal-close" prop:disabled=busy on:click=move |_| on_close.call(())>"✕"</button>
                </div>

                <div class="modal-body">
                    {text_field("title", "Название", "text", |f| f.title.clone(), |f, v| f.title = v)}
                    <div class="form-row">
                        {text_field("date", "Дата", "date", |f| f.date.clone(), |f, v| f.date = v)}
                        {text_field("time", "Время", "time", |f| f.time.clone(), |f, v| f.time = v)}
                    </div>
                    <div class="form-row">
                        {text_field("city", "Город", "text", |f| f.city.clone(), |f, v| f.city = v)}
                        {text_field("venue", "Площадка", "text", |f| f.venue.clone(), |f, v| f.venue = v)}
                    </div>
                    {text_field("address", "Адрес", "text", |f| f.address.clone(), |f, v| f.address = v)}

                    <label class="form-field" class:invalid=move || error_of("type")().is_some()>
                        <span class="form-label">"Тип мероприятия *"</span>
                        <select
                            prop:value=move || session.with(|s| s.form().event_type.map(|t| t.as_str()).unwrap_or(""))
                            prop:disabled=busy
                            on:change=move |ev| {
                                let kind = event_target_value(&ev).parse::<EventType>().ok();
                                session.update(|s| s.edit("type", |f| f.event_type = kind));
                            }
                        >
                            <option value="">"Выберите тип"</option>
                            {EventType::ALL.iter()
                                .map(|kind| view! { <option value=kind.as_str()>{event_type_label(*kind)}</option> })
                                .collect_view()}
                        </select>
                        <span class="field-error">{error_of("type")}</span>
                    </label>

                    <label class="form-field" class:invalid=move || error_of("description")().is_some()>
                        <span class="form-label">"Описание"</span>
                        <textarea
                            prop:value=move || session.with(|s| s.form().description.clone())
                            prop:disabled=busy
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                session.update(|s| s.edit("description", |f| f.description = value));
                            }
                        ></textarea>
                        <span class="field-error">{error_of("description")}</span>
                    </label>

                    {text_field("tags", "Теги (через запятую)", "text", |f| f.tags.clone(), |f, v| f.tags = v)}
                    <div class="form-row">
                        {text_field("price", "Цена от, ₽", "number", |f| f.price_min.clone(), |f, v| f.price_min = v)}
                        {text_field("price", "Цена до, ₽", "number", |f| f.price_max.clone(), |f, v| f.price_max = v)}
                    </div>
                    {text_field("ticketUrl", "Ссылка на билеты", "url", |f| f.ticket_url.clone(), |f, v| f.ticket_url = v)}

                    <label class="form-field" class:invalid=move || error_of("banner")().is_some()>
                        <span class="form-label">"Афиша *"</span>
                        <input
                            type="file"
                            accept=AttachmentKind::Image.accept()
                            prop:disabled=busy
                            on:change=on_poster
                        />
                        <Show when=move || poster_preview().is_some() fallback=|| ()>
                            <img class="poster-preview" src=move || poster_preview().unwrap_or_default()/>
                        </Show>
                        <span class="field-error">{error_of("banner")}</span>
                    </label>

                    <ProgressBar phase=phase/>
                </div>

                <div class="modal-footer">
                    <button class="button secondary" prop:disabled=busy on:click=move |_| submit(true)>
                        "Сохранить черновик"
                    </button>
                    <button class="button primary" prop:disabled=busy on:click=move |_| submit(false)>
                        {move || if busy() { "Загрузка…" } else { "Опубликовать" }}
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Shows the concert as pending, then swaps in the saved record or drops it.
async fn persist_optimistically(
    client: EdgeClient,
    overlay: RwSignal<PendingOverlay<Concert>>,
    payload: artistdash::models::NewConcert,
) -> artistdash::ApiResult<Concert> {
    let now = chrono::Utc::now();
    let key = overlay.try_update(|o| o.begin_create_with(|key| payload.to_pending(key, now)));

    let result = client.create_concert(&payload).await;

    if let Some(key) = key {
        let resolved = overlay.try_update(|o| match &result {
            Ok(saved) => o.confirm_create(&key, saved.clone()),
            Err(_) => o.fail_create(&key).map(|_| ()),
        });
        if let Some(Err(e)) = resolved {
            log::warn!("pending concert {} already resolved: {}", key, e);
        }
    }
    result
}
