use artistdash::SubmissionPhase;
use leptos::*;

/// Upload progress bar, visible while a submission is running.
#[component]
pub fn ProgressBar(phase: Signal<SubmissionPhase>) -> impl IntoView {
    let percent = move || phase.with(SubmissionPhase::progress);

    view! {
        <Show when=move || phase.with(SubmissionPhase::is_busy) fallback=|| ()>
            <div class="progress-section show">
                <div class="progress-bar">
                    <div class="progress-fill" style=move || format!("width: {}%;", percent())></div>
                </div>
                <div class="progress-label">{move || format!("Загрузка… {}%", percent())}</div>
            </div>
        </Show>
    }
}
