use artistdash::AppState;
use leptos::*;
use leptos_router::A;

use crate::{Section, APP_NAME};

#[component]
pub fn Header() -> impl IntoView {
    let state = expect_context::<ReadSignal<AppState>>();

    view! {
        <header>
            <div class="header-left">
                <A href="/" class="logo">{APP_NAME}</A>
                <nav class="sections">
                    {Section::ALL
                        .into_iter()
                        .map(|section| view! {
                            <A href=section.path() exact=true active_class="active" class="nav-link">
                                {section.title()}
                            </A>
                        })
                        .collect_view()}
                </nav>
            </div>
            <div class="header-right">
                <span class="badge tier">
                    {move || state.with(|s| s.tier.to_string())}
                </span>
                <span class="badge coins">
                    {move || format!("🪙 {}", state.with(|s| s.coins))}
                </span>
                <div class="profile-status" class:connected=move || state.with(AppState::is_signed_in)>
                    <span class="profile-dot" class:connected=move || state.with(AppState::is_signed_in)></span>
                    <span>
                        {move || state.with(|s| {
                            if s.is_signed_in() {
                                s.display_name().to_string()
                            } else {
                                "Гость".to_string()
                            }
                        })}
                    </span>
                </div>
            </div>
        </header>
    }
}
