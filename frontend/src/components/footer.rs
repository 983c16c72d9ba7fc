//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"Artist Dashboard • Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
            <div class="footer-links">
                <a href="/tickets" class="footer-link">
                    "Поддержка"
                </a>
            </div>
        </footer>
    }
}
