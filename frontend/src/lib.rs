//! Artist Dashboard - Frontend Rust/Leptos Application
//!
//! A WebAssembly dashboard where artists upload concerts and moderators
//! review banner bookings, built on the `artistdash` client core.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! │  context: EdgeClient, Store, ReadSignal<AppState>, Notifier │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (sections, profile, tier, coins)                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Routes                                                      │
//! │  ├── /            ConcertsPage (toolbar, list, upload modal)│
//! │  ├── /moderation  ModerationPage (banners, bulk actions)    │
//! │  └── /tickets     TicketsPage (support tickets)             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer, ToastStack                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (Loadable, Section)
//! - [`components`] - UI components (Header, pages, modal, toasts, etc.)
//! - [`services`] - Backend client, file inputs, timers

use artistdash::{notify::NOTIFIER, AppState, Notifier, Store};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{Loadable, Section};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 {} - Starting Leptos App", APP_NAME);

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let client = connect();
    let store = Store::default();
    let state = bridge_store(&store);

    provide_context(client.clone());
    provide_context(store.clone());
    provide_context(state);
    provide_context::<Notifier>(NOTIFIER.clone());

    load_account(client, store);

    view! {
        <Title text=APP_NAME/>
        <Router>
            <Header/>
            <main class="container">
                <Routes>
                    <Route path=Section::Concerts.path() view=ConcertsPage/>
                    <Route path=Section::Moderation.path() view=ModerationPage/>
                    <Route path=Section::Tickets.path() view=TicketsPage/>
                </Routes>
            </main>
            <Footer/>
            <ToastStack/>
        </Router>
    }
}

/// Mirrors the store into a signal the views can track.
fn bridge_store(store: &Store) -> ReadSignal<AppState> {
    let (state, set_state) = create_signal(store.snapshot());
    let mut changes = store.subscribe();

    spawn_local(async move {
        while changes.changed().await.is_ok() {
            let next = changes.borrow_and_update().clone();
            set_state.set(next);
        }
    });

    state
}

fn load_account(client: Option<artistdash::EdgeClient>, store: Store) {
    let Some(client) = client else {
        return;
    };

    spawn_local(async move {
        match client.fetch_account().await {
            Ok(account) => {
                log::info!("👤 Signed in as {}", account.profile.display_name);
                store.dispatch(account.into());
            }
            Err(e) => {
                log::warn!("Could not load profile: {}", e);
                NOTIFIER.warning(e.user_message());
            }
        }
    });
}
