//! Kanban Board Frontend App
//!
//! Reads the page configuration, provides the store and board context,
//! and opens the configured board.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{KanbanBoard, TaskDetail, ToastStack};
use crate::config::AppConfig;
use crate::context::BoardContext;
use crate::store::{AppState, ToastNotifier};

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_location();
    log::info!("opening board '{}' from {}", config.board_id, config.api_base);

    let store = Store::new(AppState::default());
    provide_context(store);

    let ctx = BoardContext::new(
        &config.api_base,
        ToastNotifier::new(store),
        config.activation,
    );
    provide_context(ctx);
    ctx.open(config.board_id.clone());

    view! {
        <div class="app-layout">
            <main class="main-content">
                <KanbanBoard />
            </main>
            <TaskDetail />
            <ToastStack />
        </div>
    }
}
