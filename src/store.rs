//! Global Application State Store
//!
//! UI state that is not part of the board itself: toasts and the task
//! shown in the detail panel. Uses reactive_stores for field-level
//! reactivity.

use gloo_timers::callback::Timeout;
use kanban_core::{Notification, Notifier};
use leptos::prelude::*;
use reactive_stores::Store;

/// How long a toast stays up
pub const TOAST_DURATION_MS: u32 = 4_000;

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Visible toasts, oldest first
    pub toasts: Vec<Toast>,
    pub next_toast_id: u64,
    /// Task shown in the detail panel
    pub selected_task_id: Option<String>,
}

pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Show a toast; returns its id
pub fn store_push_toast(store: &AppStore, notification: Notification) -> u64 {
    let id = store.next_toast_id().get_untracked();
    store.next_toast_id().set(id + 1);
    store.toasts().write().push(Toast { id, notification });
    id
}

pub fn store_dismiss_toast(store: &AppStore, id: u64) {
    store.toasts().write().retain(|t| t.id != id);
}

pub fn store_select_task(store: &AppStore, task_id: Option<String>) {
    store.selected_task_id().set(task_id);
}

/// Notifier that renders as auto-dismissing toasts
#[derive(Clone, Copy)]
pub struct ToastNotifier {
    store: AppStore,
}

impl ToastNotifier {
    pub fn new(store: AppStore) -> Self {
        Self { store }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notification: Notification) {
        log::debug!("toast: {} / {}", notification.title, notification.description);
        let store = self.store;
        let id = store_push_toast(&store, notification);
        Timeout::new(TOAST_DURATION_MS, move || store_dismiss_toast(&store, id)).forget();
    }
}
