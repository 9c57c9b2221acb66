//! Toast Stack Component
//!
//! Renders notifications from the store, newest at the bottom.

use kanban_core::NotificationVariant;
use leptos::prelude::*;

use crate::store::{store_dismiss_toast, use_app_store, AppStateStoreFields};

#[component]
pub fn ToastStack() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-stack">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.notification.variant {
                        NotificationVariant::Success => "toast success",
                        NotificationVariant::Destructive => "toast destructive",
                    };
                    view! {
                        <div class=class role="status">
                            <strong>{toast.notification.title}</strong>
                            <p>{toast.notification.description}</p>
                            <button
                                class="toast-close"
                                on:click=move |_| store_dismiss_toast(&store, id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
