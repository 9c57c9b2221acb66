//! Add Column Form Component

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::context::use_board;

#[component]
pub fn AddColumnForm() -> impl IntoView {
    let ctx = use_board();

    let (new_title, set_new_title) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let add_column = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = new_title.get();
        if title.trim().is_empty() {
            return;
        }
        match ctx.add_column(&title) {
            Ok(column) => {
                log::info!("added column '{}' ({})", column.title, column.id);
                set_new_title.set(String::new());
                set_error.set(None);
            }
            Err(e) => set_error.set(Some(e)),
        }
    };

    view! {
        <form class="add-column-form" on:submit=add_column>
            <input
                type="text"
                placeholder="New column..."
                prop:value=move || new_title.get()
                on:input=move |ev| {
                    if let Some(input) = ev
                        .target()
                        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                    {
                        set_new_title.set(input.value());
                    }
                }
            />
            <button type="submit">"Add column"</button>
            {move || error.get().map(|e| view! { <span class="form-error">{e}</span> })}
        </form>
    }
}
