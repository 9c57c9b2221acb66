//! Kanban Column Component
//!
//! One column: draggable header, inline rename, delete for user columns,
//! and the column's cards. The whole column is a drop target for cards
//! and for other columns.

use kanban_core::DragPayload;
use leptos::prelude::*;
use leptos_dragdrop::{make_on_leave, make_on_mousedown, make_on_over};
use wasm_bindgen::JsCast;

use crate::components::{DeleteConfirmButton, TaskCard};
use crate::context::use_board;

#[component]
pub fn KanbanColumn(column_id: String) -> impl IntoView {
    let ctx = use_board();
    let payload = DragPayload::Column(column_id.clone());

    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(String::new());
    let (rename_error, set_rename_error) = signal::<Option<String>>(None);

    let id = column_id.clone();
    let column = move || ctx.board.with(|b| b.column(&id).cloned());
    let id = column_id.clone();
    let card_ids = move || {
        ctx.board.with(|b| {
            b.column_cards(&id)
                .map(|c| c.id().to_string())
                .collect::<Vec<_>>()
        })
    };
    let count = {
        let card_ids = card_ids.clone();
        move || card_ids().len()
    };

    let dragged = payload.clone();
    let is_dragging = move || ctx.dnd.is_dragging_item(&dragged);
    let target = payload.clone();
    let is_over = move || ctx.dnd.is_over(&target);

    let id = column_id.clone();
    let commit_rename = move || {
        match ctx.rename_column(&id, &draft.get_untracked()) {
            Ok(()) => {
                set_rename_error.set(None);
                set_editing.set(false);
            }
            Err(e) => set_rename_error.set(Some(e)),
        }
    };

    let title = {
        let column = column.clone();
        move || column().map(|c| c.title).unwrap_or_default()
    };
    let is_default = {
        let column = column.clone();
        move || column().map(|c| c.is_default()).unwrap_or(true)
    };

    let start_rename = {
        let title = title.clone();
        move |_: web_sys::MouseEvent| {
            set_draft.set(title());
            set_rename_error.set(None);
            set_editing.set(true);
        }
    };

    let id = column_id.clone();
    let on_delete = Callback::new(move |_| ctx.delete_column(&id));

    view! {
        <section
            class=move || {
                let mut c = "kanban-column".to_string();
                if is_dragging() { c.push_str(" dragging"); }
                if is_over() { c.push_str(" drop-over"); }
                c
            }
            on:mouseover=make_on_over(ctx.dnd, payload.clone())
            on:mouseleave=make_on_leave(ctx.dnd, payload.clone())
        >
            <header class="column-header" on:mousedown=make_on_mousedown(ctx.dnd, payload.clone())>
                <Show
                    when=move || editing.get()
                    fallback={
                        let title = title.clone();
                        move || view! {
                            <h2 class="column-title" on:dblclick=start_rename.clone()>{title.clone()}</h2>
                        }
                    }
                >
                    <form
                        class="rename-form"
                        on:submit={
                            let commit_rename = commit_rename.clone();
                            move |ev: web_sys::SubmitEvent| {
                                ev.prevent_default();
                                commit_rename();
                            }
                        }
                    >
                        <input
                            type="text"
                            prop:value=move || draft.get()
                            on:input=move |ev| {
                                if let Some(input) = ev
                                    .target()
                                    .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                                {
                                    set_draft.set(input.value());
                                }
                            }
                            on:keydown=move |ev: web_sys::KeyboardEvent| {
                                if ev.key() == "Escape" {
                                    set_editing.set(false);
                                }
                            }
                        />
                        <button type="submit">"Save"</button>
                    </form>
                    {move || rename_error.get().map(|e| view! { <p class="form-error">{e}</p> })}
                </Show>
                <span class="column-count">{count}</span>
                <Show when=move || !is_default()>
                    <DeleteConfirmButton
                        button_class="column-delete-btn"
                        prompt="Delete column?"
                        on_confirm=on_delete
                    />
                </Show>
            </header>

            <div class="column-cards">
                <For
                    each=card_ids
                    key=|id| id.clone()
                    children=move |task_id| view! { <TaskCard task_id=task_id /> }
                />
            </div>
        </section>
    }
}
