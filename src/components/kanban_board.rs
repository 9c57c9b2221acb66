//! Kanban Board Component
//!
//! Column strip with the board toolbar. Owns the document-level drag
//! listeners and turns releases into board operations.

use kanban_core::DragPayload;
use leptos::prelude::*;
use leptos_dragdrop::{bind_global_listeners, Release};

use crate::components::{AddColumnForm, KanbanColumn};
use crate::context::use_board;
use crate::store::{store_select_task, use_app_store};

#[component]
pub fn KanbanBoard() -> impl IntoView {
    let ctx = use_board();
    let store = use_app_store();

    bind_global_listeners(ctx.dnd, move |release| match release {
        Release::Drop { active, over } => ctx.drop_on(active, over),
        Release::Click(DragPayload::Card(task_id)) => store_select_task(&store, Some(task_id)),
        Release::Click(DragPayload::Column(_)) | Release::Nothing => {}
    });

    let column_ids = move || {
        ctx.board
            .with(|b| b.columns().iter().map(|c| c.id.clone()).collect::<Vec<_>>())
    };
    let board_id = move || ctx.board.with(|b| b.board_id().to_string());
    let hidden = move || ctx.hidden_count();

    view! {
        <div class=move || if ctx.dnd.is_dragging() { "kanban-board dragging" } else { "kanban-board" }>
            <div class="board-toolbar">
                <h1>{board_id}</h1>
                <Show when=move || { hidden() > 0 }>
                    <span
                        class="hidden-count"
                        title="Tasks whose status matches no column"
                    >
                        {move || format!("{} hidden", hidden())}
                    </span>
                </Show>
                <button
                    class="reload-btn"
                    disabled=move || ctx.loading.get()
                    on:click=move |_| ctx.reload()
                >
                    {move || if ctx.loading.get() { "Loading..." } else { "Reload" }}
                </button>
                <AddColumnForm />
            </div>

            <div class="board-columns">
                <For
                    each=column_ids
                    key=|id| id.clone()
                    children=move |column_id| view! { <KanbanColumn column_id=column_id /> }
                />
            </div>
        </div>
    }
}
