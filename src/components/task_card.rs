//! Task Card Component
//!
//! A draggable card. A press without movement counts as a click and opens
//! the detail panel (handled where releases are dispatched).

use kanban_core::DragPayload;
use leptos::prelude::*;
use leptos_dragdrop::{make_on_leave, make_on_mousedown, make_on_over};

use crate::context::use_board;

#[component]
pub fn TaskCard(task_id: String) -> impl IntoView {
    let ctx = use_board();
    let payload = DragPayload::Card(task_id.clone());

    let id = task_id.clone();
    let task = move || ctx.board.with(|b| b.card(&id).map(|c| c.task.clone()));

    let dragged = payload.clone();
    let is_dragging = move || ctx.dnd.is_dragging_item(&dragged);
    let target = payload.clone();
    let is_over = move || ctx.dnd.is_over(&target);

    // Cards only take card drops; a dragged column falls through to the
    // column underneath
    let on_over = make_on_over(ctx.dnd, payload.clone());
    let on_over = move |ev: web_sys::MouseEvent| {
        let carrying_card = ctx.dnd.active().is_some_and(|active| !active.is_column());
        if carrying_card {
            on_over(ev);
        }
    };

    view! {
        <article
            class=move || {
                let mut c = "task-card".to_string();
                if is_dragging() { c.push_str(" dragging"); }
                if is_over() { c.push_str(" drop-over"); }
                c
            }
            on:mousedown=make_on_mousedown(ctx.dnd, payload.clone())
            on:mouseover=on_over
            on:mouseleave=make_on_leave(ctx.dnd, payload.clone())
        >
            {move || task().map(|task| {
                let progress = task.subtask_progress();
                let assignee = task.assignee_name();
                view! {
                    <h3 class="task-title">{task.title.clone()}</h3>
                    <div class="task-meta">
                        {task.priority.clone().map(|p| {
                            let class = format!("priority priority-{}", p.to_lowercase());
                            view! { <span class=class>{p}</span> }
                        })}
                        {task.due_date.clone().map(|d| view! { <span class="due-date">{d}</span> })}
                        {assignee.map(|a| view! { <span class="assignee">{a}</span> })}
                        {progress.map(|(done, total)| view! {
                            <span class="subtask-progress">{format!("{}/{}", done, total)}</span>
                        })}
                    </div>
                }
            })}
        </article>
    }
}
