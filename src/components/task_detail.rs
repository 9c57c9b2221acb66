//! Task Detail Panel
//!
//! Side panel for the selected task. Read-only; the card's column is the
//! only thing the board edits.

use kanban_core::Task;
use leptos::prelude::*;
use serde_json::Value;

use crate::context::use_board;
use crate::store::{store_select_task, use_app_store, AppStateStoreFields};

fn hours(value: Option<f64>) -> String {
    value.map(|h| format!("{}h", h)).unwrap_or_else(|| "-".to_string())
}

fn subtask_line(subtask: &Value) -> (String, bool) {
    let title = ["title", "name"]
        .iter()
        .find_map(|key| subtask.get(*key).and_then(Value::as_str))
        .unwrap_or("(untitled)")
        .to_string();
    let done = subtask
        .get("completed")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    (title, done)
}

#[component]
pub fn TaskDetail() -> impl IntoView {
    let ctx = use_board();
    let store = use_app_store();

    // Task, the title of the column it sits in, and the status it shows
    let selected = move || {
        let task_id = store.selected_task_id().get()?;
        ctx.board.with(|b| {
            let card = b.card(&task_id)?;
            let column = b.column(&card.column_id).map(|c| c.title.clone());
            let status = b.shown_status(&task_id)?.to_string();
            Some((card.task.clone(), column, status))
        })
    };

    let close = move |_: web_sys::MouseEvent| store_select_task(&store, None);

    view! {
        {move || selected().map(|(task, column, status): (Task, Option<String>, String)| {
            let column_title = column.unwrap_or_else(|| "(hidden)".to_string());
            let subtasks: Vec<(String, bool)> = task.subtasks.iter().map(subtask_line).collect();
            view! {
                <aside class="task-detail">
                    <header>
                        <h2>{task.title.clone()}</h2>
                        <button class="close-btn" on:click=close>"×"</button>
                    </header>
                    <dl>
                        <dt>"Status"</dt>
                        <dd>{status}</dd>
                        <dt>"Column"</dt>
                        <dd>{column_title}</dd>
                        <dt>"Priority"</dt>
                        <dd>{task.priority.clone().unwrap_or_else(|| "-".to_string())}</dd>
                        <dt>"Due"</dt>
                        <dd>{task.due_date.clone().unwrap_or_else(|| "-".to_string())}</dd>
                        <dt>"Assignee"</dt>
                        <dd>{task.assignee_name().unwrap_or_else(|| "-".to_string())}</dd>
                        <dt>"Estimated"</dt>
                        <dd>{hours(task.estimated_time)}</dd>
                        <dt>"Logged"</dt>
                        <dd>{hours(task.logged_time)}</dd>
                    </dl>
                    <Show when={
                        let empty = subtasks.is_empty();
                        move || !empty
                    }>
                        <h3>"Subtasks"</h3>
                    </Show>
                    <ul class="subtasks">
                        {subtasks.into_iter().map(|(title, done)| view! {
                            <li class={if done { "subtask done" } else { "subtask" }}>{title}</li>
                        }).collect_view()}
                    </ul>
                </aside>
            }
        })}
    }
}
