use dreamy_core::todo::TodoItem;
use web_sys::DragEvent;
use yew::{Callback, Html, Properties, classes, function_component, html};

use super::priority_badge;

#[derive(Properties, PartialEq)]
pub struct TodoRowProps {
    pub todo: TodoItem,
    pub dragging: bool,
    pub on_edit: Callback<TodoItem>,
    pub on_delete: Callback<i64>,
    pub on_drag_start: Callback<i64>,
    pub on_drag_end: Callback<()>,
    /// (dragged id, drop target id), resolved from the drag payload.
    pub on_drop_on: Callback<(i64, i64)>,
}

#[function_component(TodoRow)]
pub fn todo_row(props: &TodoRowProps) -> Html {
    let id = props.todo.id;

    let ondragstart = {
        let on_drag_start = props.on_drag_start.clone();
        Callback::from(move |event: DragEvent| {
            if let Some(transfer) = event.data_transfer() {
                let _ = transfer.set_data("text/plain", &id.to_string());
                transfer.set_effect_allowed("move");
            }
            on_drag_start.emit(id);
        })
    };

    let ondragend = {
        let on_drag_end = props.on_drag_end.clone();
        Callback::from(move |_event: DragEvent| on_drag_end.emit(()))
    };

    let ondragover = Callback::from(|event: DragEvent| {
        // Required for the row to count as a drop target.
        event.prevent_default();
    });

    let ondrop = {
        let on_drop_on = props.on_drop_on.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            let Some(transfer) = event.data_transfer() else {
                return;
            };
            match transfer.get_data("text/plain") {
                Ok(raw) => match raw.trim().parse::<i64>() {
                    Ok(dragged) => on_drop_on.emit((dragged, id)),
                    Err(_) => {
                        tracing::warn!(raw, "failed to parse dragged todo id");
                    }
                },
                Err(error) => {
                    tracing::warn!(?error, "drop without a readable payload");
                }
            }
        })
    };

    let onedit = {
        let on_edit = props.on_edit.clone();
        let todo = props.todo.clone();
        Callback::from(move |_| on_edit.emit(todo.clone()))
    };

    let ondelete = {
        let on_delete = props.on_delete.clone();
        Callback::from(move |_| on_delete.emit(id))
    };

    let row_class = classes!(
        "todo-row",
        props.dragging.then_some("dragging"),
        props.todo.is_completed.then_some("completed"),
    );

    html! {
        <div
            class={row_class}
            draggable="true"
            {ondragstart}
            {ondragend}
            {ondragover}
            {ondrop}
        >
            <div class="grip" title="Drag to reorder">{ "⠿" }</div>
            <div class="body">
                <div class="title">{ &props.todo.title }</div>
                if !props.todo.description.is_empty() {
                    <div class="description">{ &props.todo.description }</div>
                }
                <div class="meta">
                    { priority_badge(props.todo.priority) }
                    <span class="due">{ props.todo.todo_date.format("%b %d, %Y").to_string() }</span>
                    if props.todo.is_completed {
                        <span class="done">{ "Completed" }</span>
                    }
                </div>
            </div>
            <div class="actions">
                <button class="ghost" onclick={onedit}>{ "Edit" }</button>
                <button class="ghost danger" onclick={ondelete}>{ "Delete" }</button>
            </div>
        </div>
    }
}
