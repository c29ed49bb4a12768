use dreamy_core::todo::{Priority, TodoDraft};
use web_sys::{Event, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, InputEvent, SubmitEvent};
use yew::{Callback, Html, Properties, TargetCast, function_component, html, use_state};

use super::inline_error;

#[derive(Properties, PartialEq)]
pub struct TodoModalProps {
    /// Prefilled for edits; `id` decides create vs update on save.
    pub draft: TodoDraft,
    pub saving: bool,
    pub error: Option<String>,
    pub on_save: Callback<TodoDraft>,
    pub on_close: Callback<()>,
}

#[function_component(TodoModal)]
pub fn todo_modal(props: &TodoModalProps) -> Html {
    let draft = use_state(|| props.draft.clone());

    let ontitle = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            draft.set(TodoDraft {
                title: input.value(),
                ..(*draft).clone()
            });
        })
    };

    let ondescription = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            let area: HtmlTextAreaElement = event.target_unchecked_into();
            draft.set(TodoDraft {
                description: area.value(),
                ..(*draft).clone()
            });
        })
    };

    let ondate = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            draft.set(TodoDraft {
                todo_date: input.value(),
                ..(*draft).clone()
            });
        })
    };

    let onpriority = {
        let draft = draft.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            let priority = Priority::parse(&select.value()).unwrap_or(Priority::Moderate);
            draft.set(TodoDraft {
                priority,
                ..(*draft).clone()
            });
        })
    };

    let onsubmit = {
        let draft = draft.clone();
        let on_save = props.on_save.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            on_save.emit((*draft).clone());
        })
    };

    let onclose = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    let heading = if props.draft.id.is_some() {
        "Edit Task"
    } else {
        "New Task"
    };

    html! {
        <div class="modal-backdrop">
            <form class="modal" onsubmit={onsubmit}>
                <h2>{ heading }</h2>
                if let Some(message) = props.error.as_deref() {
                    { inline_error(message) }
                }
                <label for="todo-title">{ "Title" }</label>
                <input
                    id="todo-title"
                    value={draft.title.clone()}
                    oninput={ontitle}
                    placeholder="What needs doing?"
                />
                <label for="todo-description">{ "Description" }</label>
                <textarea
                    id="todo-description"
                    value={draft.description.clone()}
                    oninput={ondescription}
                />
                <label for="todo-date">{ "Due date" }</label>
                <input
                    id="todo-date"
                    type="date"
                    value={draft.todo_date.clone()}
                    oninput={ondate}
                />
                <label for="todo-priority">{ "Priority" }</label>
                <select id="todo-priority" onchange={onpriority}>
                    {
                        for Priority::ALL.iter().map(|priority| html! {
                            <option
                                value={priority.as_str()}
                                selected={draft.priority == *priority}
                            >
                                { priority.label() }
                            </option>
                        })
                    }
                </select>
                <div class="modal-actions">
                    <button type="button" class="ghost" onclick={onclose}>{ "Cancel" }</button>
                    <button type="submit" class="primary" disabled={props.saving}>
                        { if props.saving { "Saving..." } else { "Save" } }
                    </button>
                </div>
            </form>
        </div>
    }
}
