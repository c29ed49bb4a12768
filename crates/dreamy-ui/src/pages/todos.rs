use std::rc::Rc;

use dreamy_core::reorder::{ReorderQueue, check_reorder_allowed, plan_move};
use dreamy_core::todo::{Priority, TodoDraft, TodoItem};
use dreamy_core::validate::validate_todo_draft;
use dreamy_core::view::{SortMode, TodoQuery, visible_todos};
use yew::{
    Callback, Html, Reducible, function_component, html, use_context,
    use_effect_with, use_mut_ref, use_reducer, use_state,
};

use crate::api::ApiClient;
use crate::components::{DashboardLayout, TodoModal, TodoRow, TodoToolbar, inline_error};

/// The authoritative list. Rendering never touches it directly; every
/// mutation is one of these actions, applied on the latest state even when
/// dispatched from an async completion.
enum TodosAction {
    Loaded(Vec<TodoItem>),
    Created(TodoItem),
    Updated(TodoItem),
    Removed(i64),
    Restored(TodoItem),
    Reordered(Vec<TodoItem>),
}

#[derive(Default, PartialEq)]
struct TodosState {
    todos: Vec<TodoItem>,
}

impl Reducible for TodosState {
    type Action = TodosAction;

    fn reduce(self: Rc<Self>, action: TodosAction) -> Rc<Self> {
        let mut todos = self.todos.clone();
        match action {
            TodosAction::Loaded(list) | TodosAction::Reordered(list) => todos = list,
            TodosAction::Created(todo) => todos.insert(0, todo),
            TodosAction::Updated(todo) => {
                // Unmatched ids are a defensive no-op.
                if let Some(slot) = todos.iter_mut().find(|existing| existing.id == todo.id) {
                    *slot = todo;
                }
            }
            TodosAction::Removed(id) => todos.retain(|todo| todo.id != id),
            TodosAction::Restored(todo) => {
                // Position survives the round trip, so the derived view puts
                // the item straight back where it was.
                todos.push(todo);
            }
        }
        Rc::new(Self { todos })
    }
}

#[function_component(TodosPage)]
pub fn todos_page() -> Html {
    let client = use_context::<ApiClient>().expect("api client context");

    let state = use_reducer(TodosState::default);
    let queue = use_mut_ref(|| ReorderQueue::new(Vec::new()));

    let search = use_state(String::new);
    let priority = use_state(|| None::<Priority>);
    let sort = use_state(SortMode::default);

    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let reordering = use_state(|| false);
    let dragging = use_state(|| None::<i64>);
    let reload_tick = use_state(|| 0_u32);

    let modal = use_state(|| None::<TodoDraft>);
    let modal_error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    // Initial load, and explicit retries.
    {
        let client = client.clone();
        let state = state.clone();
        let queue = queue.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with(*reload_tick, move |_| {
            loading.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match client.list_todos().await {
                    Ok(list) => {
                        queue.borrow_mut().reset(list.clone());
                        state.dispatch(TodosAction::Loaded(list));
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "failed to load todos");
                        error.set(Some(err.to_string()));
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    // Keep the queue's committed baseline in step with non-reorder
    // mutations. While a batch is out the queue owns the baseline; the next
    // full reload reconciles anything that slips through that window.
    {
        let queue = queue.clone();
        use_effect_with(state.todos.clone(), move |todos| {
            let mut queue = queue.borrow_mut();
            if queue.is_idle() {
                queue.reset(todos.clone());
            }
            || ()
        });
    }

    let query = TodoQuery {
        search: (*search).clone(),
        priority: *priority,
        sort: *sort,
    };
    let visible = visible_todos(&state.todos, &query);

    let on_search = {
        let search = search.clone();
        Callback::from(move |value: String| search.set(value))
    };
    let on_priority = {
        let priority = priority.clone();
        Callback::from(move |value: Option<Priority>| priority.set(value))
    };
    let on_sort = {
        let sort = sort.clone();
        Callback::from(move |value: SortMode| sort.set(value))
    };

    let on_new = {
        let modal = modal.clone();
        let modal_error = modal_error.clone();
        Callback::from(move |()| {
            modal_error.set(None);
            modal.set(Some(TodoDraft::empty()));
        })
    };

    let on_edit = {
        let modal = modal.clone();
        let modal_error = modal_error.clone();
        Callback::from(move |todo: TodoItem| {
            modal_error.set(None);
            modal.set(Some(TodoDraft::for_edit(&todo)));
        })
    };

    let on_close = {
        let modal = modal.clone();
        let modal_error = modal_error.clone();
        Callback::from(move |()| {
            modal.set(None);
            modal_error.set(None);
        })
    };

    let on_save = {
        let client = client.clone();
        let state = state.clone();
        let modal = modal.clone();
        let modal_error = modal_error.clone();
        let saving = saving.clone();

        Callback::from(move |draft: TodoDraft| {
            if *saving {
                return;
            }

            // Local gate: an invalid draft never reaches the network.
            let payload = match validate_todo_draft(&draft) {
                Ok(payload) => payload,
                Err(message) => {
                    modal_error.set(Some(message));
                    return;
                }
            };

            saving.set(true);
            modal_error.set(None);

            let client = client.clone();
            let state = state.clone();
            let modal = modal.clone();
            let modal_error = modal_error.clone();
            let saving = saving.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match draft.id {
                    Some(id) => client.update_todo(id, &payload).await.map(|todo| {
                        state.dispatch(TodosAction::Updated(todo));
                    }),
                    None => client.create_todo(&payload).await.map(|todo| {
                        state.dispatch(TodosAction::Created(todo));
                    }),
                };

                match result {
                    Ok(()) => {
                        modal.set(None);
                        modal_error.set(None);
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "failed to save todo");
                        modal_error.set(Some(err.to_string()));
                    }
                }
                saving.set(false);
            });
        })
    };

    let on_delete = {
        let client = client.clone();
        let state = state.clone();
        let error = error.clone();

        Callback::from(move |id: i64| {
            let confirmed = web_sys::window()
                .and_then(|window| {
                    window
                        .confirm_with_message("Are you sure you want to delete this todo?")
                        .ok()
                })
                .unwrap_or(false);
            if !confirmed {
                return;
            }

            let Some(removed) = state.todos.iter().find(|todo| todo.id == id).cloned() else {
                return;
            };

            // Optimistic removal; the item is restored if the server says no.
            state.dispatch(TodosAction::Removed(id));

            let client = client.clone();
            let state = state.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match client.delete_todo(id).await {
                    Ok(()) => tracing::debug!(id, "todo deleted"),
                    Err(err) => {
                        tracing::error!(error = %err, id, "delete failed, restoring item");
                        state.dispatch(TodosAction::Restored(removed));
                        error.set(Some(err.to_string()));
                    }
                }
            });
        })
    };

    let on_drag_start = {
        let dragging = dragging.clone();
        Callback::from(move |id: i64| dragging.set(Some(id)))
    };
    let on_drag_end = {
        let dragging = dragging.clone();
        Callback::from(move |()| dragging.set(None))
    };

    let on_drop_on = {
        let client = client.clone();
        let state = state.clone();
        let queue = queue.clone();
        let query = query.clone();
        let error = error.clone();
        let reordering = reordering.clone();
        let dragging = dragging.clone();

        Callback::from(move |(dragged, target): (i64, i64)| {
            dragging.set(None);

            if let Err(blocked) = check_reorder_allowed(&query) {
                tracing::debug!(?blocked, "reorder rejected");
                error.set(Some(blocked.message().to_string()));
                return;
            }

            let Some(plan) = plan_move(&state.todos, dragged, target) else {
                return;
            };

            // Optimistic apply, then hand the ordering to the queue. If a
            // batch is already out this collapses onto it and the pump loop
            // below picks it up on acknowledgement.
            state.dispatch(TodosAction::Reordered(plan.ordered.clone()));
            let Some(first_batch) = queue.borrow_mut().submit(plan.ordered) else {
                return;
            };

            reordering.set(true);
            error.set(None);

            let client = client.clone();
            let state = state.clone();
            let queue = queue.clone();
            let error = error.clone();
            let reordering = reordering.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let mut batch = first_batch;
                loop {
                    match client.persist_reorder(&batch).await {
                        Ok(()) => {
                            let next = queue.borrow_mut().complete_success();
                            match next {
                                Some(follow_up) => batch = follow_up,
                                None => break,
                            }
                        }
                        Err(err) => {
                            tracing::error!(error = %err, "reorder persistence failed, reverting");
                            let committed = queue.borrow_mut().complete_failure();
                            state.dispatch(TodosAction::Reordered(committed));
                            error.set(Some(err.to_string()));
                            break;
                        }
                    }
                }
                reordering.set(false);
            });
        })
    };

    let onretry = {
        let reload_tick = reload_tick.clone();
        Callback::from(move |_| reload_tick.set(*reload_tick + 1))
    };

    let list = if *loading {
        html! { <div class="state">{ "Loading todos..." }</div> }
    } else if error.is_some() && state.todos.is_empty() {
        html! {
            <div class="state">
                { inline_error(error.as_deref().unwrap_or_default()) }
                <button class="primary" onclick={onretry}>{ "Try again" }</button>
            </div>
        }
    } else if visible.is_empty() {
        let message = if state.todos.is_empty() {
            "No todos yet. Create your first task."
        } else {
            "No todos match your filters."
        };
        html! { <div class="state empty">{ message }</div> }
    } else {
        html! {
            <div class="todo-list">
                {
                    for visible.iter().map(|todo| html! {
                        <TodoRow
                            key={todo.id}
                            todo={todo.clone()}
                            dragging={*dragging == Some(todo.id)}
                            on_edit={on_edit.clone()}
                            on_delete={on_delete.clone()}
                            on_drag_start={on_drag_start.clone()}
                            on_drag_end={on_drag_end.clone()}
                            on_drop_on={on_drop_on.clone()}
                        />
                    })
                }
            </div>
        }
    };

    // The list-level banner only shows alongside content; with an empty
    // list the error takes over the list area instead.
    let banner = if state.todos.is_empty() {
        None
    } else {
        (*error).clone()
    };

    html! {
        <DashboardLayout active="todos">
            <div class="page-head">
                <h1>{ "Todos" }</h1>
                if *reordering {
                    <span class="syncing">{ "Saving order..." }</span>
                }
            </div>
            if let Some(message) = banner {
                { inline_error(&message) }
            }
            <TodoToolbar
                search={(*search).clone()}
                priority={*priority}
                sort={*sort}
                on_search={on_search}
                on_priority={on_priority}
                on_sort={on_sort}
                on_new={on_new}
            />
            { list }
            if let Some(draft) = (*modal).clone() {
                <TodoModal
                    draft={draft}
                    saving={*saving}
                    error={(*modal_error).clone()}
                    on_save={on_save.clone()}
                    on_close={on_close.clone()}
                />
            }
        </DashboardLayout>
    }
}
