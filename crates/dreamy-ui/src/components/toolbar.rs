use dreamy_core::todo::Priority;
use dreamy_core::view::SortMode;
use web_sys::{Event, HtmlInputElement, HtmlSelectElement, InputEvent};
use yew::{Callback, Html, Properties, TargetCast, function_component, html};

#[derive(Properties, PartialEq)]
pub struct TodoToolbarProps {
    pub search: String,
    pub priority: Option<Priority>,
    pub sort: SortMode,
    pub on_search: Callback<String>,
    pub on_priority: Callback<Option<Priority>>,
    pub on_sort: Callback<SortMode>,
    pub on_new: Callback<()>,
}

#[function_component(TodoToolbar)]
pub fn todo_toolbar(props: &TodoToolbarProps) -> Html {
    let oninput = {
        let on_search = props.on_search.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            on_search.emit(input.value());
        })
    };

    let on_priority_change = {
        let on_priority = props.on_priority.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            on_priority.emit(Priority::parse(&select.value()));
        })
    };

    let on_sort_change = {
        let on_sort = props.on_sort.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            on_sort.emit(SortMode::parse(&select.value()));
        })
    };

    let onnew = {
        let on_new = props.on_new.clone();
        Callback::from(move |_| on_new.emit(()))
    };

    html! {
        <div class="toolbar">
            <input
                class="search"
                placeholder="Search your task here..."
                value={props.search.clone()}
                oninput={oninput}
            />
            <select onchange={on_priority_change}>
                <option value="all" selected={props.priority.is_none()}>{ "All priorities" }</option>
                {
                    for Priority::ALL.iter().map(|priority| html! {
                        <option
                            value={priority.as_str()}
                            selected={props.priority == Some(*priority)}
                        >
                            { priority.label() }
                        </option>
                    })
                }
            </select>
            <select onchange={on_sort_change}>
                <option value="custom" selected={props.sort == SortMode::Manual}>{ "Custom order" }</option>
                <option value="date-asc" selected={props.sort == SortMode::DateAsc}>{ "Date (earliest first)" }</option>
                <option value="date-desc" selected={props.sort == SortMode::DateDesc}>{ "Date (latest first)" }</option>
            </select>
            <button class="primary" onclick={onnew}>{ "+ New Task" }</button>
        </div>
    }
}
