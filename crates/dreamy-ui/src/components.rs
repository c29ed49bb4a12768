use dreamy_core::todo::Priority;
use yew::{Html, classes, html};

mod layout;
mod todo_modal;
mod todo_row;
mod toolbar;

pub use layout::DashboardLayout;
pub use todo_modal::TodoModal;
pub use todo_row::TodoRow;
pub use toolbar::TodoToolbar;

pub fn priority_badge(priority: Priority) -> Html {
    let tone = match priority {
        Priority::Extreme => "badge-extreme",
        Priority::Moderate => "badge-moderate",
        Priority::Low => "badge-low",
    };
    html! {
        <span class={classes!("badge", tone)}>{ priority.label() }</span>
    }
}

pub fn inline_error(message: &str) -> Html {
    html! {
        <div class="banner error">{ message }</div>
    }
}
