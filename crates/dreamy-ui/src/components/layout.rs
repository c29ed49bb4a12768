use dreamy_core::session::SessionEvent;
use yew::{
    AttrValue, Callback, Html, Properties, classes, function_component, html, use_context,
    use_effect_with, use_state,
};
use yew_router::components::Link;
use yew_router::hooks::use_navigator;

use crate::api::ApiClient;
use crate::app::Route;

#[derive(Properties, PartialEq)]
pub struct DashboardLayoutProps {
    pub active: AttrValue,
    pub children: Html,
}

/// Sidebar chrome around the authenticated screens. Redirects to login when
/// no token is present, and subscribes to the session store so the identity
/// block follows profile saves and logouts.
#[function_component(DashboardLayout)]
pub fn dashboard_layout(props: &DashboardLayoutProps) -> Html {
    let client = use_context::<ApiClient>().expect("api client context");
    let navigator = use_navigator().expect("router context");
    let identity = use_state(|| client.session().user());

    {
        let client = client.clone();
        let navigator = navigator.clone();
        use_effect_with((), move |_| {
            if !client.session().is_authenticated() {
                tracing::info!("unauthenticated visit, redirecting to login");
                navigator.push(&Route::Login);
            }
            || ()
        });
    }

    {
        let client = client.clone();
        let navigator = navigator.clone();
        let identity = identity.clone();
        use_effect_with((), move |_| {
            let session = client.session().clone();
            let subscriber = session.subscribe(move |event| match event {
                SessionEvent::Updated(user) => identity.set(Some(user.clone())),
                SessionEvent::Cleared => {
                    identity.set(None);
                    navigator.push(&Route::Login);
                }
            });
            move || session.unsubscribe(subscriber)
        });
    }

    let onlogout = {
        let client = client.clone();
        Callback::from(move |_| {
            tracing::info!("logging out");
            client.session().clear();
        })
    };

    let identity_block = match identity.as_ref() {
        Some(user) => {
            let avatar = if user.profile_image.is_empty() {
                let initial = user
                    .display_name()
                    .chars()
                    .next()
                    .map(|c| c.to_uppercase().to_string())
                    .unwrap_or_else(|| "?".to_string());
                html! { <div class="avatar placeholder">{ initial }</div> }
            } else {
                html! { <img class="avatar" src={user.profile_image.clone()} alt="profile" /> }
            };
            html! {
                <div class="identity">
                    { avatar }
                    <div class="name">{ user.display_name() }</div>
                    <div class="email">{ user.email.clone() }</div>
                </div>
            }
        }
        None => html! { <div class="identity" /> },
    };

    let nav_class = |key: &str| {
        if props.active.as_str() == key {
            classes!("nav-item", "active")
        } else {
            classes!("nav-item")
        }
    };

    html! {
        <div class="dashboard">
            <aside class="sidebar">
                <div class="brand">{ "Dreamy Todo" }</div>
                { identity_block }
                <nav>
                    <Link<Route> to={Route::Todos} classes={nav_class("todos")}>
                        { "Todos" }
                    </Link<Route>>
                    <Link<Route> to={Route::Profile} classes={nav_class("profile")}>
                        { "Profile" }
                    </Link<Route>>
                </nav>
                <button class="logout" onclick={onlogout}>{ "Logout" }</button>
            </aside>
            <main class="content">
                { props.children.clone() }
            </main>
        </div>
    }
}
