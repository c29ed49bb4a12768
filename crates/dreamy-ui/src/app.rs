use yew::{ContextProvider, Html, function_component, html, use_state};
use yew_router::{BrowserRouter, Routable, Switch};

use crate::api::ApiClient;
use crate::pages::{LoginPage, ProfilePage, SignupPage, TodosPage};
use crate::session::browser_session;

#[derive(Clone, Copy, Routable, PartialEq)]
pub enum Route {
    #[at("/login")]
    Login,
    #[at("/signup")]
    Signup,
    #[at("/")]
    Todos,
    #[at("/profile")]
    Profile,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Login => html! { <LoginPage /> },
        Route::Signup => html! { <SignupPage /> },
        Route::Todos | Route::NotFound => html! { <TodosPage /> },
        Route::Profile => html! { <ProfilePage /> },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    // One session store and one API client for the whole tree.
    let client = use_state(|| ApiClient::new(browser_session()));

    html! {
        <BrowserRouter>
            <ContextProvider<ApiClient> context={(*client).clone()}>
                <Switch<Route> render={switch} />
            </ContextProvider<ApiClient>>
        </BrowserRouter>
    }
}
