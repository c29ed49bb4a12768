use dreamy_core::validate::LoginForm;
use web_sys::{HtmlInputElement, InputEvent, SubmitEvent};
use yew::{
    Callback, Html, TargetCast, function_component, html, use_context, use_effect_with, use_state,
};
use yew_router::components::Link;
use yew_router::hooks::use_navigator;

use crate::api::ApiClient;
use crate::app::Route;
use crate::components::inline_error;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let client = use_context::<ApiClient>().expect("api client context");
    let navigator = use_navigator().expect("router context");

    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    // Already signed in: skip straight to the list.
    {
        let client = client.clone();
        let navigator = navigator.clone();
        use_effect_with((), move |_| {
            if client.session().is_authenticated() {
                navigator.push(&Route::Todos);
            }
            || ()
        });
    }

    let onemail = {
        let email = email.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            email.set(input.value());
        })
    };

    let onpassword = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            password.set(input.value());
        })
    };

    let onsubmit = {
        let client = client.clone();
        let navigator = navigator.clone();
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let busy = busy.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *busy {
                return;
            }

            let form = LoginForm {
                email: (*email).clone(),
                password: (*password).clone(),
            };
            let payload = match form.validate() {
                Ok(payload) => payload,
                Err(message) => {
                    error.set(Some(message));
                    return;
                }
            };

            busy.set(true);
            error.set(None);

            let client = client.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let busy = busy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match client.login(&payload).await {
                    Ok(user) => {
                        tracing::info!(user = %user.email, "logged in");
                        navigator.push(&Route::Todos);
                    }
                    Err(err) => {
                        // A 401 here means bad credentials, not an expired
                        // session.
                        let message = if err.is_unauthorized() {
                            "Invalid email or password. Please try again.".to_string()
                        } else {
                            err.to_string()
                        };
                        tracing::warn!(error = %err, "login failed");
                        error.set(Some(message));
                    }
                }
                busy.set(false);
            });
        })
    };

    html! {
        <div class="auth-screen">
            <form class="auth-card" onsubmit={onsubmit}>
                <h1>{ "Sign In" }</h1>
                if let Some(message) = error.as_deref() {
                    { inline_error(message) }
                }
                <label for="email">{ "Email" }</label>
                <input id="email" type="email" value={(*email).clone()} oninput={onemail} />
                <label for="password">{ "Password" }</label>
                <input
                    id="password"
                    type="password"
                    value={(*password).clone()}
                    oninput={onpassword}
                />
                <button type="submit" class="primary" disabled={*busy}>
                    { if *busy { "Signing in..." } else { "Sign In" } }
                </button>
                <p class="switch">
                    { "Don't have an account? " }
                    <Link<Route> to={Route::Signup}>{ "Sign up" }</Link<Route>>
                </p>
            </form>
        </div>
    }
}
