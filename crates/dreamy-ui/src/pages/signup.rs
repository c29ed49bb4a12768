use dreamy_core::validate::{SignupErrors, SignupForm};
use web_sys::{HtmlInputElement, InputEvent, SubmitEvent};
use yew::{
    Callback, Html, TargetCast, UseStateHandle, function_component, html, use_context, use_state,
};
use yew_router::components::Link;
use yew_router::hooks::use_navigator;

use crate::api::ApiClient;
use crate::app::Route;
use crate::components::inline_error;

fn field_error(message: Option<&'static str>) -> Html {
    match message {
        Some(text) => html! { <p class="field-error">{ text }</p> },
        None => Html::default(),
    }
}

#[function_component(SignupPage)]
pub fn signup_page() -> Html {
    let client = use_context::<ApiClient>().expect("api client context");
    let navigator = use_navigator().expect("router context");

    let form = use_state(SignupForm::default);
    let errors = use_state(SignupErrors::default);
    let api_error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let edit = |apply: fn(&mut SignupForm, String)| {
        let form: UseStateHandle<SignupForm> = form.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let mut next = (*form).clone();
            apply(&mut next, input.value());
            form.set(next);
        })
    };

    let onfirst = edit(|form, value| form.first_name = value);
    let onlast = edit(|form, value| form.last_name = value);
    let onemail = edit(|form, value| form.email = value);
    let onpassword = edit(|form, value| form.password = value);
    let onconfirm = edit(|form, value| form.confirm_password = value);

    let onsubmit = {
        let client = client.clone();
        let navigator = navigator.clone();
        let form = form.clone();
        let errors = errors.clone();
        let api_error = api_error.clone();
        let busy = busy.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *busy {
                return;
            }

            let payload = match form.validate() {
                Ok(payload) => {
                    errors.set(SignupErrors::default());
                    payload
                }
                Err(next) => {
                    errors.set(next);
                    return;
                }
            };

            busy.set(true);
            api_error.set(None);

            let client = client.clone();
            let navigator = navigator.clone();
            let api_error = api_error.clone();
            let busy = busy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match client.signup(&payload).await {
                    Ok(()) => {
                        tracing::info!("account created");
                        navigator.push(&Route::Todos);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "signup failed");
                        api_error.set(Some(err.to_string()));
                    }
                }
                busy.set(false);
            });
        })
    };

    html! {
        <div class="auth-screen">
            <form class="auth-card" onsubmit={onsubmit}>
                <h1>{ "Create Account" }</h1>
                if let Some(message) = api_error.as_deref() {
                    { inline_error(message) }
                }
                <label for="first-name">{ "First name" }</label>
                <input id="first-name" value={form.first_name.clone()} oninput={onfirst} />
                { field_error(errors.first_name) }
                <label for="last-name">{ "Last name" }</label>
                <input id="last-name" value={form.last_name.clone()} oninput={onlast} />
                { field_error(errors.last_name) }
                <label for="email">{ "Email" }</label>
                <input id="email" type="email" value={form.email.clone()} oninput={onemail} />
                { field_error(errors.email) }
                <label for="password">{ "Password" }</label>
                <input
                    id="password"
                    type="password"
                    value={form.password.clone()}
                    oninput={onpassword}
                />
                { field_error(errors.password) }
                <label for="confirm-password">{ "Confirm password" }</label>
                <input
                    id="confirm-password"
                    type="password"
                    value={form.confirm_password.clone()}
                    oninput={onconfirm}
                />
                { field_error(errors.confirm_password) }
                <button type="submit" class="primary" disabled={*busy}>
                    { if *busy { "Creating account..." } else { "Sign Up" } }
                </button>
                <p class="switch">
                    { "Already have an account? " }
                    <Link<Route> to={Route::Login}>{ "Sign in" }</Link<Route>>
                </p>
            </form>
        </div>
    }
}
