use dreamy_core::user::ProfileDraft;
use dreamy_core::validate::validate_profile;
use web_sys::{Event, HtmlInputElement, HtmlTextAreaElement, InputEvent, SubmitEvent};
use yew::{
    Callback, Html, TargetCast, UseStateHandle, function_component, html, use_context,
    use_effect_with, use_state,
};
use crate::api::ApiClient;
use crate::components::{DashboardLayout, inline_error};

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let client = use_context::<ApiClient>().expect("api client context");

    let draft = use_state(ProfileDraft::default);
    let avatar = use_state(|| None::<String>);
    let photo = use_state(|| None::<web_sys::File>);
    let preview = use_state(|| None::<String>);
    let loading = use_state(|| true);
    let load_error = use_state(|| None::<String>);
    let saving = use_state(|| false);
    let notice = use_state(|| None::<Result<String, String>>);
    let reload_tick = use_state(|| 0_u32);

    {
        let client = client.clone();
        let draft = draft.clone();
        let avatar = avatar.clone();
        let loading = loading.clone();
        let load_error = load_error.clone();
        use_effect_with(*reload_tick, move |_| {
            loading.set(true);
            load_error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match client.me().await {
                    Ok(user) => {
                        draft.set(ProfileDraft::from_user(&user));
                        avatar.set(
                            (!user.profile_image.is_empty()).then(|| user.profile_image.clone()),
                        );
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "failed to load profile");
                        load_error.set(Some(err.to_string()));
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    // The API client already cleared the session on a 401; the layout's
    // subscription handles the redirect. Here we only surface read errors.

    let edit = |apply: fn(&mut ProfileDraft, String)| {
        let draft: UseStateHandle<ProfileDraft> = draft.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let mut next = (*draft).clone();
            apply(&mut next, input.value());
            draft.set(next);
        })
    };

    let onfirst = edit(|draft, value| draft.first_name = value);
    let onlast = edit(|draft, value| draft.last_name = value);
    let onemail = edit(|draft, value| draft.email = value);
    let onaddress = edit(|draft, value| draft.address = value);
    let oncontact = edit(|draft, value| draft.contact_number = value);
    let onbirthday = edit(|draft, value| draft.birthday = value);

    let onbio = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            let area: HtmlTextAreaElement = event.target_unchecked_into();
            let mut next = (*draft).clone();
            next.bio = area.value();
            draft.set(next);
        })
    };

    let onphoto = {
        let photo = photo.clone();
        let preview = preview.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let file = input.files().and_then(|files| files.get(0));
            if let Some(file) = file.as_ref() {
                // Object URL for the pre-upload preview.
                if let Ok(url) = web_sys::Url::create_object_url_with_blob(file) {
                    preview.set(Some(url));
                }
            }
            photo.set(file);
        })
    };

    let onretry = {
        let reload_tick = reload_tick.clone();
        Callback::from(move |_| reload_tick.set(*reload_tick + 1))
    };

    let onsubmit = {
        let client = client.clone();
        let draft = draft.clone();
        let photo = photo.clone();
        let preview = preview.clone();
        let avatar = avatar.clone();
        let saving = saving.clone();
        let notice = notice.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *saving {
                return;
            }

            if let Err(message) = validate_profile(&draft) {
                notice.set(Some(Err(message)));
                return;
            }

            saving.set(true);
            notice.set(None);

            let client = client.clone();
            let payload = (*draft).clone();
            let file = (*photo).clone();
            let draft = draft.clone();
            let photo = photo.clone();
            let preview = preview.clone();
            let avatar = avatar.clone();
            let saving = saving.clone();
            let notice = notice.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match client.update_profile(&payload, file.as_ref()).await {
                    Ok(user) => {
                        tracing::info!("profile saved");
                        draft.set(ProfileDraft::from_user(&user));
                        avatar.set(
                            (!user.profile_image.is_empty()).then(|| user.profile_image.clone()),
                        );
                        photo.set(None);
                        preview.set(None);
                        notice.set(Some(Ok("Profile updated.".to_string())));
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "profile save failed");
                        notice.set(Some(Err(err.to_string())));
                    }
                }
                saving.set(false);
            });
        })
    };

    let photo_block = {
        let shown = preview.as_deref().or(avatar.as_deref());
        match shown {
            Some(url) => html! { <img class="profile-photo" src={url.to_string()} alt="profile" /> },
            None => html! { <div class="profile-photo placeholder" /> },
        }
    };

    let body = if *loading {
        html! { <div class="state">{ "Loading profile..." }</div> }
    } else if let Some(message) = load_error.as_deref() {
        html! {
            <div class="state">
                { inline_error(message) }
                <button class="primary" onclick={onretry}>{ "Try again" }</button>
            </div>
        }
    } else {
        html! {
            <form class="profile-form" onsubmit={onsubmit}>
                if let Some(result) = notice.as_ref() {
                    {
                        match result {
                            Ok(message) => html! { <div class="banner success">{ message.clone() }</div> },
                            Err(message) => inline_error(message),
                        }
                    }
                }
                <div class="photo-row">
                    { photo_block }
                    <label class="ghost" for="profile-photo">{ "Change photo" }</label>
                    <input
                        id="profile-photo"
                        type="file"
                        accept="image/*"
                        onchange={onphoto}
                    />
                </div>
                <label for="first-name">{ "First name" }</label>
                <input id="first-name" value={draft.first_name.clone()} oninput={onfirst} />
                <label for="last-name">{ "Last name" }</label>
                <input id="last-name" value={draft.last_name.clone()} oninput={onlast} />
                <label for="email">{ "Email" }</label>
                <input id="email" type="email" value={draft.email.clone()} oninput={onemail} />
                <label for="address">{ "Address" }</label>
                <input id="address" value={draft.address.clone()} oninput={onaddress} />
                <label for="contact">{ "Contact number" }</label>
                <input id="contact" value={draft.contact_number.clone()} oninput={oncontact} />
                <label for="birthday">{ "Birthday" }</label>
                <input
                    id="birthday"
                    type="date"
                    value={draft.birthday.clone()}
                    oninput={onbirthday}
                />
                <label for="bio">{ "Bio" }</label>
                <textarea id="bio" value={draft.bio.clone()} oninput={onbio} />
                <button type="submit" class="primary" disabled={*saving}>
                    { if *saving { "Saving..." } else { "Save changes" } }
                </button>
            </form>
        }
    };

    html! {
        <DashboardLayout active="profile">
            <h1>{ "Profile" }</h1>
            { body }
        </DashboardLayout>
    }
}
