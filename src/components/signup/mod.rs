//! Account signup page

pub mod avatar;
pub mod submit;

use dioxus::prelude::*;
use dioxus::core::spawn_forever;
use dioxus::router::Navigator;

use crate::components::common::{Copyright, Input, StatusMessage};
use crate::models::{SignedInUser, UserInitialData};
use crate::routes::Route;
use crate::services::Services;
use crate::state;
use crate::models::Message;
use submit::{FormState, SubmitEffects};

/// Page-side effects of a successful signup
struct PageEffects {
    services: Services,
    navigator: Navigator,
}

impl SubmitEffects for PageEffects {
    fn register_profile(&self, profile: UserInitialData) {
        // Not tied to this page's scope, which unmounts on navigation
        spawn_forever(submit::register_profile(self.services.profiles.clone(), profile));
    }

    fn sign_in(&self, user: SignedInUser) {
        self.services.api.set_token(Some(user.token.clone()));
        state::sign_in(user);
    }

    fn go_home(&self) {
        let _ = self.navigator.push(Route::Home {});
    }
}

#[component]
pub fn SignupPage() -> Element {
    let services = use_context::<Services>();
    let navigator = use_navigator();
    let locale = services.config.locale;

    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut image_path = use_signal(String::new);
    let mut image_url = use_signal(String::new);
    let mut message = use_signal(String::new);

    // Pick a random avatar once per mount
    {
        let services = services.clone();
        use_effect(move || {
            let services = services.clone();
            spawn(async move {
                let path = avatar::load_avatar_path(services.storage.as_ref(), &services.config).await;
                if !path.is_empty() {
                    image_path.set(path);
                }
            });
        });
    }

    // Resolve the picked path whenever it changes
    {
        let services = services.clone();
        use_effect(move || {
            let path = image_path();
            if path.is_empty() {
                return;
            }
            let services = services.clone();
            spawn(async move {
                let bucket = services.config.storage_bucket.clone();
                let url = avatar::load_avatar_url(services.storage.as_ref(), &bucket, &path).await;
                if !url.is_empty() {
                    image_url.set(url);
                }
            });
        });
    }

    let on_submit = move |e: FormEvent| {
        e.prevent_default();

        let form = FormState {
            username: username(),
            email: email(),
            password: password(),
        };
        let icon = image_url();
        let services = services.clone();

        spawn(async move {
            let effects = PageEffects {
                services: services.clone(),
                navigator,
            };
            let result = submit::handle_submit(
                services.identity.as_ref(),
                services.session_store.as_ref(),
                &effects,
                &form,
                &icon,
            )
            .await;

            if let Err(failure) = result {
                message.set(failure.message(locale).to_string());
            }
        });
    };

    let title = locale.text(Message::Title);
    let submit_label = locale.text(Message::Submit);
    let remember_label = locale.text(Message::RememberPassword);
    let have_account = locale.text(Message::HaveAccount);

    rsx! {
        div { class: "min-h-screen flex items-center justify-center bg-gray-100",
            div { class: "bg-white rounded-lg shadow-lg p-8 w-full max-w-md",
                div { class: "text-center mb-8",
                    div { class: "avatar-badge", "\u{1F512}" }
                    h1 { class: "text-2xl font-bold mt-4", "{title}" }
                }

                // Empty fields still go to the identity provider, which reports them
                form { novalidate: true, onsubmit: on_submit,
                    Input {
                        id: "username",
                        label: "Username",
                        autocomplete: "username",
                        autofocus: true,
                        oninput: move |e: FormEvent| username.set(e.value()),
                    }
                    Input {
                        id: "email",
                        label: "Email Address",
                        autocomplete: "email",
                        required: true,
                        oninput: move |e: FormEvent| email.set(e.value()),
                    }
                    Input {
                        id: "password",
                        label: "Password",
                        input_type: "password",
                        autocomplete: "current-password",
                        required: true,
                        oninput: move |e: FormEvent| password.set(e.value()),
                    }

                    StatusMessage { message: message() }

                    label { class: "flex items-center gap-2 text-sm text-gray-700 mb-4",
                        input { r#type: "checkbox", value: "remember" }
                        "{remember_label}"
                    }

                    button {
                        class: "w-full py-3 bg-black text-white rounded-lg font-medium",
                        r#type: "submit",
                        "{submit_label}"
                    }
                }

                div { class: "mt-6 text-sm",
                    a { class: "text-blue-600", href: "/signin", "{have_account}" }
                }

                Copyright {}
            }
        }
    }
}
