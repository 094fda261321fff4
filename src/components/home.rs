use dioxus::prelude::*;

use crate::routes::Route;
use crate::state::SESSION_STATE;

#[component]
pub fn HomePage() -> Element {
    let session = SESSION_STATE.read().clone();

    rsx! {
        div { class: "min-h-screen flex items-center justify-center bg-gray-100",
            div { class: "bg-white rounded-lg shadow-lg p-8 w-full max-w-md text-center",
                h1 { class: "text-2xl font-bold mb-6", "WordChecker" }

                if session.is_signed_in() {
                    if let Some(icon) = session.icon() {
                        img { class: "avatar mx-auto mb-4", src: "{icon}", alt: "avatar" }
                    }
                    p { class: "text-gray-600", "Welcome back!" }
                } else {
                    Link { class: "text-blue-600", to: Route::Signup {}, "Create an account" }
                }
            }
        }
    }
}
