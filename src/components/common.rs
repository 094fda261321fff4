use chrono::Datelike;
use dioxus::prelude::*;

/// Inline failure text; renders nothing for an empty message
#[component]
pub fn StatusMessage(message: String) -> Element {
    if message.is_empty() {
        return rsx! {};
    }

    rsx! {
        p { class: "text-sm text-darkred mt-1", "{message}" }
    }
}

#[component]
pub fn Input(
    id: String,
    label: String,
    oninput: EventHandler<FormEvent>,
    #[props(default = "text".to_string())]
    input_type: String,
    #[props(default = "".to_string())]
    autocomplete: String,
    #[props(default = false)]
    required: bool,
    #[props(default = false)]
    autofocus: bool,
) -> Element {
    rsx! {
        div { class: "mb-4",
            label { class: "block text-sm font-medium text-gray-700 mb-1", r#for: "{id}",
                "{label}"
                if required {
                    span { class: "text-red-500", " *" }
                }
            }
            input {
                class: "w-full px-3 py-2 border border-gray-300 rounded-md",
                id: "{id}",
                name: "{id}",
                r#type: "{input_type}",
                autocomplete: "{autocomplete}",
                required: required,
                autofocus: autofocus,
                oninput: move |e| oninput.call(e),
            }
        }
    }
}

#[component]
pub fn Copyright() -> Element {
    let year = chrono::Local::now().year();

    rsx! {
        p { class: "text-sm text-gray-500 text-center mt-8", "Copyright © {year}." }
    }
}
