use dioxus::prelude::*;

use crate::components::{HomePage, SignupPage};

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    Home {},

    #[route("/signup")]
    Signup {},
}

#[component]
fn Home() -> Element {
    rsx! { HomePage {} }
}

#[component]
fn Signup() -> Element {
    rsx! { SignupPage {} }
}
