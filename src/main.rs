//! WordChecker - account signup
//!
//! Dioxus front end that creates an account with the identity provider,
//! registers the profile with the WordChecker API and assigns a random
//! avatar from cloud storage.

mod api;
mod components;
mod config;
mod models;
mod routes;
mod services;
mod state;

use dioxus::prelude::*;
use config::AppConfig;
use routes::Route;
use services::Services;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wordchecker=info")))
            .init();
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration, using defaults: {:#}", e);
            AppConfig::default()
        }
    };

    if config.firebase_api_key.is_empty() {
        tracing::warn!("FIREBASE_API_KEY is not set; account creation will be rejected");
    }
    tracing::info!("Avatars are picked from {}", config.avatar_folder_url());

    config::init_config(config);

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let services = use_context_provider(|| Services::new(config::app_config().clone()));
    use_hook(|| services.restore_session());

    rsx! {
        style { {include_str!("../assets/styles.css")} }

        Router::<Route> {}
    }
}
