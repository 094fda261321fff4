//! Application configuration
//!
//! Native builds read the environment (after loading `.env`); wasm builds
//! bake values in at compile time.

use anyhow::{bail, Context};
use std::sync::OnceLock;

use crate::models::Locale;

pub const DEFAULT_STORAGE_BUCKET: &str = "wordchecker-a26d8.appspot.com";
pub const DEFAULT_AVATAR_FOLDER: &str = "avatars";
pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_SESSION_FILE: &str = "wordchecker-session.json";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub firebase_api_key: String,
    pub storage_bucket: String,
    pub avatar_folder: String,
    pub api_url: String,
    pub locale: Locale,
    /// Where native builds persist the session token
    pub session_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            firebase_api_key: String::new(),
            storage_bucket: DEFAULT_STORAGE_BUCKET.to_string(),
            avatar_folder: DEFAULT_AVATAR_FOLDER.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            locale: Locale::Ja,
            session_file: DEFAULT_SESSION_FILE.to_string(),
        }
    }
}

impl AppConfig {
    /// Build a config from a variable lookup; unset or empty variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = AppConfig::default();

        if let Some(key) = get("FIREBASE_API_KEY") {
            config.firebase_api_key = key;
        }
        if let Some(bucket) = get("FIREBASE_STORAGE_BUCKET") {
            config.storage_bucket = bucket.trim_start_matches("gs://").trim_end_matches('/').to_string();
        }
        if let Some(folder) = get("AVATAR_FOLDER") {
            config.avatar_folder = folder.trim_matches('/').to_string();
        }
        if let Some(url) = get("API_URL") {
            config.api_url = url;
        }
        if let Some(path) = get("SESSION_FILE") {
            config.session_file = path;
        }
        if let Some(locale) = get("APP_LOCALE") {
            config.locale = locale
                .parse()
                .with_context(|| format!("APP_LOCALE has unsupported value {:?}", locale))?;
        }

        if config.storage_bucket.is_empty() {
            bail!("FIREBASE_STORAGE_BUCKET must name a bucket");
        }

        Ok(config)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::from_lookup(|name| {
            match name {
                "FIREBASE_API_KEY" => option_env!("FIREBASE_API_KEY"),
                "FIREBASE_STORAGE_BUCKET" => option_env!("FIREBASE_STORAGE_BUCKET"),
                "AVATAR_FOLDER" => option_env!("AVATAR_FOLDER"),
                "API_URL" => option_env!("API_URL"),
                "APP_LOCALE" => option_env!("APP_LOCALE"),
                _ => None,
            }
            .map(str::to_string)
        })?;

        // On web, default to the same origin as the page
        if option_env!("API_URL").is_none() {
            if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
                config.api_url = origin;
            }
        }

        Ok(config)
    }

    /// `gs://` URL of the folder avatars are picked from
    pub fn avatar_folder_url(&self) -> String {
        format!("gs://{}/{}", self.storage_bucket, self.avatar_folder)
    }
}

// Global configuration, set once at startup
static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

pub fn init_config(config: AppConfig) {
    let _ = APP_CONFIG.set(config);
}

pub fn app_config() -> &'static AppConfig {
    APP_CONFIG.get_or_init(AppConfig::default)
}
