use dioxus::prelude::*;
#[cfg(any(test, not(target_arch = "wasm32")))]
use std::cell::RefCell;
#[cfg(any(test, not(target_arch = "wasm32")))]
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use crate::models::SignedInUser;

/// Key the identity token is persisted under
pub const TOKEN_KEY: &str = "token";

/// Global session state
pub static SESSION_STATE: GlobalSignal<SessionState> = Signal::global(SessionState::default);

#[derive(Clone, Default, Debug, PartialEq)]
pub struct SessionState {
    pub icon: Option<String>,
    pub token: Option<String>,
}

impl SessionState {
    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref().filter(|icon| !icon.is_empty())
    }
}

pub fn sign_in(user: SignedInUser) {
    let mut state = SESSION_STATE.write();
    state.icon = Some(user.icon);
    state.token = Some(user.token);
}

/// Pick the persisted token back up after a reload. The icon is not persisted.
pub fn restore_session(store: &dyn SessionStore) {
    if let Some(token) = store.get(TOKEN_KEY) {
        tracing::info!("Restored session token from client storage");
        SESSION_STATE.write().token = Some(token);
    }
}

/// Client-side persistent key-value storage
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// In-process store
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

/// JSON file of key-value pairs, for native builds
#[cfg(not(target_arch = "wasm32"))]
pub struct FileStore {
    path: PathBuf,
    values: RefCell<HashMap<String, String>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Load `path` if it exists; a missing or unreadable file starts empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!("Ignoring corrupt session file {:?}: {}", path, e);
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                tracing::warn!("Could not read session file {:?}: {}", path, e);
                HashMap::new()
            }
        };

        FileStore {
            path,
            values: RefCell::new(values),
        }
    }

    fn flush(&self) {
        let result = serde_json::to_string_pretty(&*self.values.borrow())
            .map_err(std::io::Error::from)
            .and_then(|text| std::fs::write(&self.path, text));
        if let Err(e) = result {
            tracing::warn!("Could not write session file {:?}: {}", self.path, e);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        self.flush();
    }
}

/// `window.localStorage`
#[cfg(target_arch = "wasm32")]
pub struct BrowserStore;

#[cfg(target_arch = "wasm32")]
impl BrowserStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(target_arch = "wasm32")]
impl SessionStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if let Err(e) = storage.set_item(key, value) {
                    tracing::warn!("localStorage write for {} failed: {:?}", key, e);
                }
            }
            None => tracing::warn!("localStorage unavailable, {} not persisted", key),
        }
    }
}
