//! External collaborators shared with components through context

use std::rc::Rc;

use crate::api::{ApiClient, FirebaseAuth, FirebaseStorage, IdentityProvider, ObjectStorage, ProfileApi};
use crate::config::AppConfig;
use dioxus::prelude::ReadableExt;

use crate::state::{self, SessionStore, SESSION_STATE};

#[derive(Clone)]
pub struct Services {
    pub config: Rc<AppConfig>,
    pub api: ApiClient,
    pub identity: Rc<dyn IdentityProvider>,
    pub storage: Rc<dyn ObjectStorage>,
    pub profiles: Rc<dyn ProfileApi>,
    pub session_store: Rc<dyn SessionStore>,
}

impl Services {
    pub fn new(config: AppConfig) -> Self {
        let api = ApiClient::new(&config.api_url);

        #[cfg(target_arch = "wasm32")]
        let session_store: Rc<dyn SessionStore> = Rc::new(state::BrowserStore);

        #[cfg(not(target_arch = "wasm32"))]
        let session_store: Rc<dyn SessionStore> = Rc::new(state::FileStore::open(&config.session_file));

        Services {
            identity: Rc::new(FirebaseAuth::new(&config.firebase_api_key)),
            storage: Rc::new(FirebaseStorage::new()),
            profiles: Rc::new(api.clone()),
            api,
            session_store,
            config: Rc::new(config),
        }
    }

    /// Load a previously persisted token into session state and the API client.
    pub fn restore_session(&self) {
        state::restore_session(self.session_store.as_ref());
        if let Some(token) = SESSION_STATE.read().token.clone() {
            self.api.set_token(Some(token));
        }
    }
}
