//! Signup form submission

use std::rc::Rc;

use crate::models::{Locale, Message};
use crate::api::{ApiOperation, AuthError, IdentityProvider, ProfileApi};
use crate::models::{SignedInUser, UserInitialData};
use crate::state::{SessionStore, TOKEN_KEY};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl FormState {
    /// Profile payload for a newly created identity
    pub fn initial_data(&self, token: &str, icon: &str) -> UserInitialData {
        UserInitialData {
            token: token.to_string(),
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            icon: icon.to_string(),
        }
    }
}

/// What the user is told when account creation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupFailure {
    WeakPassword,
    EmailAlreadyRegistered,
}

impl SignupFailure {
    // Every code other than auth/weak-password lands on EmailAlreadyRegistered,
    // including network and rate-limit failures. Kept as the page has always shown it.
    pub fn from_auth_error(err: &AuthError) -> Self {
        if err.is_weak_password() {
            SignupFailure::WeakPassword
        } else {
            SignupFailure::EmailAlreadyRegistered
        }
    }

    pub fn message(&self, locale: Locale) -> &'static str {
        match self {
            SignupFailure::WeakPassword => locale.text(Message::WeakPassword),
            SignupFailure::EmailAlreadyRegistered => locale.text(Message::EmailAlreadyRegistered),
        }
    }
}

/// Side effects of a successful signup, supplied by the page
pub trait SubmitEffects {
    /// Start profile registration without waiting for it
    fn register_profile(&self, profile: UserInitialData);
    fn sign_in(&self, user: SignedInUser);
    fn go_home(&self);
}

/// Create the identity and, on success, register the profile, persist the
/// token, update the session and leave for the home page.
pub async fn handle_submit(
    identity: &dyn IdentityProvider,
    store: &dyn SessionStore,
    effects: &dyn SubmitEffects,
    form: &FormState,
    icon: &str,
) -> Result<(), SignupFailure> {
    let created = match identity.create_identity(&form.email, &form.password).await {
        Ok(created) => created,
        Err(e) => {
            tracing::warn!("Identity creation failed: {}", e);
            return Err(SignupFailure::from_auth_error(&e));
        }
    };

    effects.register_profile(form.initial_data(&created.token, icon));
    store.set(TOKEN_KEY, &created.token);
    effects.sign_in(SignedInUser {
        icon: icon.to_string(),
        token: created.token.clone(),
    });
    tracing::info!("Signed up user {} with icon {:?}", created.token, icon);
    effects.go_home();

    Ok(())
}

/// Send the `SIGNUP` call; the outcome is only logged.
pub async fn register_profile(api: Rc<dyn ProfileApi>, profile: UserInitialData) {
    match api.call(ApiOperation::Signup, &profile).await {
        Ok(_) => tracing::info!("signup success"),
        Err(e) => tracing::error!("signup error: {}", e),
    }
}
