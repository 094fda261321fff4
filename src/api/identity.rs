//! Identity provider: account creation against the Firebase identity toolkit REST API

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::models::{
    AuthErrorCode, CreateIdentityRequest, CreateIdentityResponse, Identity, IdentityErrorBody,
};

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Identity provider error ({code}): {message}")]
pub struct AuthError {
    pub code: AuthErrorCode,
    pub message: String,
}

impl AuthError {
    pub fn new(code: AuthErrorCode, message: impl Into<String>) -> Self {
        AuthError {
            code,
            message: message.into(),
        }
    }

    pub fn is_weak_password(&self) -> bool {
        self.code == AuthErrorCode::WeakPassword
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::new(AuthErrorCode::NetworkRequestFailed, err.to_string())
    }
}

#[async_trait(?Send)]
pub trait IdentityProvider {
    async fn create_identity(&self, email: &str, password: &str) -> Result<Identity, AuthError>;
}

pub struct FirebaseAuth {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FirebaseAuth {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(IDENTITY_TOOLKIT_URL, api_key)
    }

    pub fn with_base_url(base_url: &str, api_key: &str) -> Self {
        FirebaseAuth {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn sign_up_url(&self) -> String {
        format!("{}/accounts:signUp", self.base_url)
    }
}

/// Turn a non-success response body into an `AuthError`.
fn parse_error_body(status: u16, body: &str) -> AuthError {
    match serde_json::from_str::<IdentityErrorBody>(body) {
        Ok(parsed) => AuthError::new(
            AuthErrorCode::from_rest_message(&parsed.error.message),
            parsed.error.message,
        ),
        Err(_) => AuthError::new(AuthErrorCode::Internal, format!("HTTP {}: {}", status, body)),
    }
}

#[async_trait(?Send)]
impl IdentityProvider for FirebaseAuth {
    async fn create_identity(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let request = CreateIdentityRequest {
            email: email.to_string(),
            password: password.to_string(),
            return_secure_token: true,
        };

        let response = self
            .client
            .post(self.sign_up_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_error_body(status.as_u16(), &body));
        }

        let created: CreateIdentityResponse = response
            .json()
            .await
            .map_err(|e| AuthError::new(AuthErrorCode::Internal, e.to_string()))?;

        Ok(Identity {
            token: created.local_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weak_password_body() {
        let body = r#"{"error":{"code":400,"message":"WEAK_PASSWORD : Password should be at least 6 characters","errors":[]}}"#;
        let err = parse_error_body(400, body);
        assert_eq!(err.code, AuthErrorCode::WeakPassword);
        assert!(err.is_weak_password());
    }

    #[test]
    fn test_parse_email_exists_body() {
        let body = r#"{"error":{"code":400,"message":"EMAIL_EXISTS"}}"#;
        let err = parse_error_body(400, body);
        assert_eq!(err.code, AuthErrorCode::EmailAlreadyInUse);
        assert!(!err.is_weak_password());
    }

    #[test]
    fn test_unparseable_body_is_internal() {
        let err = parse_error_body(502, "<html>Bad Gateway</html>");
        assert_eq!(err.code, AuthErrorCode::Internal);
        assert!(err.message.contains("502"));
    }

    #[test]
    fn test_sign_up_url() {
        let auth = FirebaseAuth::with_base_url("http://localhost:9099/identitytoolkit.googleapis.com/v1/", "k");
        assert_eq!(
            auth.sign_up_url(),
            "http://localhost:9099/identitytoolkit.googleapis.com/v1/accounts:signUp"
        );
    }
}
