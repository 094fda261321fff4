use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::sync::RwLock;
use thiserror::Error;

use crate::models::UserInitialData;

#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Authentication required")]
    Unauthorized,
    #[error("Access denied")]
    Forbidden,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Invalid response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// Named backend operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOperation {
    Signup,
}

impl ApiOperation {
    pub fn name(&self) -> &'static str {
        match self {
            ApiOperation::Signup => "SIGNUP",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            ApiOperation::Signup => "/api/signup",
        }
    }
}

/// Profile registration backend
#[async_trait(?Send)]
pub trait ProfileApi {
    async fn call(
        &self,
        operation: ApiOperation,
        payload: &UserInitialData,
    ) -> Result<serde_json::Value, ApiError>;
}

#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    base_url: String,
    client: Client,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        ApiClient {
            inner: Arc::new(ApiClientInner {
                base_url: base_url.trim_end_matches('/').to_string(),
                client: Client::new(),
                token: RwLock::new(None),
            }),
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.inner.token.write() {
            *guard = token;
        }
    }

    pub fn get_token(&self) -> Option<String> {
        self.inner.token.read().ok().and_then(|guard| guard.clone())
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let mut request = self.inner.client.post(self.url(path)).json(body);

        if let Some(token) = self.get_token() {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();

        match status {
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => {
                response.json::<T>().await.map_err(|e| ApiError::Parse(e.to_string()))
            }
            StatusCode::NO_CONTENT => serde_json::from_str("null").map_err(|e| ApiError::Parse(e.to_string())),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
            StatusCode::NOT_FOUND => {
                let text = response.text().await.unwrap_or_default();
                Err(ApiError::NotFound(text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ApiError::Server(format!("{}: {}", status, text)))
            }
        }
    }
}

#[async_trait(?Send)]
impl ProfileApi for ApiClient {
    async fn call(
        &self,
        operation: ApiOperation,
        payload: &UserInitialData,
    ) -> Result<serde_json::Value, ApiError> {
        tracing::debug!("API {} -> {}", operation.name(), operation.path());
        self.post(operation.path(), payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:3000/");
        assert_eq!(client.url(ApiOperation::Signup.path()), "http://localhost:3000/api/signup");
    }

    #[test]
    fn test_token_shared_between_clones() {
        let client = ApiClient::new("http://localhost:3000");
        let clone = client.clone();
        assert_eq!(client.get_token(), None);

        clone.set_token(Some("uid-1".to_string()));
        assert_eq!(client.get_token().as_deref(), Some("uid-1"));

        client.set_token(None);
        assert_eq!(clone.get_token(), None);
    }

    #[test]
    fn test_operation_name() {
        assert_eq!(ApiOperation::Signup.name(), "SIGNUP");
    }
}
