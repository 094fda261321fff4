use serde::{Deserialize, Serialize};
use std::fmt;

/// Request body for the identity toolkit `accounts:signUp` endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIdentityRequest {
    pub email: String,
    pub password: String,
    pub return_secure_token: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIdentityResponse {
    pub local_id: String,
}

/// Error envelope returned by the identity toolkit
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityErrorBody {
    pub error: IdentityErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityErrorDetail {
    #[serde(default)]
    pub message: String,
}

/// A freshly created account. `token` is the provider's unique user id.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub token: String,
}

/// Client-side error codes, in the `auth/...` form the page branches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthErrorCode {
    EmailAlreadyInUse,
    WeakPassword,
    InvalidEmail,
    MissingPassword,
    OperationNotAllowed,
    TooManyRequests,
    NetworkRequestFailed,
    Internal,
}

impl AuthErrorCode {
    /// Map the leading reason of an identity toolkit error message
    /// (e.g. `"WEAK_PASSWORD : Password should be at least 6 characters"`).
    pub fn from_rest_message(message: &str) -> Self {
        let reason = message
            .split(|c: char| c == ':' || c.is_whitespace())
            .next()
            .unwrap_or_default();

        match reason {
            "EMAIL_EXISTS" => AuthErrorCode::EmailAlreadyInUse,
            "WEAK_PASSWORD" => AuthErrorCode::WeakPassword,
            "INVALID_EMAIL" => AuthErrorCode::InvalidEmail,
            "MISSING_PASSWORD" => AuthErrorCode::MissingPassword,
            "OPERATION_NOT_ALLOWED" => AuthErrorCode::OperationNotAllowed,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthErrorCode::TooManyRequests,
            _ => AuthErrorCode::Internal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthErrorCode::EmailAlreadyInUse => "auth/email-already-in-use",
            AuthErrorCode::WeakPassword => "auth/weak-password",
            AuthErrorCode::InvalidEmail => "auth/invalid-email",
            AuthErrorCode::MissingPassword => "auth/missing-password",
            AuthErrorCode::OperationNotAllowed => "auth/operation-not-allowed",
            AuthErrorCode::TooManyRequests => "auth/too-many-requests",
            AuthErrorCode::NetworkRequestFailed => "auth/network-request-failed",
            AuthErrorCode::Internal => "auth/internal-error",
        }
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile record sent to the backend with the `SIGNUP` operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInitialData {
    pub token: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub icon: String,
}

/// What the shared session state learns about the user after signup
#[derive(Debug, Clone, PartialEq)]
pub struct SignedInUser {
    pub icon: String,
    pub token: String,
}
