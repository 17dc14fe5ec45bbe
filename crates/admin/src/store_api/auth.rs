//! Sign-in and sign-up calls against the store backend.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use tracing::instrument;

use super::{StoreApiClient, TransportError};

/// Shown when sign-in fails without a backend message.
pub const SIGN_IN_FALLBACK: &str = "Sign in failed. Try again.";

/// Shown when sign-up fails without a backend message.
pub const SIGN_UP_FALLBACK: &str = "Signup failed. Try again.";

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorPayload {
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /api/auth/signin` body.
#[derive(Debug, Clone, Serialize)]
pub struct SignInRequest {
    pub email: String,
    #[serde(serialize_with = "expose_password")]
    pub password: SecretString,
}

impl SignInRequest {
    /// Whether every field has a non-blank value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.expose_secret().is_empty()
    }
}

/// `POST /api/auth/signin` success body.
#[derive(Deserialize)]
pub struct SignInResponse {
    /// Opaque credential; stored as-is in the session.
    pub token: String,
    /// Backend user record, kept opaque.
    #[serde(default)]
    pub user: serde_json::Value,
}

impl std::fmt::Debug for SignInResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInResponse")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

impl SignInResponse {
    /// Best-effort display name from the opaque user record.
    #[must_use]
    pub fn user_display_name(&self) -> Option<String> {
        let user = self.user.as_object()?;
        if let Some(name) = user.get("name").and_then(serde_json::Value::as_str) {
            return Some(name.to_string()).filter(|n| !n.trim().is_empty());
        }
        let first = user
            .get("firstName")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("");
        let last = user
            .get("lastName")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("");
        let name = format!("{first} {last}").trim().to_string();
        (!name.is_empty()).then_some(name)
    }
}

/// `POST /api/auth/signup` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub shop_name: String,
    pub address: String,
    pub telephone: String,
    pub email: String,
    #[serde(serialize_with = "expose_password")]
    pub password: SecretString,
}

impl SignUpRequest {
    /// Whether every field has a non-blank value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.shop_name,
            &self.address,
            &self.telephone,
            &self.email,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
            && !self.password.expose_secret().is_empty()
    }
}

/// The backend needs the plain password; it is only exposed here.
fn expose_password<S>(password: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(password.expose_secret())
}

/// Human-readable authentication failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFailure {
    pub message: String,
}

impl AuthFailure {
    /// Message for a failed sign-in.
    #[must_use]
    pub fn sign_in(err: &TransportError) -> Self {
        Self::from_transport(err, SIGN_IN_FALLBACK)
    }

    /// Message for a failed sign-up.
    #[must_use]
    pub fn sign_up(err: &TransportError) -> Self {
        Self::from_transport(err, SIGN_UP_FALLBACK)
    }

    fn from_transport(err: &TransportError, fallback: &str) -> Self {
        Self {
            message: err.backend_message().unwrap_or(fallback).to_string(),
        }
    }
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl StoreApiClient {
    /// Exchange credentials for an opaque token.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Status` with the backend message on rejected
    /// credentials, or another `TransportError` on network/parse failures.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<SignInResponse, TransportError> {
        self.post_json("api/auth/signin", request).await
    }

    /// Register a new shop owner account. Any 2xx answer counts as success.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Status` with the backend message when the
    /// backend rejects the registration.
    #[instrument(skip(self, request), fields(email = %request.email, shop = %request.shop_name))]
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<(), TransportError> {
        self.post_accepted("api/auth/signup", request).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sign_up_request() -> SignUpRequest {
        SignUpRequest {
            first_name: "Amaya".to_string(),
            last_name: "Fernando".to_string(),
            shop_name: "Fresh Mart".to_string(),
            address: "12 Market Street".to_string(),
            telephone: "0771234567".to_string(),
            email: "amaya@example.com".to_string(),
            password: SecretString::from("hunter22"),
        }
    }

    #[test]
    fn test_sign_in_presence_check() {
        let request = SignInRequest {
            email: "owner@example.com".to_string(),
            password: SecretString::default(),
        };
        assert!(!request.is_complete());

        let request = SignInRequest {
            email: "  ".to_string(),
            password: SecretString::from("pw"),
        };
        assert!(!request.is_complete());
    }

    #[test]
    fn test_sign_up_presence_check() {
        assert!(sign_up_request().is_complete());

        let mut request = sign_up_request();
        request.address = String::new();
        assert!(!request.is_complete());
    }

    #[test]
    fn test_sign_up_serializes_camel_case() {
        let json = serde_json::to_value(sign_up_request()).unwrap();
        assert_eq!(json["firstName"], "Amaya");
        assert_eq!(json["shopName"], "Fresh Mart");
        assert_eq!(json["password"], "hunter22");
        assert!(json.get("first_name").is_none());
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let debug = format!("{:?}", sign_up_request());
        assert!(!debug.contains("hunter22"));
        assert!(debug.contains("[REDACTED]"));

        let request = SignInRequest {
            email: "a@b.c".to_string(),
            password: SecretString::from("topsecret"),
        };
        assert!(!format!("{request:?}").contains("topsecret"));
    }

    #[test]
    fn test_auth_failure_uses_backend_message() {
        let err = TransportError::Status {
            status: 401,
            message: Some("Invalid email or password".to_string()),
        };
        assert_eq!(AuthFailure::sign_in(&err).message, "Invalid email or password");
    }

    #[test]
    fn test_auth_failure_falls_back() {
        let err = TransportError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(AuthFailure::sign_in(&err).message, SIGN_IN_FALLBACK);
        assert_eq!(AuthFailure::sign_up(&err).message, SIGN_UP_FALLBACK);
    }

    #[test]
    fn test_user_display_name() {
        let response: SignInResponse = serde_json::from_str(
            r#"{"token": "t", "user": {"firstName": "Amaya", "lastName": "Fernando"}}"#,
        )
        .unwrap();
        assert_eq!(response.user_display_name().as_deref(), Some("Amaya Fernando"));

        let response: SignInResponse = serde_json::from_str(r#"{"token": "t"}"#).unwrap();
        assert_eq!(response.user_display_name(), None);
    }
}
