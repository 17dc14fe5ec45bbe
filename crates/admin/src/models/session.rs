//! Session-related types for shop-owner authentication.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Session-stored identity of the signed-in shop owner.
///
/// The backend token is opaque to the panel and is only ever kept server-side.
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Email used to sign in.
    pub email: String,
    /// Name from the backend user record, when it had one.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Credential returned by `POST /api/auth/signin`.
    #[serde(serialize_with = "expose_token", deserialize_with = "wrap_token")]
    pub token: SecretString,
    /// Key of this browser's dashboard state.
    pub viewer_id: u64,
}

impl CurrentUser {
    /// Name for the top bar: display name, falling back to the email.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

fn expose_token<S: Serializer>(token: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(token.expose_secret())
}

fn wrap_token<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the signed-in shop owner.
    pub const CURRENT_USER: &str = "current_user";
}
