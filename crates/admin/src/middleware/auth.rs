//! Authentication extractor for the dashboard routes.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// Extractor that requires a signed-in shop owner.
///
/// Without a session credential the request is redirected to `/signin`.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireSignedIn(user): RequireSignedIn) -> impl IntoResponse {
///     format!("Hello, {}!", user.label())
/// }
/// ```
pub struct RequireSignedIn(pub CurrentUser);

/// Rejection for [`RequireSignedIn`].
#[derive(Debug)]
pub enum SignInRejection {
    /// No session credential; send the browser to the sign-in form.
    RedirectToSignIn,
    /// Session layer missing from the router.
    MissingSession,
}

impl IntoResponse for SignInRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToSignIn => Redirect::to("/signin").into_response(),
            Self::MissingSession => {
                tracing::error!("Session layer not installed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl<S> FromRequestParts<S> for RequireSignedIn
where
    S: Send + Sync,
{
    type Rejection = SignInRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(SignInRejection::MissingSession)?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or(SignInRejection::RedirectToSignIn)?;

        Ok(Self(user))
    }
}

/// Store the signed-in shop owner in the session.
///
/// The session ID is cycled first so a pre-login cookie cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Remove the shop owner from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
