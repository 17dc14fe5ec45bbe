//! Sign-in, sign-up, and logout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;
use crate::store_api::{AuthFailure, SignInRequest, SignUpRequest};

/// Shown when a required field is blank.
pub const MISSING_FIELDS: &str = "Please fill in all fields";

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(signin_page))
        .route("/signin", get(signin_page).post(signin))
        .route("/signup", get(signup_page).post(signup))
        .route("/logout", post(logout))
        // Old bookmark path from the first release
        .route("/dashborad", get(|| async { Redirect::permanent("/dashboard") }))
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "auth/signin.html")]
struct SignInTemplate {
    email: String,
    error: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
struct SignUpTemplate {
    form: SignUpForm,
    error: Option<String>,
    created: bool,
}

// =============================================================================
// Request Types
// =============================================================================

/// Sign-in form fields.
#[derive(Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: SecretString,
}

/// Sign-up form fields.
#[derive(Default, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    shop_name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    telephone: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: SecretString,
}

impl SignUpForm {
    fn to_request(&self) -> SignUpRequest {
        SignUpRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            shop_name: self.shop_name.trim().to_string(),
            address: self.address.trim().to_string(),
            telephone: self.telephone.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }

    /// Keep what was typed, minus the password, for re-rendering.
    fn without_password(self) -> Self {
        Self {
            password: SecretString::default(),
            ..self
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the sign-in form, or skip it when already signed in.
///
/// GET / and GET /signin
async fn signin_page(session: Session) -> Response {
    let signed_in = session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
        .is_some();

    if signed_in {
        return Redirect::to("/dashboard").into_response();
    }

    SignInTemplate {
        email: String::new(),
        error: None,
    }
    .into_response()
}

/// Exchange credentials with the backend and start a session.
///
/// POST /signin
#[instrument(skip(state, session, form), fields(email = %form.email))]
async fn signin(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignInForm>,
) -> Result<Response, AppError> {
    let request = SignInRequest {
        email: form.email.trim().to_string(),
        password: form.password,
    };

    if !request.is_complete() {
        let page = SignInTemplate {
            email: request.email,
            error: Some(MISSING_FIELDS.to_string()),
        };
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    }

    let response = match state.store_api().sign_in(&request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, "Sign in rejected");
            let page = SignInTemplate {
                email: request.email,
                error: Some(AuthFailure::sign_in(&e).message),
            };
            return Ok((StatusCode::UNAUTHORIZED, page).into_response());
        }
    };

    let user = CurrentUser {
        display_name: response.user_display_name(),
        email: request.email,
        token: SecretString::from(response.token),
        viewer_id: state.new_viewer_id(),
    };
    set_current_user(&session, &user).await?;
    set_sentry_user(&user.email);

    tracing::info!(email = %user.email, "Shop owner signed in");
    Ok(Redirect::to("/dashboard").into_response())
}

/// Render the sign-up form.
///
/// GET /signup
async fn signup_page() -> impl IntoResponse {
    SignUpTemplate {
        form: SignUpForm::default(),
        error: None,
        created: false,
    }
}

/// Register a shop owner account with the backend.
///
/// POST /signup
#[instrument(skip(state, form), fields(email = %form.email, shop = %form.shop_name))]
async fn signup(State(state): State<AppState>, Form(form): Form<SignUpForm>) -> Response {
    let request = form.to_request();

    if !request.is_complete() {
        let page = SignUpTemplate {
            form: form.without_password(),
            error: Some(MISSING_FIELDS.to_string()),
            created: false,
        };
        return (StatusCode::BAD_REQUEST, page).into_response();
    }

    match state.store_api().sign_up(&request).await {
        Ok(()) => {
            tracing::info!("Shop owner registered");
            SignUpTemplate {
                form: SignUpForm::default(),
                error: None,
                created: true,
            }
            .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Sign up rejected");
            let page = SignUpTemplate {
                form: form.without_password(),
                error: Some(AuthFailure::sign_up(&e).message),
                created: false,
            };
            (StatusCode::UNPROCESSABLE_ENTITY, page).into_response()
        }
    }
}

/// Logout, drop the viewer's dashboard, and clear the session.
///
/// POST /logout
async fn logout(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    if let Ok(Some(user)) = session.get::<CurrentUser>(session_keys::CURRENT_USER).await {
        state.forget_dashboard(user.viewer_id).await;
    }
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }
    clear_sentry_user();

    Redirect::to("/signin")
}
