//! HTTP middleware for admin: sessions and the sign-in guard.

pub mod auth;
pub mod session;

pub use auth::{RequireSignedIn, SignInRejection, clear_current_user, set_current_user};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
