//! Dashboard route handlers.
//!
//! Every mutation is a small form POST that redirects back to `/dashboard`,
//! so the page always renders from the controller's latest snapshot.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    response::Redirect,
    routing::{get, post},
};
use freshly_core::Tab;
use serde::Deserialize;
use tracing::instrument;

use crate::dashboard::{DashboardSnapshot, TabView};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireSignedIn;
use crate::state::AppState;

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(index))
        .route("/dashboard/tab", post(select_tab))
        .route("/dashboard/sidebar", post(toggle_sidebar))
        .route("/dashboard/refresh", post(refresh))
}

/// Sidebar entry.
#[derive(Debug, Clone)]
pub struct TabLink {
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/index.html")]
pub struct DashboardTemplate {
    pub shop_name: String,
    pub active_title: &'static str,
    pub tabs: Vec<TabLink>,
    pub sidebar_open: bool,
    pub loading: bool,
    pub user_name: Option<String>,
    /// Pre-rendered panel for the active tab.
    pub panel_html: String,
}

impl DashboardTemplate {
    /// Assemble the page around an already rendered panel.
    #[must_use]
    pub fn new(
        snapshot: &DashboardSnapshot,
        panel_html: String,
        user_name: Option<String>,
    ) -> Self {
        let active = snapshot.view.active_tab;
        Self {
            shop_name: snapshot.shop_name().to_string(),
            active_title: active.title(),
            tabs: Tab::ALL
                .iter()
                .map(|&tab| TabLink {
                    id: tab.id(),
                    title: tab.title(),
                    icon: tab.icon(),
                    active: tab == active,
                })
                .collect(),
            sidebar_open: snapshot.view.sidebar_open,
            loading: snapshot.view.loading,
            user_name,
            panel_html,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TabForm {
    #[serde(default)]
    tab: String,
}

/// Render the dashboard. The first visit starts the initial load.
///
/// GET /dashboard
#[instrument(skip(user, state))]
async fn index(
    RequireSignedIn(user): RequireSignedIn,
    State(state): State<AppState>,
) -> Result<DashboardTemplate, AppError> {
    let dashboard = state.dashboard(user.viewer_id).await;
    if dashboard.ensure_loaded().await {
        tracing::info!("Initial dashboard load started");
    }

    let snapshot = dashboard.snapshot().await;
    let panel_html = TabView::from_snapshot(&snapshot).render()?;

    Ok(DashboardTemplate::new(
        &snapshot,
        panel_html,
        Some(user.label().to_string()),
    ))
}

/// Switch tabs. Unknown tab ids are ignored.
///
/// POST /dashboard/tab
async fn select_tab(
    RequireSignedIn(user): RequireSignedIn,
    State(state): State<AppState>,
    Form(form): Form<TabForm>,
) -> Redirect {
    // Rejections are logged by the controller; the page just re-renders.
    let _ = state.dashboard(user.viewer_id).await.select_tab(&form.tab).await;
    Redirect::to("/dashboard")
}

/// Collapse or expand the sidebar.
///
/// POST /dashboard/sidebar
async fn toggle_sidebar(
    RequireSignedIn(user): RequireSignedIn,
    State(state): State<AppState>,
) -> Redirect {
    let open = state.dashboard(user.viewer_id).await.toggle_sidebar().await;
    tracing::debug!(open, "Sidebar toggled");
    Redirect::to("/dashboard")
}

/// Start a full reload in the background.
///
/// POST /dashboard/refresh
#[instrument(skip(user, state))]
async fn refresh(
    RequireSignedIn(user): RequireSignedIn,
    State(state): State<AppState>,
) -> Redirect {
    // Dropping the handle detaches the batch.
    let _batch = state.dashboard(user.viewer_id).await.spawn_refresh().await;
    tracing::info!("Dashboard refresh started");
    Redirect::to("/dashboard")
}
