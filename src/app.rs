use crate::handlers;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};

/// Largest accepted form body; a shortlist carries several PDFs.
pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/user", get(handlers::user_page).post(handlers::user_submit))
        .route("/admin", get(handlers::admin_page).post(handlers::admin_login))
        .route("/logout", post(handlers::logout))
        .route("/dashboard", get(handlers::dashboard_page))
        .route("/dashboard/export", get(handlers::dashboard_export))
        .route(
            "/dashboard/candidates/:id/delete",
            post(handlers::dashboard_delete),
        )
        .route("/generator", get(handlers::generator_page))
        .route("/generator/parse", post(handlers::generator_parse))
        .route("/generator/analyze", post(handlers::generator_analyze))
        .route("/generator/download", post(handlers::generator_download))
        .route("/generator/optimize/:field", post(handlers::generator_optimize))
        .route("/shortlist", get(handlers::shortlist_page).post(handlers::shortlist_submit))
        .route("/shortlist/select", post(handlers::shortlist_select))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
