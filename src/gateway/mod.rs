pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::user_auth::{handlers as users, jwt_auth_middleware};
use state::AppState;

/// Build the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    // ==========================================================================
    // Protected Routes - behind the session gate
    // ==========================================================================
    let user_routes = Router::new()
        .route("/users", get(users::list_users))
        .route(
            "/users/{username}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    // ==========================================================================
    // Public Routes (no auth required)
    // ==========================================================================
    let public_routes = Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/health", get(handlers::health_check));

    Router::new()
        .nest("/api", public_routes.merge(user_routes))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

/// Start HTTP server
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        anyhow::anyhow!(
            "failed to bind {}: {} (port {} may already be in use)",
            addr,
            e,
            port
        )
    })?;

    tracing::info!("Server running on http://{}", addr);
    tracing::info!("Swagger documentation available at http://{}/docs", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
