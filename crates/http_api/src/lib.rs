mod assets;
mod errors;
mod handlers;
mod middleware;
mod state;

use axum::{Router, middleware as axum_middleware, routing::post};

pub use state::HttpState;

pub fn router(state: HttpState) -> Router<()> {
    let api = Router::new()
        .route("/user_funnel", post(handlers::user_funnel))
        .route("/funnel_counts", post(handlers::funnel_counts))
        .route("/spend_series", post(handlers::spend_series))
        .route("/ad_counts", post(handlers::ad_counts))
        .route("/markers", post(handlers::markers))
        .route("/reload", post(handlers::reload))
        .route("/workbook_info", post(handlers::workbook_info))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_csrf,
        ));

    Router::new()
        .nest("/api", api)
        .fallback(handlers::ui_fallback)
        .with_state(state)
}

#[cfg(test)]
mod tests;
