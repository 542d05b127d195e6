use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::connector::Connector;

use super::{
    handlers::{health, privilege},
    middleware::{error, logging},
    state::AppState,
};

pub fn create_router<C: Connector>(state: AppState<C>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health::check))
        .route("/connection_check", post(privilege::connection_check::<C>))
        .route("/target_user_list", post(privilege::target_user_list::<C>))
        .route("/database_list", post(privilege::database_list::<C>))
        .route("/table_list", post(privilege::table_list::<C>))
        .route("/check_authority", post(privilege::check_authority::<C>))
        .route("/authority_list", post(privilege::authority_list::<C>))
        .route("/add_authority", post(privilege::add_authority::<C>))
        .route("/remove_authority", post(privilege::remove_authority::<C>))
        .layer(middleware::from_fn(logging::logging_middleware))
        .layer(middleware::from_fn(error::error_handling_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}
