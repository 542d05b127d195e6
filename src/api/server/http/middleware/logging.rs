use axum::{extract::Request, middleware::Next, response::Response};
use log::info;
use std::time::Instant;

pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        "{} {} -> {} ({} ms)",
        method,
        uri,
        response.status(),
        started.elapsed().as_millis()
    );

    response
}
