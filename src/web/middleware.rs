use axum::{
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn};

/// Logs method, path, status and latency of every request.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    info!(method = %method, uri = %uri, user_agent = %user_agent, "Request started");

    let response = next.run(request).await;
    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status();

    if status.is_server_error() {
        error!(method = %method, uri = %uri, status = %status, duration_ms, "Request completed");
    } else if status.is_client_error() {
        warn!(method = %method, uri = %uri, status = %status, duration_ms, "Request completed");
    } else {
        info!(method = %method, uri = %uri, status = %status, duration_ms, "Request completed");
    }

    response
}

/// Security headers middleware. Images come from the signing host, so
/// `img-src` allows any https origin.
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'self'; img-src 'self' https: data:; style-src 'self' 'unsafe-inline'"),
    );

    response
}
