//! Middleware for logging requests and responses.

use axum::{extract::Request, middleware::Next, response::Response};

/// Responses with a body longer than this many bytes are truncated in the
/// info-level logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the response body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
///
/// All routes are `GET`s, so only the request line is logged, not the body.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    tracing::info!("Received request: {} {}", request.method(), request.uri());

    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not read response body for logging: {error}");
            return Response::from_parts(parts, axum::body::Body::empty());
        }
    };

    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, body_bytes.into())
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {}\nbody: {}...",
            parts.status,
            truncate(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {}\nbody: {body:?}", parts.status);
    }
}

/// The longest prefix of `text` that is at most `max_len` bytes and does not
/// split a character.
fn truncate(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }

    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

#[cfg(test)]
mod tests {
    use axum::{Router, middleware, routing::get};
    use axum_test::TestServer;

    use super::{logging_middleware, truncate};

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("hello", 64), "hello");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        // 'é' is two bytes, so cutting at 2 bytes would split it.
        assert_eq!(truncate("aéb", 2), "a");
        assert_eq!(truncate("aéb", 3), "aé");
    }

    #[tokio::test]
    async fn passes_response_through_unchanged() {
        let long_body = "x".repeat(200);
        let body = long_body.clone();
        let app = Router::new()
            .route("/", get(move || async move { body }))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::new(app).expect("Could not create test server.");

        let response = server.get("/").await;

        response.assert_status_ok();
        assert_eq!(response.text(), long_body);
    }
}
