//! HTTP response building module
//!
//! Provides builders for the status codes the API answers with, decoupled from specific handlers.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Methods every route accepts
pub const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

const JSON_CONTENT_TYPE: &str = "application/json";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Error body in the `{"detail": ...}` shape clients already parse
#[derive(Debug, Serialize)]
struct Detail<'a> {
    detail: &'a str,
}

/// Build compact JSON response, body dropped for HEAD requests
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_500_response();
        }
    };
    let content_length = json.len();
    let body = if is_head { Bytes::new() } else { Bytes::from(json) };

    Response::builder()
        .status(status)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build plain text 200 response
pub fn build_text_response(content: &'static str, is_head: bool) -> Response<Full<Bytes>> {
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from_static(content.as_bytes())
    };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", TEXT_CONTENT_TYPE)
        .header("Content-Length", content.len())
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::from_static(content.as_bytes())))
        })
}

/// Build 400 Bad Request response
pub fn build_400_response(detail: &str) -> Response<Full<Bytes>> {
    build_json_response(StatusCode::BAD_REQUEST, &Detail { detail }, false)
}

/// Build 404 Not Found response
pub fn build_404_response(is_head: bool) -> Response<Full<Bytes>> {
    build_json_response(
        StatusCode::NOT_FOUND,
        &Detail { detail: "Not found." },
        is_head,
    )
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(method: &str) -> Response<Full<Bytes>> {
    let detail = format!("Method \"{method}\" not allowed.");
    let mut response = build_json_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &Detail { detail: &detail },
        false,
    );
    response
        .headers_mut()
        .insert("allow", hyper::header::HeaderValue::from_static(ALLOWED_METHODS));
    response
}

/// Build OPTIONS response for a known route
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", ALLOWED_METHODS)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 301 redirect response
pub fn build_redirect_response(target: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header("Location", target)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_json_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        &Detail {
            detail: "Request body too large.",
        },
        false,
    )
}

/// Build 500 response without going through serde
fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .body(Full::new(Bytes::from_static(
            br#"{"detail":"Internal server error."}"#,
        )))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from_static(b"Error"))))
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_json_response_is_compact() {
        let response = build_json_response(StatusCode::OK, &Detail { detail: "x" }, false);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Type"], JSON_CONTENT_TYPE);
        assert_eq!(body_string(response).await, r#"{"detail":"x"}"#);
    }

    #[tokio::test]
    async fn test_head_keeps_length_drops_body() {
        let response = build_text_response("hello", true);
        assert_eq!(response.headers()["Content-Length"], "5");
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_405_lists_allowed_methods() {
        let response = build_405_response("POST");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["Allow"], ALLOWED_METHODS);
        assert_eq!(
            body_string(response).await,
            r#"{"detail":"Method \"POST\" not allowed."}"#
        );
    }

    #[test]
    fn test_redirect_location() {
        let response = build_redirect_response("/api/classify/ping/");
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()["Location"], "/api/classify/ping/");
    }
}
