//! Cross-origin resource sharing
//!
//! Echoes the request `Origin` back when it is on the configured allow list.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderValue;
use hyper::{Method, Request, Response, StatusCode};

use super::response::ALLOWED_METHODS;

const PREFLIGHT_MAX_AGE: &str = "86400";
/// Same default list the previous backend's CORS middleware sent
const ALLOWED_HEADERS: &str =
    "accept, authorization, content-type, user-agent, x-csrftoken, x-requested-with";

/// Return the origin if it may read responses from this API
pub fn allowed_origin<'a>(origin: Option<&'a str>, allowed: &[String]) -> Option<&'a str> {
    let origin = origin?;
    allowed.iter().any(|o| o == origin).then_some(origin)
}

/// An `OPTIONS` request that announces the method it wants to use
pub fn is_preflight<B>(req: &Request<B>) -> bool {
    req.method() == Method::OPTIONS
        && req.headers().contains_key("access-control-request-method")
}

/// Empty 200 answer for a preflight, headers are added by the caller
pub fn build_preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            crate::logger::log_error(&format!("Failed to build preflight response: {e}"));
            Response::new(Full::new(Bytes::new()))
        })
}

/// Add `Access-Control-Allow-Origin` and `Vary` to a response
pub fn apply_cors_headers(response: &mut Response<Full<Bytes>>, origin: &str) {
    let Ok(value) = HeaderValue::from_str(origin) else {
        return;
    };
    let headers = response.headers_mut();
    headers.insert("access-control-allow-origin", value);
    headers.append("vary", HeaderValue::from_static("Origin"));
}

/// Add the extra headers a preflight answer carries
pub fn apply_preflight_headers(response: &mut Response<Full<Bytes>>, origin: &str) {
    apply_cors_headers(response, origin);
    let headers = response.headers_mut();
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(
        "access-control-max-age",
        HeaderValue::from_static(PREFLIGHT_MAX_AGE),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::build_options_response;

    fn origins() -> Vec<String> {
        vec!["http://localhost:3000".to_string()]
    }

    #[test]
    fn test_allowed_origin() {
        assert_eq!(
            allowed_origin(Some("http://localhost:3000"), &origins()),
            Some("http://localhost:3000")
        );
        assert_eq!(allowed_origin(Some("http://evil.test"), &origins()), None);
        assert_eq!(allowed_origin(None, &origins()), None);
        // Scheme and port are part of the origin
        assert_eq!(allowed_origin(Some("https://localhost:3000"), &origins()), None);
    }

    #[test]
    fn test_preflight_headers() {
        let mut response = build_options_response();
        apply_preflight_headers(&mut response, "http://localhost:3000");
        let headers = response.headers();
        assert_eq!(
            headers["Access-Control-Allow-Origin"],
            "http://localhost:3000"
        );
        assert_eq!(headers["Access-Control-Allow-Methods"], ALLOWED_METHODS);
        assert_eq!(headers["Vary"], "Origin");
        assert_eq!(
            headers["Access-Control-Allow-Headers"],
            "accept, authorization, content-type, user-agent, x-csrftoken, x-requested-with"
        );
    }

    #[test]
    fn test_is_preflight() {
        let plain = Request::builder()
            .method(Method::OPTIONS)
            .uri("/")
            .body(())
            .unwrap();
        assert!(!is_preflight(&plain));

        let preflight = Request::builder()
            .method(Method::OPTIONS)
            .uri("/")
            .header("Access-Control-Request-Method", "GET")
            .body(())
            .unwrap();
        assert!(is_preflight(&preflight));

        let get = Request::builder()
            .uri("/")
            .header("Access-Control-Request-Method", "GET")
            .body(())
            .unwrap();
        assert!(!is_preflight(&get));
    }
}
