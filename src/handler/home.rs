//! Root route

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::http;

pub const HOME_TEXT: &str = "Animal Identifier API is running! ✅";

pub fn home(is_head: bool) -> Response<Full<Bytes>> {
    http::build_text_response(HOME_TEXT, is_head)
}
