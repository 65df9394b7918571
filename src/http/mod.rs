//! HTTP protocol layer module
//!
//! Response builders and header policies (CORS, Host), decoupled from the route handlers.

pub mod cors;
pub mod host;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_400_response, build_404_response, build_405_response, build_413_response,
    build_json_response, build_options_response, build_redirect_response, build_text_response,
};
