//! Request handler module
//!
//! Route dispatch plus the endpoint handlers: the root liveness text and one
//! ping endpoint per app.

pub mod home;
pub mod ping;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
