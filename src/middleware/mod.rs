//! HTTP middleware.

mod error_pages;
mod headers;
mod request_logger;

pub use error_pages::error_pages;
pub use headers::{CONTENT_SECURITY_POLICY, cors, security_headers};
pub use request_logger::RequestLogger;
