//! HTTP transport shared by the synthesis and voice catalog clients.

mod http;

pub use http::{error_for_status, HttpTransport, RawResponse, DEFAULT_TIMEOUT_SECS};
