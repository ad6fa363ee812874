//! Canonical failure codes for synthesis calls.
//!
//! Every [`crate::Error`] maps onto exactly one [`ErrorCode`]. The code is what a
//! host shows to the operator, so the four failure families a synthesis call can
//! hit (configuration, authentication, availability, throttling) each get their
//! own code and message.
//!
//! ## Error Code Categories
//!
//! | Prefix | Category    | Description                              |
//! |--------|-------------|------------------------------------------|
//! | E1xxx  | config      | Rejected locally, before any network call |
//! | E2xxx  | client      | Rejected by the vendor                   |
//! | E3xxx  | rate        | Throttled by the vendor                  |
//! | E4xxx  | network     | Vendor unreachable or failing            |
//! | E9xxx  | unknown     | Catch-all / unclassified                 |
//!
//! ## Example
//!
//! ```rust
//! use inworld_tts::error_code::ErrorCode;
//!
//! let code = ErrorCode::from_http_status(429);
//! assert_eq!(code.code(), "E3001");
//! assert_eq!(code.category(), "rate");
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E1001: Out-of-range or unknown option, missing credential
    InvalidConfig,
    /// E1002: Empty message or other unusable input
    InvalidInput,
    /// E2001: Vendor rejected the request as malformed
    InvalidRequest,
    /// E2002: Invalid or missing API key
    Authentication,
    /// E2003: Key is valid but not allowed to use the resource
    PermissionDenied,
    /// E2004: Voice, model or endpoint does not exist
    NotFound,
    /// E3001: Vendor throttling
    RateLimited,
    /// E4001: Host unreachable, connection reset, DNS failure
    Unavailable,
    /// E4002: Request timed out
    Timeout,
    /// E4003: Vendor-side failure or unusable response
    ServerError,
    /// E9999: Could not be classified
    Unknown,
}

impl ErrorCode {
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig => "E1001",
            Self::InvalidInput => "E1002",
            Self::InvalidRequest => "E2001",
            Self::Authentication => "E2002",
            Self::PermissionDenied => "E2003",
            Self::NotFound => "E2004",
            Self::RateLimited => "E3001",
            Self::Unavailable => "E4001",
            Self::Timeout => "E4002",
            Self::ServerError => "E4003",
            Self::Unknown => "E9999",
        }
    }

    /// Returns the standard name (e.g., `"invalid_config"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidConfig => "invalid_config",
            Self::InvalidInput => "invalid_input",
            Self::InvalidRequest => "invalid_request",
            Self::Authentication => "authentication",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::Unavailable => "unavailable",
            Self::Timeout => "timeout",
            Self::ServerError => "server_error",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the category: `"config"`, `"client"`, `"rate"`, `"network"`, or `"unknown"`.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidConfig | Self::InvalidInput => "config",
            Self::InvalidRequest
            | Self::Authentication
            | Self::PermissionDenied
            | Self::NotFound => "client",
            Self::RateLimited => "rate",
            Self::Unavailable | Self::Timeout | Self::ServerError => "network",
            Self::Unknown => "unknown",
        }
    }

    /// Short operator-facing message.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidConfig => "Invalid Inworld TTS configuration",
            Self::InvalidInput => "Nothing to synthesize",
            Self::InvalidRequest => "Inworld API rejected the request",
            Self::Authentication => "Invalid API key",
            Self::PermissionDenied => "API key is not allowed to use this resource",
            Self::NotFound => "Voice or model not found",
            Self::RateLimited => "Rate limit exceeded",
            Self::Unavailable => "Unable to connect to Inworld API",
            Self::Timeout => "Inworld API request timed out",
            Self::ServerError => "Inworld API failed to produce audio",
            Self::Unknown => "Unexpected error processing TTS request",
        }
    }

    /// Maps a class name string back to its code. Unknown names map to `Unknown`.
    pub fn from_error_class(error_class: &str) -> Self {
        match error_class {
            "invalid_config" => Self::InvalidConfig,
            "invalid_input" => Self::InvalidInput,
            "invalid_request" => Self::InvalidRequest,
            "authentication" => Self::Authentication,
            "permission_denied" => Self::PermissionDenied,
            "not_found" => Self::NotFound,
            "rate_limited" => Self::RateLimited,
            "unavailable" => Self::Unavailable,
            "timeout" => Self::Timeout,
            "server_error" | "invalid_response" => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// Maps an HTTP status code to the most likely code.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 | 413 | 422 => Self::InvalidRequest,
            401 => Self::Authentication,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            408 | 504 => Self::Timeout,
            429 => Self::RateLimited,
            502 | 503 => Self::Unavailable,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
