use crate::error_code::ErrorCode;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Option or field that caused the error (e.g., "temperature", "audio_encoding")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., accepted range, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "request_transform", "voice_catalog")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the provider.
///
/// Each variant is scoped to the single call that produced it; none of them is
/// retried by the library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Authentication failed: {message}")]
    Authentication { status: u16, message: String },

    #[error("Rate limit exceeded: {message}")]
    RateLimited {
        message: String,
        retry_after_secs: Option<u64>,
    },

    #[error("Network error: {message}{}", format_context(.context))]
    Network {
        message: String,
        timeout: bool,
        context: ErrorContext,
    },

    #[error("Remote error: HTTP {status} ({class}): {message}")]
    Remote {
        status: u16,
        class: String,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    pub fn network_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Network {
            message: msg.into(),
            timeout: false,
            context,
        }
    }

    /// Map a `reqwest` failure that happened before a status was received.
    pub fn from_transport(err: &reqwest::Error, source: &str) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else if err.is_connect() {
            format!("cannot connect: {}", err)
        } else {
            err.to_string()
        };
        Error::Network {
            message,
            timeout: err.is_timeout(),
            context: ErrorContext::new().with_source(source),
        }
    }

    /// Map a non-success HTTP status and its body message to a typed error.
    pub fn from_status(status: u16, message: impl Into<String>, retry_after_secs: Option<u64>) -> Self {
        let message = message.into();
        match ErrorCode::from_http_status(status) {
            ErrorCode::Authentication | ErrorCode::PermissionDenied => {
                Error::Authentication { status, message }
            }
            ErrorCode::RateLimited => Error::RateLimited {
                message,
                retry_after_secs,
            },
            code => Error::Remote {
                status,
                class: code.name().to_string(),
                message,
            },
        }
    }

    /// Canonical code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Configuration { .. } | Error::Yaml(_) => ErrorCode::InvalidConfig,
            Error::Validation { .. } => ErrorCode::InvalidInput,
            Error::Authentication { status: 403, .. } => ErrorCode::PermissionDenied,
            Error::Authentication { .. } => ErrorCode::Authentication,
            Error::RateLimited { .. } => ErrorCode::RateLimited,
            Error::Network { timeout: true, .. } => ErrorCode::Timeout,
            Error::Network { .. } => ErrorCode::Unavailable,
            Error::Remote { class, .. } => ErrorCode::from_error_class(class),
            Error::Io(_) | Error::Serialization(_) => ErrorCode::Unknown,
        }
    }

    /// Operator-facing message: the code's message plus the detail, if any.
    pub fn user_message(&self) -> String {
        let code = self.code();
        match self {
            Error::Configuration { message, .. }
            | Error::Validation { message, .. }
            | Error::Remote { message, .. }
                if !message.is_empty() =>
            {
                format!("{} [{}]: {}", code.user_message(), code, message)
            }
            _ => format!("{} [{}]", code.user_message(), code),
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Error::Authentication { .. })
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. }
            | Error::Validation { context, .. }
            | Error::Network { context, .. } => Some(context),
            _ => None,
        }
    }
}
