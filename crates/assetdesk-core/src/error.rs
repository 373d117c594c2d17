// ── Core error types ──
//
// User-facing errors from assetdesk-core. Consumers never see raw HTTP
// plumbing: the `From<assetdesk_api::Error>` impl translates transport-layer
// failures into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Backend request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("{message}")]
    ValidationFailed { message: String },

    #[error("{entity_type} {identifier} still hosts {dependents} VM(s); migrate them first")]
    InUse {
        entity_type: String,
        identifier: String,
        dependents: usize,
    },

    #[error("Operation rejected by backend: {message}")]
    Rejected { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
        /// Server-side failure that may clear on retry.
        transient: bool,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout { .. } => true,
            Self::Api { transient, .. } => *transient,
            _ => false,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<assetdesk_api::Error> for CoreError {
    fn from(err: assetdesk_api::Error) -> Self {
        let transient = err.is_transient();
        match err {
            assetdesk_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                        transient,
                    }
                }
            }
            assetdesk_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            assetdesk_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            assetdesk_api::Error::Api { status: 404, message } => CoreError::NotFound {
                entity_type: "Record".into(),
                identifier: message,
            },
            assetdesk_api::Error::Api {
                status: 400 | 409 | 422,
                message,
            } => CoreError::Rejected { message },
            assetdesk_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
                transient,
            },
            assetdesk_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("unexpected response shape: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_maps_to_rejected() {
        let err: CoreError = assetdesk_api::Error::Api {
            status: 400,
            message: "Site does not belong to the specified customer".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Rejected { .. }));
        assert_eq!(
            err.to_string(),
            "Operation rejected by backend: Site does not belong to the specified customer"
        );
    }

    #[test]
    fn not_found_keeps_backend_message() {
        let err: CoreError = assetdesk_api::Error::Api {
            status: 404,
            message: "Customer not found".into(),
        }
        .into();
        assert!(
            matches!(err, CoreError::NotFound { ref identifier, .. } if identifier == "Customer not found")
        );
    }

    #[test]
    fn server_error_keeps_status() {
        let err: CoreError = assetdesk_api::Error::Api {
            status: 500,
            message: "boom".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
        assert!(err.is_transient());
    }

    #[test]
    fn only_backend_side_failures_are_transient() {
        let unavailable: CoreError = assetdesk_api::Error::Api {
            status: 503,
            message: "maintenance".into(),
        }
        .into();
        assert!(unavailable.is_transient());

        let teapot: CoreError = assetdesk_api::Error::Api {
            status: 418,
            message: "teapot".into(),
        }
        .into();
        assert!(!teapot.is_transient());

        let timeout: CoreError = assetdesk_api::Error::Timeout { timeout_secs: 30 }.into();
        assert!(timeout.is_transient());
        assert!(!CoreError::validation("Name is required").is_transient());
    }

    #[test]
    fn in_use_message_names_dependents() {
        let err = CoreError::InUse {
            entity_type: "Infrastructure".into(),
            identifier: "rack-a".into(),
            dependents: 2,
        };
        assert_eq!(
            err.to_string(),
            "Infrastructure rack-a still hosts 2 VM(s); migrate them first"
        );
    }
}
