// ── Runtime service configuration ──
//
// Describes where the backend lives and how long to wait for it.
// Never touches disk: assetdesk-config builds one of these and hands it in.

use std::time::Duration;

use url::Url;

/// Connection settings for the inventory backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Backend base URL, e.g. `http://localhost:8000`.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ServiceConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
