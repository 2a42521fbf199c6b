use std::time::Duration;

use gradia_smoke_client::{CANDIDATES_PATH, DEFAULT_SERVER_URL, HEALTH_PATH};
use gradia_smoke_types::{Credentials, ProfilePayload, WRONG_PASSWORD};

const PROBE_TIMEOUT_SECS: u64 = 2;

/// Everything a run needs to know about its target.
///
/// `Default` is the fixed local scenario; the binary never overrides it.
#[derive(Debug, Clone)]
pub struct SmokeConfig {
    pub server_url: String,
    pub probe_timeout: Duration,
    pub credentials: Credentials,
    pub wrong_password: String,
    pub profile: ProfilePayload,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            probe_timeout: Duration::from_secs(PROBE_TIMEOUT_SECS),
            credentials: Credentials::default(),
            wrong_password: WRONG_PASSWORD.to_string(),
            profile: ProfilePayload::default(),
        }
    }
}

impl SmokeConfig {
    #[must_use]
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}{CANDIDATES_PATH}", self.server_url)
    }

    #[must_use]
    pub fn health_url(&self) -> String {
        format!("{}{HEALTH_PATH}", self.server_url)
    }

    #[must_use]
    pub fn wrong_credentials(&self) -> Credentials {
        self.credentials.with_password(self.wrong_password.clone())
    }
}
