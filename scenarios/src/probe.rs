use std::io::Write;

use gradia_smoke_client::{LOGIN_PATH, RequestError, http_client_with_timeout, probe};
use thiserror::Error;

use crate::SmokeTest;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("cannot connect to server at {server_url}")]
    Unreachable {
        server_url: String,
        #[source]
        source: RequestError,
    },
    #[error("failed to build probe HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl<W: Write> SmokeTest<W> {
    /// Decide whether the backend is up before running any scenario.
    ///
    /// Tries the actuator health endpoint, then the login endpoint. Only a
    /// connection failure on the fallback is fatal; any answer, whatever its
    /// status, means the server is there.
    pub async fn check_connectivity(&mut self) -> Result<(), ProbeError> {
        let http = http_client_with_timeout(self.config.probe_timeout)?;

        let health_url = self.config.health_url();
        let health_err = match probe(&http, &health_url).await {
            Ok(status) => {
                tracing::info!(url = %health_url, status = status.as_u16(), "Server reachable");
                return Ok(());
            }
            Err(e) => e,
        };
        tracing::debug!(url = %health_url, kind = health_err.kind(), "Health probe failed, trying login endpoint");

        let login_url = self.client.endpoint(LOGIN_PATH);
        match probe(&http, &login_url).await {
            Ok(status) => {
                tracing::info!(url = %login_url, status = status.as_u16(), "Server reachable");
                Ok(())
            }
            Err(e) if e.is_connect() => {
                self.print_unreachable_guidance();
                Err(ProbeError::Unreachable {
                    server_url: self.config.server_url.clone(),
                    source: e,
                })
            }
            Err(e) => {
                // Connected but slow or broken: let the scenarios report it.
                tracing::warn!(url = %login_url, kind = e.kind(), "Login probe failed without a connection error; continuing");
                Ok(())
            }
        }
    }

    fn print_unreachable_guidance(&mut self) {
        let server_url = self.config.server_url.clone();
        self.console.blank();
        self.console
            .error(&format!("Cannot connect to server at {server_url}"));
        self.console.info("Please make sure:");
        self.console.info("  1. PostgreSQL is installed and running");
        self.console.info("  2. Database 'gradia_db' is created");
        self.console
            .info("  3. Spring Boot server is running (mvn spring-boot:run)");
    }
}
