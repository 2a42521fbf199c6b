use std::io::Write;

use gradia_smoke_client::{HttpReply, LOGIN_PATH, REGISTER_PATH, RequestError};
use gradia_smoke_types::{ApiEnvelope, AuthData, AuthSession, Outcome, Scenario};

use crate::SmokeTest;

/// Characters of the token shown after a successful auth call.
const TOKEN_PREVIEW_CHARS: usize = 50;

impl<W: Write> SmokeTest<W> {
    /// Create the test account. Returns the session on a 200 with a usable
    /// token; every other outcome is printed and yields `None`.
    pub async fn registration(&mut self) -> Option<AuthSession> {
        self.console.section(&Scenario::Registration.title());
        self.console
            .line(&format!("POST {}", self.client.endpoint(REGISTER_PATH)));
        self.console.payload(&self.config.credentials);

        let result = self.client.register(&self.config.credentials).await;
        let session = match result {
            Ok(reply) => self.read_auth_reply(&reply, "Registration"),
            Err(e) => {
                let hint = format!(
                    "Cannot connect to server. Is the Spring Boot server running on {}?",
                    self.config.server_url
                );
                self.report_request_error(&e, Some(&hint));
                None
            }
        };
        tracing::debug!(obtained = session.is_some(), "Registration done");
        session
    }

    /// Log in with the test account; also prints the profile-complete flag.
    pub async fn login(&mut self) -> Option<AuthSession> {
        self.console.section(&Scenario::Login.title());
        self.console
            .line(&format!("POST {}", self.client.endpoint(LOGIN_PATH)));
        self.console.payload(&self.config.credentials);

        let result = self.client.login(&self.config.credentials).await;
        match result {
            Ok(reply) => {
                let session = self.read_auth_reply(&reply, "Login")?;
                self.console.info(&format!(
                    "Profile complete: {}",
                    session.user.profile_complete()
                ));
                Some(session)
            }
            Err(e) => {
                self.report_request_error(
                    &e,
                    Some("Cannot connect to server. Is the Spring Boot server running?"),
                );
                None
            }
        }
    }

    /// Log in with the wrong password. Passes only on 400 or 401.
    pub async fn invalid_login(&mut self) -> Outcome {
        self.console.section(&Scenario::InvalidLogin.title());
        let credentials = self.config.wrong_credentials();
        self.console
            .line(&format!("POST {}", self.client.endpoint(LOGIN_PATH)));
        self.console.payload(&credentials);

        let reply = match self.client.login(&credentials).await {
            Ok(reply) => reply,
            Err(e) => {
                self.report_request_error(&e, None);
                return Outcome::Failed;
            }
        };

        let code = reply.status_code();
        self.console.status(code);
        let rejected = is_expected_rejection(code);
        if rejected {
            self.console
                .success(&format!("Invalid login correctly rejected (HTTP {code})"));
        } else {
            self.console
                .error(&format!("Unexpected response (HTTP {code})"));
        }
        self.console.response_text(&reply.display_body());
        Outcome::from_passed(rejected)
    }

    /// Shared handling of `/register` and `/login` replies.
    fn read_auth_reply(&mut self, reply: &HttpReply, action: &str) -> Option<AuthSession> {
        let code = reply.status_code();
        self.console.status(code);

        if !reply.is_ok() {
            self.console
                .error(&format!("{action} failed (HTTP {code})"));
            self.console.response_text(&reply.display_body());
            return None;
        }

        let pretty = match reply.pretty_json() {
            Ok(pretty) => pretty,
            Err(e) => {
                self.report_request_error(&e, None);
                return None;
            }
        };
        self.console.success(&format!("{action} successful!"));
        self.console.response_json(&pretty);

        let envelope = match reply.json::<ApiEnvelope<AuthData>>() {
            Ok(envelope) => envelope,
            Err(e) => {
                self.report_request_error(&e, None);
                return None;
            }
        };
        match AuthSession::from_envelope(envelope) {
            Ok(session) => {
                self.console.info(&format!(
                    "Token received: {}",
                    session.token.preview(TOKEN_PREVIEW_CHARS)
                ));
                tracing::debug!(token_len = session.token.len(), "Token extracted");
                Some(session)
            }
            Err(e) => {
                self.console.error(&e.to_string());
                None
            }
        }
    }

    /// Print a transport/decode failure. Connection failures use `connect_hint`
    /// when one is given.
    pub(crate) fn report_request_error(&mut self, err: &RequestError, connect_hint: Option<&str>) {
        match connect_hint {
            Some(hint) if err.is_connect() => self.console.error(hint),
            _ => self.console.error(&format!("Error: {err}")),
        }
    }
}

/// Status codes the backend uses to refuse bad credentials.
#[must_use]
pub fn is_expected_rejection(status: u16) -> bool {
    matches!(status, 400 | 401)
}
