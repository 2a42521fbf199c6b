use std::io::Write;

use gradia_smoke_client::{HttpReply, PROFILE_PATH, RequestError};
use gradia_smoke_types::{BearerToken, Outcome, Scenario};

use crate::SmokeTest;

/// Characters of the token echoed in the `Headers:` line.
const HEADER_PREVIEW_CHARS: usize = 30;

impl<W: Write> SmokeTest<W> {
    /// Send the fixed profile.
    ///
    /// Without a token nothing is sent and the result is
    /// [`Outcome::Skipped`], which like `Failed` is not a pass
    /// ([`Outcome::is_passed`] is false).
    pub async fn create_profile(&mut self, token: Option<&BearerToken>) -> Outcome {
        self.console.section(&Scenario::CreateProfile.title());
        let Some(token) = token else {
            self.console
                .error("No authentication token available. Skipping profile test.");
            return Outcome::Skipped;
        };

        self.console
            .line(&format!("POST {}", self.client.endpoint(PROFILE_PATH)));
        self.print_auth_header(token);
        self.console.payload(&self.config.profile);

        let result = self.client.save_profile(token, &self.config.profile).await;
        self.report_profile_reply(
            result,
            "Profile created successfully!",
            "Profile creation failed",
        )
    }

    /// Read the profile back. Same token gating as [`Self::create_profile`]:
    /// no token means [`Outcome::Skipped`], never a pass.
    pub async fn get_profile(&mut self, token: Option<&BearerToken>) -> Outcome {
        self.console.section(&Scenario::GetProfile.title());
        let Some(token) = token else {
            self.console
                .error("No authentication token available. Skipping get profile test.");
            return Outcome::Skipped;
        };

        self.console
            .line(&format!("GET {}", self.client.endpoint(PROFILE_PATH)));
        self.print_auth_header(token);

        let result = self.client.get_profile(token).await;
        self.report_profile_reply(
            result,
            "Profile retrieved successfully!",
            "Get profile failed",
        )
    }

    fn print_auth_header(&mut self, token: &BearerToken) {
        self.console.line(&format!(
            "Headers: Authorization: Bearer {}",
            token.preview(HEADER_PREVIEW_CHARS)
        ));
    }

    fn report_profile_reply(
        &mut self,
        result: Result<HttpReply, RequestError>,
        success: &str,
        failure: &str,
    ) -> Outcome {
        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                self.report_request_error(&e, None);
                return Outcome::Failed;
            }
        };

        let code = reply.status_code();
        self.console.status(code);
        if !reply.is_ok() {
            self.console.error(&format!("{failure} (HTTP {code})"));
            self.console.response_text(&reply.display_body());
            return Outcome::Failed;
        }

        match reply.pretty_json() {
            Ok(pretty) => {
                self.console.success(success);
                self.console.response_json(&pretty);
                Outcome::Passed
            }
            Err(e) => {
                self.report_request_error(&e, None);
                Outcome::Failed
            }
        }
    }
}
