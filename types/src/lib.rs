//! Domain types for the Gradia candidate API smoke test.
//!
//! This crate contains pure request/response types with no IO, no async, and
//! minimal dependencies. The HTTP plumbing lives in `gradia-smoke-client` and
//! the console-driven scenarios in `gradia-smoke-scenarios`.

#![allow(clippy::missing_errors_doc)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Fixed Literals
// ============================================================================

/// Email of the throwaway candidate account the smoke test registers.
pub const TEST_EMAIL: &str = "test.candidate@example.com";
/// Password used for registration and the positive login.
pub const TEST_PASSWORD: &str = "password123";
/// Password used by the negative login test.
pub const WRONG_PASSWORD: &str = "wrongpassword";

// ============================================================================
// Credentials
// ============================================================================

/// Email/password pair sent to `/register` and `/login`.
///
/// Note: `Debug` is manually implemented to redact the password.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Same account, different password.
    #[must_use]
    pub fn with_password(&self, password: impl Into<String>) -> Self {
        Self::new(self.email.clone(), password)
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(TEST_EMAIL, TEST_PASSWORD)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Bearer Token
// ============================================================================

/// Opaque session credential returned by the auth endpoints.
///
/// Guaranteed non-empty. `Debug` redacts the value so the token never ends up
/// in logs; use [`BearerToken::preview`] for console output.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

#[derive(Debug, Error)]
#[error("bearer token must not be empty")]
pub struct EmptyTokenError;

impl BearerToken {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyTokenError> {
        let value = value.into();
        if value.is_empty() {
            Err(EmptyTokenError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// First `max_chars` characters followed by `...`.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        let head: String = self.0.chars().take(max_chars).collect();
        format!("{head}...")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BearerToken(<redacted>)")
    }
}

// ============================================================================
// Profile Payload
// ============================================================================

/// Candidate profile body for `POST /profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub full_name: String,
    pub mobile: String,
    pub location: String,
    pub linkedin: String,
    pub profile_picture: String,
    pub resume_url: String,
    pub experience_level: String,
    pub preferred_role: String,
}

impl Default for ProfilePayload {
    fn default() -> Self {
        Self {
            full_name: "John Doe".to_string(),
            mobile: "+1234567890".to_string(),
            location: "New York, USA".to_string(),
            linkedin: "https://linkedin.com/in/johndoe".to_string(),
            profile_picture: "https://example.com/picture.jpg".to_string(),
            resume_url: "https://example.com/resume.pdf".to_string(),
            experience_level: "Mid-level".to_string(),
            preferred_role: "Software Engineer".to_string(),
        }
    }
}

// ============================================================================
// Response Envelope
// ============================================================================

/// Wrapper every candidate endpoint responds with.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// `data` payload of `/register` and `/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthData {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

/// Account summary embedded in an auth response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub profile_complete: Option<bool>,
    /// Fields the backend adds that this tool doesn't model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserInfo {
    /// Missing flag reads as incomplete.
    #[must_use]
    pub fn profile_complete(&self) -> bool {
        self.profile_complete.unwrap_or(false)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("No token in response")]
    MissingToken,
    #[error("Malformed response: missing user object")]
    MissingUser,
}

/// Token and user extracted from a successful auth envelope.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: BearerToken,
    pub user: UserInfo,
}

impl AuthSession {
    /// Validate an auth envelope.
    ///
    /// An unsuccessful envelope, an absent `data`, or an empty token are all
    /// reported as a missing token.
    pub fn from_envelope(envelope: ApiEnvelope<AuthData>) -> Result<Self, EnvelopeError> {
        if !envelope.success {
            return Err(EnvelopeError::MissingToken);
        }
        let data = envelope.data.ok_or(EnvelopeError::MissingToken)?;
        let token = data
            .token
            .and_then(|t| BearerToken::new(t).ok())
            .ok_or(EnvelopeError::MissingToken)?;
        let user = data.user.ok_or(EnvelopeError::MissingUser)?;
        Ok(Self { token, user })
    }
}

// ============================================================================
// Scenarios
// ============================================================================

/// The five checks the smoke test runs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    Registration,
    Login,
    CreateProfile,
    GetProfile,
    InvalidLogin,
}

impl Scenario {
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Scenario::Registration => 1,
            Scenario::Login => 2,
            Scenario::CreateProfile => 3,
            Scenario::GetProfile => 4,
            Scenario::InvalidLogin => 5,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Scenario::Registration => "Candidate Registration",
            Scenario::Login => "Candidate Login",
            Scenario::CreateProfile => "Create/Update Profile",
            Scenario::GetProfile => "Get Profile",
            Scenario::InvalidLogin => "Invalid Login (Negative Test)",
        }
    }

    /// Section heading, e.g. `Test 1: Candidate Registration`.
    #[must_use]
    pub fn title(self) -> String {
        format!("Test {}: {}", self.number(), self.name())
    }
}

/// Result of a single scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
    /// Not attempted because a prerequisite (the token) was missing.
    Skipped,
}

impl Outcome {
    #[must_use]
    pub const fn from_passed(passed: bool) -> Self {
        if passed { Outcome::Passed } else { Outcome::Failed }
    }

    #[must_use]
    pub const fn is_passed(self) -> bool {
        matches!(self, Outcome::Passed)
    }
}
