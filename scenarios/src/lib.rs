//! Console-reported smoke scenarios for the Gradia candidate API.
//!
//! # Run Sequence
//!
//! ```text
//! check_connectivity ──(unreachable)──> Err(ProbeError)
//!        │
//!        v
//! registration ──(no token)──> login
//!        │                       │
//!        └──────────┬────────────┘
//!                   v
//!        token? ── yes ──> create_profile -> get_profile
//!                   │
//!                   no ──> "Cannot proceed ..."
//!                   v
//!             invalid_login -> "Testing Complete"
//! ```
//!
//! Every scenario prints its own section through [`Console`] and reports a
//! failure instead of returning an error, so one broken endpoint never stops
//! the rest of the run.

mod auth;
mod config;
mod console;
mod probe;
mod profile;
mod runner;

pub use auth::is_expected_rejection;
pub use config::SmokeConfig;
pub use console::{Console, RULE_WIDTH};
pub use probe::ProbeError;
pub use runner::{RunReport, SmokeTest};
