//! Human-readable run report.
//!
//! Write errors are swallowed: a closed stdout must not abort the run.
//! Raw response bodies come from the network and are stripped of terminal
//! control sequences before printing.

use std::borrow::Cow;
use std::io::Write;

use serde::Serialize;

/// Width of the `=` rules framing every section.
pub const RULE_WIDTH: usize = 60;

pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(mut self) -> W {
        let _ = self.out.flush();
        self.out
    }

    /// Run heading: rule, title, rule.
    pub fn banner(&mut self, title: &str) {
        let rule = "=".repeat(RULE_WIDTH);
        let _ = write!(self.out, "\n{rule}\n  {title}\n{rule}\n");
    }

    /// Section heading: blank line, rule, title, rule, blank line.
    pub fn section(&mut self, title: &str) {
        self.banner(title);
        self.blank();
    }

    pub fn success(&mut self, message: &str) {
        self.line(&format!("✅ {message}"));
    }

    pub fn error(&mut self, message: &str) {
        self.line(&format!("❌ {message}"));
    }

    pub fn info(&mut self, message: &str) {
        self.line(&format!("ℹ️  {message}"));
    }

    pub fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    pub fn blank(&mut self) {
        let _ = writeln!(self.out);
    }

    /// `Payload: <indented JSON>`
    pub fn payload<T: Serialize>(&mut self, body: &T) {
        match serde_json::to_string_pretty(body) {
            Ok(json) => self.line(&format!("Payload: {json}")),
            Err(e) => self.line(&format!("Payload: <unserializable: {e}>")),
        }
    }

    /// Blank line, then `Status Code: N`.
    pub fn status(&mut self, code: u16) {
        self.blank();
        self.line(&format!("Status Code: {code}"));
    }

    /// Pretty JSON block for a successful response.
    pub fn response_json(&mut self, pretty: &str) {
        self.blank();
        self.line(&format!("Response:\n{pretty}"));
    }

    /// Raw body for a failed or unexpected response.
    pub fn response_text(&mut self, body: &str) {
        let body = strip_terminal_controls(body);
        self.line(&format!("Response: {body}"));
    }
}

fn is_disallowed_control(c: char) -> bool {
    c.is_control() && !matches!(c, '\n' | '\t' | '\r')
}

/// Drop ANSI escape sequences (CSI, OSC, two-byte) and control characters
/// other than newline, tab and carriage return.
fn strip_terminal_controls(input: &str) -> Cow<'_, str> {
    if !input.chars().any(is_disallowed_control) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            match chars.next() {
                // CSI: parameters up to a final byte in 0x40..=0x7E
                Some('[') => {
                    for next in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&next) {
                            break;
                        }
                    }
                }
                // OSC: terminated by BEL or ESC \
                Some(']') => {
                    while let Some(next) = chars.next() {
                        if next == '\x07' {
                            break;
                        }
                        if next == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
        } else if !is_disallowed_control(c) {
            out.push(c);
        }
    }
    Cow::Owned(out)
}
