//! Logging utilities with sensitive data redaction.

use std::fmt;

/// Longest frame excerpt written to logs
pub const MAX_LOGGED_FRAME: usize = 256;

/// Wrapper for sensitive data that redacts on display
#[derive(Clone)]
pub struct Redacted<T>(T);

impl<T> Redacted<T> {
    /// Create a new redacted value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Get the inner value (use sparingly)
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T> fmt::Debug for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl<T> fmt::Display for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

/// Redact token from a string, preserving prefix for debugging
pub fn redact_token(token: &str) -> String {
    match token.get(..8) {
        Some(prefix) if token.len() > 8 => format!("{}...[REDACTED]", prefix),
        _ => "[REDACTED]".to_string(),
    }
}

/// Redact a URL. Sensitive query parameters are hidden, and so is the
/// per-connection ticket that RTM socket URLs carry after `/websocket/`.
pub fn redact_url(url: &str) -> String {
    let (base, query) = match url.find('?') {
        Some(query_start) => url.split_at(query_start),
        None => (url, ""),
    };

    let base = match base.find("/websocket/") {
        Some(pos) => format!("{}/websocket/[REDACTED]", &base[..pos]),
        None => base.to_string(),
    };

    if query.is_empty() {
        base
    } else {
        format!("{}{}", base, redact_query_params(query))
    }
}

/// Redact sensitive query parameters
fn redact_query_params(query: &str) -> String {
    let sensitive_params = ["token", "key", "secret", "client_secret", "code"];

    let mut result = String::from("?");
    let params = query.trim_start_matches('?');

    for (i, pair) in params.split('&').enumerate() {
        if i > 0 {
            result.push('&');
        }

        if let Some(eq_pos) = pair.find('=') {
            let (key, _value) = pair.split_at(eq_pos);
            if sensitive_params.iter().any(|&s| key.eq_ignore_ascii_case(s)) {
                result.push_str(key);
                result.push_str("=[REDACTED]");
            } else {
                result.push_str(pair);
            }
        } else {
            result.push_str(pair);
        }
    }

    result
}

/// Shorten an inbound frame for logging
pub fn frame_excerpt(frame: &str) -> &str {
    if frame.len() <= MAX_LOGGED_FRAME {
        return frame;
    }
    let mut end = MAX_LOGGED_FRAME;
    while !frame.is_char_boundary(end) {
        end -= 1;
    }
    &frame[..end]
}
