//! Input acceptance and the live character counter.

/// Soft limit on a single message. The counter turns critical past 450 but
/// submission is never blocked; the backend owns hard validation.
pub const MAX_MESSAGE_CHARS: usize = 500;

const WARNING_THRESHOLD: usize = 400;
const CRITICAL_THRESHOLD: usize = 450;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

/// Display state of the character counter. A pure function of the text
/// length; nothing is persisted beyond what is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterState {
    pub text: String,
    pub severity: Severity,
}

pub fn counter_state(text: &str) -> CounterState {
    let len = text.chars().count();
    let severity = if len > CRITICAL_THRESHOLD {
        Severity::Critical
    } else if len > WARNING_THRESHOLD {
        Severity::Warning
    } else {
        Severity::Normal
    };
    CounterState {
        text: format!("{}/{}", len, MAX_MESSAGE_CHARS),
        severity,
    }
}

/// Trim the raw input; empty or whitespace-only input is rejected silently
/// (no transcript entry, no network call).
pub fn accept_input(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
