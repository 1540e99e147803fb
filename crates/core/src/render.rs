//! Text rendering of events for notifications and API listings.

/// Maximum length of an event's short message.
pub const SHORT_MESSAGE_MAX_LEN: usize = 200;

/// Convert newlines in an event message to HTML line breaks.
pub fn html_message(message: &str) -> String {
    message.replace('\n', "<br />")
}

/// Title line used for notifications: `"<timestamp> <type name>"`.
pub fn event_title(timestamp: impl std::fmt::Display, type_name: &str) -> String {
    format!("{timestamp} {type_name}")
}

/// HTML body of a notification about an event.
pub fn event_html(timestamp: impl std::fmt::Display, type_name: &str, message: &str) -> String {
    format!(
        "<h2>{}</h2><p>{}</p>",
        event_title(timestamp, type_name),
        html_message(message)
    )
}

/// Derive a short message from a full one: the first non-empty line, cut to
/// [`SHORT_MESSAGE_MAX_LEN`] characters.
pub fn short_message_from(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
        .chars()
        .take(SHORT_MESSAGE_MAX_LEN)
        .collect()
}

/// Human readable one-liner for an event, `"'<message>' at <timestamp>"`.
pub fn event_summary(message: &str, timestamp: impl std::fmt::Display) -> String {
    format!("'{message}' at {timestamp}")
}
