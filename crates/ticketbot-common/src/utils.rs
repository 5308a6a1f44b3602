//! Shared utility functions.

/// Discord relative timestamp markup (`<t:1673553680:R>`), rendered by the
/// client as "in 5 minutes" / "2 hours ago".
pub fn relative_timestamp(unix_seconds: i64) -> String {
    format!("<t:{unix_seconds}:R>")
}
