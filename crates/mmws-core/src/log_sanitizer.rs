//! Log shaping for server messages and response bodies
//!
//! Error bodies can be whole HTML pages from a proxy, and record data may be
//! long (TXT, DNSKEY). Before they reach a log line they are flattened to a
//! single line and capped at [`LOG_LIMIT`] bytes. Errors returned to callers
//! always keep the full text.

/// Maximum number of bytes of text kept by [`truncate_for_log`]
pub const LOG_LIMIT: usize = 256;

/// One-line, length-capped rendition of `s` for a log message
///
/// Runs of whitespace (including newlines) collapse to a single space. Text
/// longer than [`LOG_LIMIT`] bytes is cut at the last char boundary within
/// the limit and the original size is appended.
///
/// ```
/// use mmws_core::log_sanitizer::truncate_for_log;
///
/// assert_eq!(truncate_for_log("Bad\r\n  Gateway\n"), "Bad Gateway");
/// ```
pub fn truncate_for_log(s: &str) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.len() <= LOG_LIMIT {
        return flat;
    }

    let cut = (0..=LOG_LIMIT)
        .rev()
        .find(|&i| flat.is_char_boundary(i))
        .unwrap_or(0);
    format!("{}... ({} bytes)", &flat[..cut], s.len())
}
