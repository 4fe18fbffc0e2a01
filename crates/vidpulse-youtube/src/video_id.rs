//! Video identifier extraction from user-supplied references.

use regex::Regex;

/// Extract the canonical video identifier from a user-supplied reference.
///
/// Tries three known URL shapes in fixed priority order — `watch?v=<id>`
/// (terminated by `&` or end of string), `youtu.be/<id>` and `embed/<id>`
/// (both terminated by `?` or end) — and returns the first capture. Scheme
/// and `www.` are optional. Returns `None` when no shape matches; a missing
/// identifier is a distinct terminal state, never an empty string.
#[must_use]
pub fn extract_video_id(reference: &str) -> Option<&str> {
    let patterns = [
        r"(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([^&]+)",
        r"(?:https?://)?(?:www\.)?youtu\.be/([^?]+)",
        r"(?:https?://)?(?:www\.)?youtube\.com/embed/([^?]+)",
    ];

    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid video id regex");
        if let Some(m) = re.captures(reference).and_then(|caps| caps.get(1)) {
            return Some(m.as_str());
        }
    }

    None
}
