//! Mapping of free-form model replies to stance labels.

use vidpulse_core::Stance;

/// Map a model reply to a [`Stance`].
///
/// The reply is trimmed and upper-cased, then matched by substring.
/// "DISAGREE" textually contains "AGREE", so the more specific label is
/// checked first. Anything without a recognized keyword — including empty
/// or garbled replies — is neutral; no distinction is made between
/// "genuinely neutral" and "unparseable".
#[must_use]
pub fn stance_from_reply(reply: &str) -> Stance {
    let normalized = reply.trim().to_uppercase();

    if normalized.contains("DISAGREE") {
        Stance::Disagree
    } else if normalized.contains("AGREE") {
        Stance::Agree
    } else {
        Stance::Neutral
    }
}
