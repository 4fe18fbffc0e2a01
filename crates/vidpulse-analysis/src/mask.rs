//! Author display-name masking.

/// Mask an author display name for storage and display.
///
/// Keeps the first and last character and replaces everything strictly
/// between them with `*`. Names shorter than two characters pass through
/// unchanged: there is no interior to hide, and rejecting them would turn
/// a cosmetic concern into a dropped comment. Operates on `char`
/// boundaries, so multi-byte names mask without splitting code points.
#[must_use]
pub fn mask_author(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() < 2 {
        return name.to_string();
    }

    let mut masked = String::with_capacity(name.len());
    masked.push(chars[0]);
    masked.push_str(&"*".repeat(chars.len() - 2));
    masked.push(chars[chars.len() - 1]);
    masked
}
