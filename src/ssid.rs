//! SSID quoting and normalization.
//!
//! Profile APIs match SSIDs in quoted-string form, while association info may
//! come back quoted or bare. Every comparison between a current and a target
//! SSID must go through [`normalize`], otherwise quoted vs unquoted mismatch
//! produces false negatives.

/// Wraps a bare SSID in quotation marks unless it is already quoted.
///
/// Used when writing to APIs that require quoted-string encoding for profile
/// matching.
pub fn quote(raw: &str) -> String {
    if raw.starts_with('"') && raw.ends_with('"') && raw.len() >= 2 {
        raw.to_string()
    } else {
        format!("\"{raw}\"")
    }
}

/// Strips surrounding quotes and leading/trailing whitespace.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.to_string()
}
