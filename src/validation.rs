//! Input normalization shared by the guild store and the front-ends.

use crate::guild::errors::GuildError;

/// Derive the record key for a member name or quest title.
///
/// The rule is exactly: lowercase, then every space becomes an underscore.
/// Nothing else is stripped, so `"Bob Smith"`, `"bob smith"` and `"bob_smith"`
/// all map to `bob_smith`, while `"Bob  Smith"` (two spaces) does not.
pub fn derive_key(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Trim `value` and reject it if nothing is left.
pub fn require_text<'a>(field: &str, value: &'a str) -> Result<&'a str, GuildError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GuildError::InvalidInput(format!("{} cannot be empty", field)));
    }
    Ok(trimmed)
}

/// Treat `None` and whitespace-only strings alike as "not supplied".
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Append `.html` to an output file name that lacks it.
pub fn ensure_html_extension(file_name: &str) -> String {
    if file_name.ends_with(".html") {
        file_name.to_string()
    } else {
        format!("{}.html", file_name)
    }
}
