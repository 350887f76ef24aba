//! Field-name normalization.

/// Normalize a field name to its list-feed key: drop every non-alphanumeric
/// character, then lowercase. `"Hours Worked"`, `"hours-worked"` and
/// `"HOURS_WORKED"` all collapse to `"hoursworked"`.
pub(crate) fn normalize(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
