//! File extension extraction from object keys.

/// Derive the normalized extension key for an object key.
///
/// Takes the text after the last `.` in the final `/`-separated segment and
/// lower-cases it. A segment without a `.` has the empty extension, so
/// directory names never contribute.
///
/// # Example
///
/// ```
/// use sc_inventory::extension::extract;
///
/// assert_eq!(extract("reports/q1.CSV"), "csv");
/// assert_eq!(extract("README"), "");
/// assert_eq!(extract("archive.tar.gz"), "gz");
/// ```
pub fn extract(key: &str) -> String {
    let segment = key.rsplit('/').next().unwrap_or(key);
    match segment.rfind('.') {
        Some(idx) => segment[idx + 1..].to_lowercase(),
        None => String::new(),
    }
}

/// Normalize a configured extension (`".CSV"` -> `"csv"`).
pub fn normalize(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}
