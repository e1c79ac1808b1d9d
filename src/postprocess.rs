//! HTML post-processing.

/// Percent-encoded placeholders Pandoc produces in link targets, and the
/// literal form site generators expect.
pub const ENCODED_PLACEHOLDERS: &[(&str, &str)] = &[
    ("%7Bstatic%7D", "{static}"),
    ("%7Battach%7D", "{attach}"),
    ("%7Bfilename%7D", "{filename}"),
];

/// Restore `{static}`, `{attach}` and `{filename}` placeholders in `html`.
pub fn rewrite_links(html: &str) -> String {
    ENCODED_PLACEHOLDERS
        .iter()
        .fold(html.to_string(), |html, (encoded, raw)| html.replace(encoded, raw))
}
