//! Front matter header parsing.
//!
//! A document must open with a header block:
//!
//! ```text
//! ---
//! title: Hello
//! Author: "Ada Lovelace"
//! ---
//! Body text
//! ```
//!
//! The opening and closing lines are `---` or `...` (surrounding whitespace
//! ignored, the two may differ). Inside the block every line containing a
//! colon is a `key: value` pair; other lines are skipped.

use super::{MetaValue, Metadata, MetadataHook};
use thiserror::Error;

/// Lines that open or close a header block.
pub const SENTINELS: &[&str] = &["---", "..."];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontMatterError {
    #[error("Could not find metadata. File is empty.")]
    Empty,

    #[error("Could not find metadata header '...' or '---'.")]
    MissingHeader,

    #[error("Could not find end of metadata block.")]
    Unterminated,
}

fn is_sentinel(line: &str) -> bool {
    SENTINELS.contains(&line.trim())
}

/// Locate the header block, returning the index of the closing line.
fn find_block<S: AsRef<str>>(lines: &[S]) -> Result<usize, FrontMatterError> {
    let first = lines.first().ok_or(FrontMatterError::Empty)?;
    if !is_sentinel(first.as_ref()) {
        return Err(FrontMatterError::MissingHeader);
    }

    lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| is_sentinel(line.as_ref()))
        .map(|(i, _)| i)
        .ok_or(FrontMatterError::Unterminated)
}

/// Split a header line into its lowercased key and cleaned-up value.
fn parse_line(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim().to_lowercase(), strip_quotes(value.trim()).to_string()))
}

/// Remove one matching pair of surrounding `"` or `'`.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

fn collect<S, H>(block: &[S], hook: &H) -> Result<Metadata, H::Error>
where
    S: AsRef<str>,
    H: MetadataHook + ?Sized,
{
    let mut metadata = Metadata::new();
    for (key, value) in block.iter().filter_map(|line| parse_line(line.as_ref())) {
        let value: MetaValue = hook.process(&key, value)?;
        metadata.insert(key, value);
    }
    Ok(metadata)
}

/// Parse the header block at the start of `lines`.
///
/// Every value is passed through `hook` before it is stored. Later
/// duplicates of a key overwrite earlier ones.
pub fn extract<S, H>(lines: &[S], hook: &H) -> Result<Metadata, H::Error>
where
    S: AsRef<str>,
    H: MetadataHook + ?Sized,
{
    let end = find_block(lines)?;
    collect(&lines[1..end], hook)
}

/// Parse the header of `source` and return it with the remaining body.
///
/// The body starts on the line after the closing sentinel.
pub fn split<'a, H>(source: &'a str, hook: &H) -> Result<(Metadata, &'a str), H::Error>
where
    H: MetadataHook + ?Sized,
{
    let lines: Vec<&str> = source.lines().collect();
    let end = find_block(&lines)?;
    let metadata = collect(&lines[1..end], hook)?;

    // `lines` and `split_inclusive` agree on line count, so the byte offset of
    // the body is the length of the first `end + 1` raw lines.
    let offset: usize = source
        .split_inclusive('\n')
        .take(end + 1)
        .map(str::len)
        .sum();

    Ok((metadata, &source[offset..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::TextValues;

    fn parse(lines: &[&str]) -> Result<Metadata, FrontMatterError> {
        extract(lines, &TextValues)
    }

    #[test]
    fn test_basic_header() {
        let meta = parse(&["---", "title: Hello", "Author: \"Ada\"", "---", "Body"]).unwrap();
        assert_eq!(meta.len(), 2);
        assert_eq!(meta.text("title"), Some("Hello"));
        assert_eq!(meta.text("author"), Some("Ada"));
    }

    #[test]
    fn test_empty_input() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(err, FrontMatterError::Empty);
        assert_eq!(err.to_string(), "Could not find metadata. File is empty.");
    }

    #[test]
    fn test_missing_header() {
        let err = parse(&["title: Hello", "---"]).unwrap_err();
        assert_eq!(err.to_string(), "Could not find metadata header '...' or '---'.");
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse(&["---", "title: Hello", "More text"]).unwrap_err();
        assert_eq!(err.to_string(), "Could not find end of metadata block.");
    }

    #[test]
    fn test_dots_and_whitespace_sentinels() {
        let meta = parse(&["  ...  ", "a: 1", "---\t"]).unwrap();
        assert_eq!(meta.text("a"), Some("1"));
    }

    #[test]
    fn test_empty_block_is_allowed() {
        let meta = parse(&["---", "---", "Body"]).unwrap();
        assert!(meta.is_empty());
    }

    #[test]
    fn test_lines_without_colon_ignored() {
        let meta = parse(&["---", "just words", "", "k: v", "---"]).unwrap();
        assert_eq!(meta.keys().collect::<Vec<_>>(), vec!["k"]);
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let meta = parse(&["---", "url: https://example.org:8080/x", "---"]).unwrap();
        assert_eq!(meta.text("url"), Some("https://example.org:8080/x"));
    }

    #[test]
    fn test_duplicate_key_overwrites() {
        let meta = parse(&["---", "Title: one", "tag: x", "title: two", "---"]).unwrap();
        assert_eq!(meta.keys().collect::<Vec<_>>(), vec!["title", "tag"]);
        assert_eq!(meta.text("title"), Some("two"));
    }

    #[test]
    fn test_quote_stripping() {
        assert_eq!(strip_quotes("\"quoted\""), "quoted");
        assert_eq!(strip_quotes("'single'"), "single");
        assert_eq!(strip_quotes("\"mismatched'"), "\"mismatched'");
        assert_eq!(strip_quotes("\"\"double\"\""), "\"double\"");
        assert_eq!(strip_quotes("\""), "\"");
    }

    #[test]
    fn test_hook_applied_to_values() {
        let hook = |key: &str, value: String| -> Result<MetaValue, FrontMatterError> {
            Ok(if key == "title" { value.to_uppercase() } else { value }.into())
        };
        let meta = extract(&["---", "title: hello", "other: x", "---"], &hook).unwrap();
        assert_eq!(meta.text("title"), Some("HELLO"));
        assert_eq!(meta.text("other"), Some("x"));
    }

    #[test]
    fn test_split_returns_body() {
        let source = "---\ntitle: Sample\n---\nBody text";
        let (meta, body) = split(source, &TextValues).unwrap();
        assert_eq!(meta.text("title"), Some("Sample"));
        assert_eq!(body, "Body text");
    }

    #[test]
    fn test_split_crlf_and_no_body() {
        let (meta, body) = split("---\r\na: 1\r\n...\r\nline one\r\nline two\r\n", &TextValues).unwrap();
        assert_eq!(meta.text("a"), Some("1"));
        assert_eq!(body, "line one\r\nline two\r\n");

        let (_, body) = split("---\n---", &TextValues).unwrap();
        assert_eq!(body, "");
    }

    #[test]
    fn test_split_empty_source() {
        assert_eq!(split("", &TextValues).unwrap_err(), FrontMatterError::Empty);
    }
}
