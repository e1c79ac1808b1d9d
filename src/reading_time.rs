//! Reading time estimation.
//!
//! Only prose and code count as words; markup, link targets and raw HTML
//! tags do not.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Count the words of a Markdown document.
///
/// Text is joined across inline events before splitting, so entities,
/// escapes and inline markup inside a word do not break it apart.
pub fn count_words(markdown: &str) -> usize {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let mut prose = String::with_capacity(markdown.len());
    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Text(text) | Event::Code(text) => prose.push_str(&text),
            Event::Start(tag) if is_inline(&tag) => {}
            Event::End(tag) if is_inline_end(tag) => {}
            // Block boundaries, breaks and raw HTML separate words
            _ => prose.push(' '),
        }
    }
    prose.split_whitespace().count()
}

fn is_inline(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
    )
}

fn is_inline_end(tag: TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link | TagEnd::Image
    )
}

/// Minutes needed to read `words` at `words_per_minute`, rounded up.
///
/// `words_per_minute` must be positive.
pub fn estimate(words: usize, words_per_minute: f64) -> u64 {
    (words as f64 / words_per_minute).ceil() as u64
}
