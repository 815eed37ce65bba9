//! Language detection as an ordered, first-match-wins rule cascade.

mod rules;
/// Language tag set and alias parsing.
pub mod tag;

pub use tag::{LanguageTag, UnknownLanguage};

const SAMPLE_MAX_BYTES: usize = 64 * 1024;
const SAMPLE_MAX_LINES: usize = 512;

/// Text prepared once and shared by every rule.
pub struct Sample<'a> {
    /// Whole input with surrounding whitespace removed.
    pub full: &'a str,
    /// Bounded prefix of `full` used by the regex rules.
    pub head: &'a str,
}

impl<'a> Sample<'a> {
    fn new(content: &'a str) -> Self {
        let full = content.trim();
        Self {
            full,
            head: utf8_prefix(full, SAMPLE_MAX_BYTES),
        }
    }

    /// Lines of the bounded prefix.
    pub fn lines(&self) -> impl Iterator<Item = &'a str> {
        self.head.lines().take(SAMPLE_MAX_LINES)
    }
}

/// One step of the cascade: a predicate and the tag it yields.
pub struct Rule {
    pub name: &'static str,
    pub tag: LanguageTag,
    matches: fn(&Sample<'_>) -> bool,
}

impl Rule {
    /// Evaluate this rule alone against `content`.
    pub fn matches(&self, content: &str) -> bool {
        (self.matches)(&Sample::new(content))
    }
}

/// Tag used when no rule matches non-blank content.
pub const FALLBACK: LanguageTag = LanguageTag::Generic;

/// The rules in evaluation order; earlier rules take precedence.
pub fn rules() -> &'static [Rule] {
    rules::RULES
}

/// First rule that matches `content`, if any.
pub fn matching_rule(content: &str) -> Option<&'static Rule> {
    let sample = Sample::new(content);
    rules::RULES.iter().find(|rule| (rule.matches)(&sample))
}

/// Classify text into exactly one [`LanguageTag`].
///
/// Total and deterministic: blank input yields [`LanguageTag::Text`], and
/// content no rule recognizes yields [`FALLBACK`].
pub fn classify(content: &str) -> LanguageTag {
    matching_rule(content)
        .map(|rule| rule.tag)
        .unwrap_or(FALLBACK)
}

fn utf8_prefix(content: &str, max_bytes: usize) -> &str {
    if content.len() <= max_bytes {
        return content;
    }
    let mut end = max_bytes;
    while end > 0 && !content.is_char_boundary(end) {
        end = end.saturating_sub(1);
    }
    &content[..end]
}
