//! Search term compilation.
//!
//! A term is read one of three ways:
//!
//! - blank: match everything,
//! - starting with `\`: the rest is literal text,
//! - anything else: a case-insensitive regular expression.
//!
//! A regular expression that does not compile is retried as literal text, so compiling never
//! fails. The retry is recorded as [`PatternKind::Fallback`] rather than passed off as a literal
//! search the operator asked for.

use regex::{Regex, RegexBuilder};

/// Prefix that switches a search term to literal mode.
pub const LITERAL_MARKER: char = '\\';

/// Characters escaped when building a literal pattern.
pub const METACHARACTERS: &[char] = &[
    '.', '*', '+', '?', '^', '$', '{', '}', '(', ')', '|', '[', ']', '\\',
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternKind {
    MatchAll,
    Regex,
    Literal,
    Fallback { reason: String },
}

/// Location of the first match, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub len: usize,
}

#[derive(Debug, Clone)]
enum Matcher {
    All,
    Regex(Regex),
    /// Lowercased needle; used only if an escaped literal exceeds the regex size limit.
    Contains(String),
}

#[derive(Debug, Clone)]
pub struct CompiledPattern {
    term: String,
    source: String,
    kind: PatternKind,
    matcher: Matcher,
}

impl CompiledPattern {
    /// The term as the operator typed it.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The expression actually matched against names (escaped for literal and fallback kinds).
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.kind, PatternKind::Fallback { .. })
    }

    pub fn matches_all(&self) -> bool {
        self.kind == PatternKind::MatchAll
    }

    /// First match in `name`, or `None`. Match-all patterns report an empty span at 0.
    pub fn find(&self, name: &str) -> Option<MatchSpan> {
        match &self.matcher {
            Matcher::All => Some(MatchSpan { start: 0, len: 0 }),
            Matcher::Regex(regex) => regex.find(name).map(|m| MatchSpan {
                start: name[..m.start()].chars().count(),
                len: m.as_str().chars().count(),
            }),
            Matcher::Contains(needle) => find_folded(name, needle),
        }
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// One line telling the operator how the term was read.
    pub fn describe(&self) -> String {
        match &self.kind {
            PatternKind::MatchAll => "Empty search term - matching all users".to_string(),
            PatternKind::Regex => format!("Using regex pattern: {}", self.source),
            PatternKind::Literal => format!("Using literal search pattern: {}", self.source),
            PatternKind::Fallback { .. } => format!(
                "Falling back to plain text search (pattern was not a valid regex): {}",
                self.source
            ),
        }
    }
}

/// Compiles an operator search term. Never fails; see the module docs for the rules.
pub fn compile(term: &str) -> CompiledPattern {
    if term.trim().is_empty() {
        return CompiledPattern {
            term: term.to_string(),
            source: String::new(),
            kind: PatternKind::MatchAll,
            matcher: Matcher::All,
        };
    }

    if let Some(rest) = term.strip_prefix(LITERAL_MARKER) {
        return literal(term, rest, PatternKind::Literal);
    }

    match build(term) {
        Ok(regex) => CompiledPattern {
            term: term.to_string(),
            source: term.to_string(),
            kind: PatternKind::Regex,
            matcher: Matcher::Regex(regex),
        },
        Err(err) => literal(
            term,
            term,
            PatternKind::Fallback {
                reason: summary_line(&err.to_string()),
            },
        ),
    }
}

/// Backslash-escapes every character in [`METACHARACTERS`].
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        if METACHARACTERS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn literal(term: &str, text: &str, kind: PatternKind) -> CompiledPattern {
    let source = escape(text);
    let matcher = match build(&source) {
        Ok(regex) => Matcher::Regex(regex),
        Err(_) => Matcher::Contains(text.to_lowercase()),
    };
    CompiledPattern {
        term: term.to_string(),
        source,
        kind,
        matcher,
    }
}

/// Case-folded substring search. Lowercasing can change the char count (`İ` becomes two
/// chars), so each folded char remembers the index of the char it came from.
fn find_folded(name: &str, needle: &str) -> Option<MatchSpan> {
    if needle.is_empty() {
        return Some(MatchSpan { start: 0, len: 0 });
    }

    let mut haystack = String::with_capacity(name.len());
    let mut origin = Vec::with_capacity(name.len());
    for (index, c) in name.chars().enumerate() {
        for folded in c.to_lowercase() {
            haystack.push(folded);
            origin.push(index);
        }
    }

    let at = haystack.find(needle)?;
    let first = haystack[..at].chars().count();
    let last = first + needle.chars().count() - 1;
    Some(MatchSpan {
        start: origin[first],
        len: origin[last] - origin[first] + 1,
    })
}

fn build(source: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source).case_insensitive(true).build()
}

/// Regex errors span several lines (pattern, caret, message); keep the message.
fn summary_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .last()
        .unwrap_or(text)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_term_matches_everything() {
        for term in ["", "   ", "\t"] {
            let p = compile(term);
            assert!(p.matches_all());
            assert_eq!(p.find("anything"), Some(MatchSpan { start: 0, len: 0 }));
            assert_eq!(p.find(""), Some(MatchSpan { start: 0, len: 0 }));
        }
    }

    #[test]
    fn test_regex_is_case_insensitive() {
        let p = compile("^e");
        assert_eq!(p.kind(), &PatternKind::Regex);
        assert_eq!(p.find("Ervin Howell"), Some(MatchSpan { start: 0, len: 1 }));
        assert_eq!(p.find("Leanne Graham"), None);
    }

    #[test]
    fn test_reports_first_match_location() {
        let p = compile("how");
        assert_eq!(p.find("Ervin Howell"), Some(MatchSpan { start: 6, len: 3 }));
    }

    #[test]
    fn test_folded_search_maps_offsets_to_the_original_name() {
        // "İ" lowercases to two chars; "Öz" is still at char 3 of the original.
        assert_eq!(
            find_folded("İz Öztürk", "öz"),
            Some(MatchSpan { start: 3, len: 2 })
        );
        assert_eq!(
            find_folded("Zİya", "i\u{307}y"),
            Some(MatchSpan { start: 1, len: 2 })
        );
        assert_eq!(find_folded("Ervin Howell", "how"), Some(MatchSpan { start: 6, len: 3 }));
        assert_eq!(find_folded("Ervin Howell", "bauch"), None);
    }

    #[test]
    fn test_offsets_are_in_characters() {
        let p = compile("lö");
        assert_eq!(p.find("Zoë Ölö"), Some(MatchSpan { start: 5, len: 2 }));
    }

    #[test]
    fn test_literal_marker_escapes_metacharacters() {
        let p = compile(r"\A.B");
        assert_eq!(p.kind(), &PatternKind::Literal);
        assert_eq!(p.source(), r"A\.B");
        assert!(p.is_match("xa.by"));
        assert!(!p.is_match("AxB"));
    }

    #[test]
    fn test_literal_marker_alone_matches_everything() {
        let p = compile(r"\");
        assert_eq!(p.kind(), &PatternKind::Literal);
        assert_eq!(p.find("abc"), Some(MatchSpan { start: 0, len: 0 }));
    }

    #[test]
    fn test_escape_covers_the_full_set() {
        let escaped = escape(r".*+?^${}()|[]\");
        assert_eq!(escaped, r"\.\*\+\?\^\$\{\}\(\)\|\[\]\\");
        assert_eq!(escape("plain-text #1"), "plain-text #1");
    }

    #[test]
    fn test_every_metacharacter_literal_matches_itself() {
        for c in METACHARACTERS {
            let text = format!("a{}b", c);
            let p = compile(&format!("\\{}", text));
            assert_eq!(
                p.find(&format!("xx{}yy", text)),
                Some(MatchSpan { start: 2, len: 3 }),
                "literal {:?}",
                text
            );
        }
    }

    #[test]
    fn test_malformed_regex_falls_back_to_literal() {
        let p = compile("[abc");
        assert!(p.is_fallback());
        assert_eq!(p.source(), r"\[abc");
        assert!(p.is_match("x[ABC]"));
        assert!(!p.is_match("abc"));
        match p.kind() {
            PatternKind::Fallback { reason } => assert!(!reason.is_empty()),
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[test]
    fn test_fallback_is_described_as_fallback() {
        let fallback = compile("(unclosed");
        assert!(fallback.describe().starts_with("Falling back"));

        let literal = compile(r"\(unclosed");
        assert!(literal.describe().starts_with("Using literal search pattern"));
        assert!(!literal.is_fallback());
    }

    #[test]
    fn test_valid_regex_is_not_fallback() {
        let p = compile("[JA].*");
        assert!(!p.is_fallback());
        assert!(p.is_match("John Doe"));
        assert!(p.is_match("alice smith"));
        assert!(!p.is_match("Bob"));
    }
}
