//! Host wildcard patterns: `?` is one character, `*` any run, and `~`
//! escapes the following `?`, `*` or `~`. Matching is anchored at both ends
//! and case-insensitive under [`fold_case`], the same folding literal
//! comparison uses.

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::compare::fold_case;

/// Upper bound on cached patterns; past it new patterns are compiled per
/// call and not stored.
const CACHE_CAPACITY: usize = 1024;

static CACHE: Lazy<DashMap<String, Arc<WildcardPattern>>> = Lazy::new(DashMap::new);

/// A compiled pattern. Both the pattern and the searched text are folded
/// before the regex sees them.
#[derive(Clone, Debug)]
pub struct WildcardPattern {
    regex: Regex,
}

impl WildcardPattern {
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(&fold_case(text))
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Whether `text` needs pattern matching rather than plain equality.
pub fn has_wildcards(text: &str) -> bool {
    text.contains(['*', '?', '~'])
}

/// Translate a wildcard pattern into anchored regex source over folded text.
///
/// A `~` before anything other than a marker (or at the end) stays a
/// literal `~`.
pub fn to_regex_source(pattern: &str) -> String {
    let folded = fold_case(pattern);
    let mut out = String::with_capacity(folded.len() + 8);
    out.push_str("(?s)^");
    let mut chars = folded.chars().peekable();
    let mut literal = [0u8; 4];
    while let Some(ch) = chars.next() {
        match ch {
            '~' => match chars.peek() {
                Some(&next @ ('*' | '?' | '~')) => {
                    chars.next();
                    out.push_str(&regex::escape(next.encode_utf8(&mut literal)));
                }
                _ => out.push('~'),
            },
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            other => out.push_str(&regex::escape(other.encode_utf8(&mut literal))),
        }
    }
    out.push('$');
    out
}

pub fn compile(pattern: &str) -> Result<WildcardPattern, regex::Error> {
    Ok(WildcardPattern {
        regex: Regex::new(&to_regex_source(pattern))?,
    })
}

/// Compile through the shared cache. Concurrent compiles of the same
/// pattern race harmlessly: the first insert is kept.
pub fn compile_cached(pattern: &str) -> Result<Arc<WildcardPattern>, regex::Error> {
    if let Some(hit) = CACHE.get(pattern) {
        #[cfg(feature = "tracing")]
        tracing::debug!(pattern, "wildcard cache hit");
        return Ok(Arc::clone(hit.value()));
    }
    let compiled = Arc::new(compile(pattern)?);
    #[cfg(feature = "tracing")]
    tracing::debug!(pattern, regex = compiled.as_str(), "compiled wildcard");
    if CACHE.len() >= CACHE_CAPACITY {
        return Ok(compiled);
    }
    let entry = CACHE.entry(pattern.to_owned()).or_insert(compiled);
    Ok(Arc::clone(entry.value()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(pattern: &str, text: &str) -> bool {
        compile(pattern).unwrap().is_match(text)
    }

    #[test]
    fn star_and_question_mark() {
        assert!(m("a*c", "abc"));
        assert!(m("a*c", "ac"));
        assert!(!m("a*c", "ab"));
        assert!(m("a?c", "abc"));
        assert!(!m("a?c", "ac"));
        assert!(!m("a?c", "abbc"));
    }

    #[test]
    fn case_insensitive_and_anchored() {
        assert!(m("APP*", "apple pie"));
        assert!(!m("pie", "apple pie"));
        assert!(m("*pie", "Apple\nPie"));
    }

    #[test]
    fn tilde_escapes() {
        assert!(m("what~?", "what?"));
        assert!(!m("what~?", "whats"));
        assert!(m("5~*", "5*"));
        assert!(!m("5~*", "55"));
        assert!(m("a~~b", "a~b"));
        assert!(m("a~b", "a~b"));
        assert!(m("end~", "end~"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        assert!(m("1.5*", "1.50"));
        assert!(!m("1.5", "105"));
        assert!(m("(x)[y]", "(X)[Y]"));
    }

    #[test]
    fn folding_matches_literal_comparison() {
        // KELVIN SIGN lowercases to `k`; LONG S is already lowercase.
        assert!(m("\u{212A}elvin*", "KELVIN scale"));
        assert!(!m("s?", "\u{17F}t"));
        assert!(!m("\u{17F}*", "st"));
    }

    #[test]
    fn detection() {
        assert!(has_wildcards("a*"));
        assert!(has_wildcards("~"));
        assert!(!has_wildcards("plain"));
    }

    #[test]
    fn cache_returns_shared_pattern() {
        let a = compile_cached("cache-test-*").unwrap();
        let b = compile_cached("cache-test-*").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.is_match("CACHE-TEST-1"));
    }
}
