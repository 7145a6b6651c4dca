//! The `.withOpacity(x)` → `.withValues(alpha: x)` text transform.
//!
//! Purely textual: the argument is whatever sits between `.withOpacity(` and the
//! first `)`, so nested calls such as `.withOpacity(f(a))` are cut at the inner
//! paren and leave a stray `)` behind.

use crate::error::{Error, Result};
use regex::Regex;
use std::borrow::Cow;

/// Deprecated call, with the argument captured in group 1.
pub const PATTERN: &str = r"\.withOpacity\(([^)]+)\)";

/// Replacement template. `${1}` is the captured argument, inserted verbatim.
pub const REPLACEMENT: &str = ".withValues(alpha: ${1})";

/// Result of rewriting one text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite<'a> {
    /// Transformed text. Borrowed when nothing matched.
    pub content: Cow<'a, str>,
    /// Number of call sites replaced.
    pub replacements: usize,
}

impl Rewrite<'_> {
    pub fn changed(&self) -> bool {
        self.replacements > 0
    }
}

/// One match of the deprecated call inside a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Byte offset of the leading `.`.
    pub start: usize,
    /// Byte offset just past the closing `)`.
    pub end: usize,
    pub matched: String,
    pub replacement: String,
}

#[derive(Debug, Clone)]
pub struct Rewriter {
    pattern: Regex,
}

impl Rewriter {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(PATTERN).map_err(|e| {
            Error::internal_unexpected(format!("compile rewrite pattern: {}", e))
        })?;
        Ok(Self { pattern })
    }

    /// Replace every leftmost, non-overlapping match in `text`.
    pub fn rewrite<'a>(&self, text: &'a str) -> Rewrite<'a> {
        let replacements = self.pattern.find_iter(text).count();
        if replacements == 0 {
            return Rewrite {
                content: Cow::Borrowed(text),
                replacements,
            };
        }

        Rewrite {
            content: self.pattern.replace_all(text, REPLACEMENT),
            replacements,
        }
    }

    /// List the matches `rewrite` would replace, in order.
    pub fn find(&self, text: &str) -> Vec<Occurrence> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let mut replacement = String::new();
                caps.expand(REPLACEMENT, &mut replacement);
                Some(Occurrence {
                    start: whole.start(),
                    end: whole.end(),
                    matched: whole.as_str().to_string(),
                    replacement,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(text: &str) -> String {
        Rewriter::new().unwrap().rewrite(text).content.into_owned()
    }

    #[test]
    fn simple_argument_preserved() {
        assert_eq!(
            rewrite("widget.withOpacity(0.5)"),
            "widget.withValues(alpha: 0.5)"
        );
    }

    #[test]
    fn multiple_occurrences_in_chain() {
        assert_eq!(
            rewrite("a.withOpacity(1).withOpacity(x)"),
            "a.withValues(alpha: 1).withValues(alpha: x)"
        );
    }

    #[test]
    fn nested_parens_truncate_at_first_close() {
        // Capture stops at the inner `)`; the outer one is left dangling.
        assert_eq!(
            rewrite("c.withOpacity(compute(a,b))"),
            "c.withValues(alpha: compute(a,b))"
        );
    }

    #[test]
    fn no_match_is_identity_and_borrowed() {
        let rewriter = Rewriter::new().unwrap();
        let text = "Colors.red.withAlpha(128);\n// withOpacity mentioned without a call\n";
        let result = rewriter.rewrite(text);
        assert!(!result.changed());
        assert!(matches!(result.content, Cow::Borrowed(_)));
        assert_eq!(result.content, text);
    }

    #[test]
    fn idempotent() {
        let input = "final c = theme.primary.withOpacity(.12);\nx.withOpacity(opacity * 0.5)\n";
        let once = rewrite(input);
        let twice = rewrite(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_argument_not_matched() {
        assert_eq!(rewrite("c.withOpacity()"), "c.withOpacity()");
    }

    #[test]
    fn argument_whitespace_kept_verbatim() {
        assert_eq!(
            rewrite("c.withOpacity(\n    0.3,\n  )"),
            "c.withValues(alpha: \n    0.3,\n  )"
        );
    }

    #[test]
    fn matches_inside_strings_and_comments() {
        assert_eq!(
            rewrite("// use .withOpacity(0.2)\nprint('.withOpacity(a)');"),
            "// use .withValues(alpha: 0.2)\nprint('.withValues(alpha: a)');"
        );
    }

    #[test]
    fn requires_leading_dot() {
        assert_eq!(rewrite("withOpacity(0.5)"), "withOpacity(0.5)");
    }

    #[test]
    fn replacement_count_matches_sites() {
        let rewriter = Rewriter::new().unwrap();
        let result = rewriter.rewrite("a.withOpacity(1) b.withOpacity(2) c.withOpacity(3)");
        assert_eq!(result.replacements, 3);
    }

    #[test]
    fn find_reports_offsets_and_replacements() {
        let rewriter = Rewriter::new().unwrap();
        let found = rewriter.find("x = c.withOpacity(0.5);");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, 5);
        assert_eq!(found[0].end, 22);
        assert_eq!(found[0].matched, ".withOpacity(0.5)");
        assert_eq!(found[0].replacement, ".withValues(alpha: 0.5)");
    }
}
