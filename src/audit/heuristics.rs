//! Lexical heuristics over raw file text
//!
//! Keyword and ratio checks, not static analysis. Thresholds and keyword
//! lists are fixed.

use serde::{Deserialize, Serialize};

/// Substrings (lower-case) that mark a file as containing tests.
const TEST_INDICATORS: [&str; 10] = [
    "test",
    "assert",
    "expect",
    "should",
    "describe",
    "it(",
    "@test",
    "unittest",
    "testing.t",
    "t.run",
];

/// Control-flow keywords counted (as raw substrings) by [`assess_complexity`].
const COMPLEXITY_KEYWORDS: [&str; 10] = [
    "if", "else", "for", "while", "switch", "case", "try", "catch", "finally", "throw",
];

const COMMENT_PREFIXES: [&str; 3] = ["//", "#", "/*"];

const LONG_LINE: usize = 120;

/// Coarse documentation/readability bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityLabel {
    Good,
    Fair,
    NeedsImprovement,
    Unknown,
}

impl QualityLabel {
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsImprovement => "Needs Improvement",
            Self::Unknown => "Unknown",
        }
    }
}

/// Coarse control-flow density bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplexityLabel {
    High,
    Medium,
    Low,
    Unknown,
}

impl ComplexityLabel {
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Unknown => "Unknown",
        }
    }
}

/// True if `content` mentions any test keyword, ignoring case.
#[must_use]
pub fn has_test_indicators(content: &str) -> bool {
    if content.is_empty() {
        return false;
    }
    let lower = content.to_lowercase();
    TEST_INDICATORS.iter().any(|needle| lower.contains(needle))
}

/// Bucket `content` by comment density and long-line density.
///
/// A line is a comment when its trimmed form starts with `//`, `#` or `/*`;
/// a long line exceeds 120 bytes. Lines are split on `\n` only.
#[must_use]
pub fn assess_code_quality(content: &str) -> QualityLabel {
    if content.is_empty() {
        return QualityLabel::Unknown;
    }

    let mut total_lines = 0usize;
    let mut comment_lines = 0usize;
    let mut long_lines = 0usize;

    for line in content.split('\n') {
        total_lines += 1;
        let trimmed = line.trim();
        if COMMENT_PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
            comment_lines += 1;
        }
        if line.len() > LONG_LINE {
            long_lines += 1;
        }
    }

    let comment_ratio = comment_lines as f64 / total_lines as f64;
    let long_line_ratio = long_lines as f64 / total_lines as f64;

    if comment_ratio > 0.2 && long_line_ratio < 0.1 {
        QualityLabel::Good
    } else if comment_ratio > 0.1 && long_line_ratio < 0.2 {
        QualityLabel::Fair
    } else {
        QualityLabel::NeedsImprovement
    }
}

/// Bucket `content` by control-flow keyword occurrences per line.
///
/// Keywords are counted as case-insensitive, non-overlapping substrings, so
/// `elif` contributes an `if` and `format` a `for`.
#[must_use]
pub fn assess_complexity(content: &str) -> ComplexityLabel {
    if content.is_empty() {
        return ComplexityLabel::Unknown;
    }

    let lower = content.to_lowercase();
    let keyword_count: usize = COMPLEXITY_KEYWORDS
        .iter()
        .map(|kw| lower.matches(kw).count())
        .sum();
    let lines = content.split('\n').count();

    let ratio = keyword_count as f64 / lines as f64;
    if ratio > 0.1 {
        ComplexityLabel::High
    } else if ratio > 0.05 {
        ComplexityLabel::Medium
    } else {
        ComplexityLabel::Low
    }
}
