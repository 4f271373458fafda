//! Lint heuristics.
//!
//! Each rule is a text-level check over the raw snippet (substring, regex or
//! per-line scan), not a parse. Rules run in the fixed order of
//! [`LintRule::ALL`] and each contributes at most one finding.

use crate::core::{Finding, LintRule};
use once_cell::sync::Lazy;
use regex::Regex;

/// Lines longer than this many characters are flagged.
pub const LONG_LINE_THRESHOLD: usize = 120;

/// Token whose presence anywhere in the text counts as structured logging.
const LOGGING_TOKEN: &str = "logging";

static PRINT_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"print\(.+?\)").expect("valid print pattern"));

static SILENT_EXCEPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"except\s*:\s*pass").expect("valid except pattern"));

static NONE_EQUALITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:==|!=)\s*None|None\s*(?:==|!=)").expect("valid none comparison pattern")
});

static STUB_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"def\s+.+\([^)]*\):\s*\n\s*pass\b").expect("valid stub function pattern")
});

/// Run every lint heuristic over `code`, reporting findings in rule order.
///
/// Each rule fires at most once regardless of how many lines match.
pub fn find_lint_issues(code: &str) -> Vec<Finding> {
    LintRule::ALL
        .iter()
        .copied()
        .filter(|rule| rule_fires(*rule, code))
        .map(Finding::new)
        .collect()
}

/// Evaluate a single rule against the whole text.
pub fn rule_fires(rule: LintRule, code: &str) -> bool {
    match rule {
        LintRule::Tabs => code.contains('\t'),
        LintRule::PrintWithoutLogging => {
            PRINT_CALL.is_match(code) && !code.contains(LOGGING_TOKEN)
        }
        LintRule::SilentExcept => SILENT_EXCEPT.is_match(code),
        LintRule::NoneEquality => NONE_EQUALITY.is_match(code),
        LintRule::StubFunction => STUB_FUNCTION.is_match(code),
        LintRule::LongLines => code
            .lines()
            .any(|line| line.chars().count() > LONG_LINE_THRESHOLD),
        LintRule::TrailingWhitespace => code
            .lines()
            .any(|line| line.ends_with(char::is_whitespace)),
    }
}
