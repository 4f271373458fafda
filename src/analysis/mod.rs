//! Local snippet analysis.
//!
//! Combines the normalizer, duplicate detector and lint heuristics into one
//! [`AnalysisResult`]. Everything here is pure and synchronous: no I/O, no
//! shared state, and no failure path. Input that does not look like code
//! simply produces fewer findings.

use crate::core::{AnalysisResult, RefactorSuggestion};
use crate::debt::{find_duplicate_functions, find_lint_issues};
use crate::formatting::format_code;

/// Analyze a snippet without calling any external service.
pub fn analyze(code: &str) -> AnalysisResult {
    let formatted = format_code(code);
    let findings = find_lint_issues(code);
    let refactors = build_refactors(&find_duplicate_functions(code));

    AnalysisResult {
        formatted,
        findings,
        refactors,
    }
}

/// One extraction hint per duplicate pair, or a single general note when there are none.
pub fn build_refactors(duplicates: &[(String, String)]) -> Vec<RefactorSuggestion> {
    if duplicates.is_empty() {
        return vec![RefactorSuggestion::no_duplicates()];
    }

    duplicates
        .iter()
        .map(|(first, second)| RefactorSuggestion::extract_helper(first, second))
        .collect()
}
