//! Common type definitions used across the codebase

use serde::Serialize;
use std::fmt;

/// A function definition lifted out of source text by the duplicate detector.
///
/// Records are transient: they live only for the duration of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRecord {
    pub name: String,
    pub body: String,
}

impl FunctionRecord {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// Identity of a single lint heuristic.
///
/// Declaration order is evaluation order, which is also the order findings
/// are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LintRule {
    Tabs,
    PrintWithoutLogging,
    SilentExcept,
    NoneEquality,
    StubFunction,
    LongLines,
    TrailingWhitespace,
}

impl LintRule {
    /// Every rule, in evaluation order.
    pub const ALL: [LintRule; 7] = [
        LintRule::Tabs,
        LintRule::PrintWithoutLogging,
        LintRule::SilentExcept,
        LintRule::NoneEquality,
        LintRule::StubFunction,
        LintRule::LongLines,
        LintRule::TrailingWhitespace,
    ];

    /// The fixed sentence reported when this rule fires.
    pub fn message(&self) -> &'static str {
        match self {
            LintRule::Tabs => "Use spaces instead of tabs (PEP 8).",
            LintRule::PrintWithoutLogging => {
                "Prefer `logging` over bare `print` for production code."
            }
            LintRule::SilentExcept => {
                "Avoid bare `except: pass`; catch specific exceptions and handle them."
            }
            LintRule::NoneEquality => "Use `is None` / `is not None` instead of `== None`.",
            LintRule::StubFunction => "Stub functions detected; implement or document TODOs.",
            LintRule::LongLines => "Some lines exceed 120 characters; consider wrapping.",
            LintRule::TrailingWhitespace => "Trailing whitespace found; remove for clean diffs.",
        }
    }
}

/// One lint observation. Serializes as its message sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Finding {
    rule: LintRule,
}

impl Finding {
    pub fn new(rule: LintRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> LintRule {
        self.rule
    }

    pub fn message(&self) -> &'static str {
        self.rule.message()
    }
}

impl From<Finding> for String {
    fn from(finding: Finding) -> Self {
        finding.message().to_string()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Symbol used for the suggestion emitted when no duplicates exist.
pub const GENERAL_SYMBOL: &str = "General";

/// A refactoring hint attached to an analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefactorSuggestion {
    pub symbol: String,
    pub suggestion: String,
}

impl RefactorSuggestion {
    /// Suggest extracting a helper shared by two functions with identical bodies.
    pub fn extract_helper(first: &str, second: &str) -> Self {
        Self {
            symbol: format!("{first} & {second}"),
            suggestion: format!(
                "Functions `{first}` and `{second}` have identical bodies. \
                 Extract a single helper and reuse."
            ),
        }
    }

    /// The single suggestion emitted when no duplication was found.
    pub fn no_duplicates() -> Self {
        Self {
            symbol: GENERAL_SYMBOL.to_string(),
            suggestion: "No duplicate functions detected. Consider extracting shared logic \
                         if future duplication appears."
                .to_string(),
        }
    }
}

/// Output of a local analysis run. Built fresh for every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub formatted: String,
    pub findings: Vec<Finding>,
    pub refactors: Vec<RefactorSuggestion>,
}

impl AnalysisResult {
    pub fn has_duplicates(&self) -> bool {
        self.refactors
            .iter()
            .any(|refactor| refactor.symbol != GENERAL_SYMBOL)
    }
}
