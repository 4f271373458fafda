pub mod duplication;
pub mod patterns;

pub use duplication::{extract_functions, find_duplicate_functions, find_duplicates_in};
pub use patterns::{find_lint_issues, rule_fires, LONG_LINE_THRESHOLD};
