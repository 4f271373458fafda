/// Instructions prepended to code submitted for explanation
pub const REVIEWER_PREAMBLE: &str = "You are a senior code reviewer. Add detailed comments and \
best-practice signposts. Focus on naming, cohesion, error handling, typing, complexity, and DRY. \
Return concise markdown bullet points followed by a commented code block.";

/// Build the explanation prompt for a snippet
pub fn explain_prompt(code: &str) -> String {
    format!("{REVIEWER_PREAMBLE}\n\nCODE:\n{code}")
}
