//! Duplicate function detection.
//!
//! This is a text heuristic, not a parser. A function starts at a `def NAME(...):`
//! header and its body runs up to the next line that begins with `def` followed by
//! whitespace, or to the end of input. Nested definitions, decorators, and class
//! boundaries are not tracked: a method header opens a record just like a
//! top-level one, and anything nested inside a body stays part of that body.

use crate::core::FunctionRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static FUNCTION_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"def\s+([A-Za-z_]\w*)\s*\([^)]*\)\s*:").expect("valid function header pattern")
});

static TOP_LEVEL_DEF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^def\s").expect("valid top-level def pattern"));

/// Extract function records in definition order.
pub fn extract_functions(code: &str) -> Vec<FunctionRecord> {
    let mut records = Vec::new();
    let mut cursor = 0;

    while let Some(captures) = FUNCTION_HEADER.captures_at(code, cursor) {
        let (Some(header), Some(name)) = (captures.get(0), captures.get(1)) else {
            break;
        };

        let body_start = header.end();
        let body_end = TOP_LEVEL_DEF
            .find_at(code, body_start)
            .map(|m| m.start())
            .unwrap_or(code.len());

        records.push(FunctionRecord::new(
            name.as_str(),
            &code[body_start..body_end],
        ));
        cursor = body_end;
    }

    records
}

/// Strip all whitespace so bodies differing only in layout compare equal.
pub fn normalize_body(body: &str) -> String {
    body.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Report `(first_seen, duplicate)` name pairs for functions with identical bodies.
///
/// Pairs come out in the order they are discovered scanning top to bottom. A
/// function whose body matches an earlier definition under the same name is
/// not reported.
pub fn find_duplicate_functions(code: &str) -> Vec<(String, String)> {
    find_duplicates_in(extract_functions(code))
}

/// Duplicate search over already-extracted records.
pub fn find_duplicates_in(records: Vec<FunctionRecord>) -> Vec<(String, String)> {
    let mut first_seen: HashMap<String, String> = HashMap::new();
    let mut duplicates = Vec::new();

    for record in records {
        let key = normalize_body(&record.body);
        match first_seen.get(&key) {
            Some(original) if *original != record.name => {
                log::debug!("Duplicate body: {} matches {}", record.name, original);
                duplicates.push((original.clone(), record.name));
            }
            Some(_) => {}
            None => {
                first_seen.insert(key, record.name);
            }
        }
    }

    duplicates
}
