//! Input Sanitization and Field Allow-Listing
//!
//! Two pure transforms applied to request bodies before validation:
//! - [`sanitize_record`] strips executable markup from string fields
//! - [`restrict_fields`] drops any field not on an explicit allow-list
//!   (mass-assignment defense)

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

static SCRIPT_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").expect("valid regex"));

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));

/// Strip `<script>` blocks and any remaining angle-bracket markup, then trim
///
/// Stripping runs to a fixpoint, so nested or reassembled markup cannot
/// survive one pass and the function is idempotent:
/// `sanitize_text(sanitize_text(x)) == sanitize_text(x)`.
pub fn sanitize_text(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let pass = TAG_RE
            .replace_all(&SCRIPT_BLOCK_RE.replace_all(&current, ""), "")
            .into_owned();
        if pass == current {
            break;
        }
        current = pass;
    }
    current.trim().to_string()
}

/// Sanitize every top-level string field of a record in place
///
/// Non-string values pass through unchanged.
pub fn sanitize_record(record: &mut Map<String, Value>) {
    for (_, value) in record.iter_mut() {
        if let Value::String(s) = value {
            *s = sanitize_text(s);
        }
    }
}

/// Rebuild a record keeping only allow-listed fields, in allow-list order
///
/// Fields absent from the input are omitted, never defaulted.
pub fn restrict_fields(record: &Map<String, Value>, allowed: &[&str]) -> Map<String, Value> {
    let mut filtered = Map::new();
    for &field in allowed {
        if let Some(value) = record.get(field) {
            filtered.insert(field.to_string(), value.clone());
        }
    }
    filtered
}
