//! Declarative Field Validation
//!
//! Each endpoint declares an ordered list of [`Rule`]s per field. Evaluation
//! never short-circuits across fields: every failing check contributes one
//! `{field, message}` entry and the full list is reported at once.
//!
//! HTML escaping of flagged fields happens only after the whole record
//! validates, so length and pattern rules always see raw input.

use chrono::{DateTime, NaiveDate};
use kernel::error::app_error::{AppError, FieldDetail};
use serde_json::{Map, Value};

use crate::sanitize::{restrict_fields, sanitize_record};

// ============================================================================
// Rules
// ============================================================================

/// A single field constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value must be present and non-empty after trimming
    Required,
    /// At least `n` characters
    MinLen(usize),
    /// Between `min` and `max` characters inclusive
    LenBetween(usize, usize),
    /// At most `n` characters
    MaxLen(usize),
    /// Valid email address syntax; passing values are lowercased in place
    Email,
    /// Must contain a lowercase letter, an uppercase letter and a digit
    PasswordClasses,
    /// Parses as an integer
    Integer,
    /// Parses as a finite number greater than zero
    PositiveFloat,
    /// Membership in a fixed set
    OneOf(&'static [&'static str]),
    /// ISO-8601 calendar date (`YYYY-MM-DD` or full RFC 3339)
    IsoDate,
}

impl Rule {
    fn check(&self, field: &str, text: &str) -> Result<(), String> {
        match self {
            // Presence is handled by the caller; a present value passes.
            Rule::Required => Ok(()),
            Rule::MinLen(min) => {
                if text.chars().count() < *min {
                    Err(format!("{} must be at least {} characters", field, min))
                } else {
                    Ok(())
                }
            }
            Rule::LenBetween(min, max) => {
                let len = text.chars().count();
                if len < *min || len > *max {
                    Err(format!(
                        "{} must be between {} and {} characters",
                        field, min, max
                    ))
                } else {
                    Ok(())
                }
            }
            Rule::MaxLen(max) => {
                if text.chars().count() > *max {
                    Err(format!("{} must be at most {} characters", field, max))
                } else {
                    Ok(())
                }
            }
            Rule::Email => {
                if is_valid_email(text) {
                    Ok(())
                } else {
                    Err(format!("{} must be a valid email address", field))
                }
            }
            Rule::PasswordClasses => {
                let has_lower = text.chars().any(|c| c.is_ascii_lowercase());
                let has_upper = text.chars().any(|c| c.is_ascii_uppercase());
                let has_digit = text.chars().any(|c| c.is_ascii_digit());
                if has_lower && has_upper && has_digit {
                    Ok(())
                } else {
                    Err(format!(
                        "{} must contain upper case, lower case letters and a number",
                        field
                    ))
                }
            }
            Rule::Integer => text
                .parse::<i64>()
                .map(|_| ())
                .map_err(|_| format!("{} must be an integer", field)),
            Rule::PositiveFloat => match text.parse::<f64>() {
                Ok(n) if n.is_finite() && n > 0.0 => Ok(()),
                _ => Err(format!("{} must be a number greater than zero", field)),
            },
            Rule::OneOf(options) => {
                if options.contains(&text) {
                    Ok(())
                } else {
                    Err(format!("{} must be one of: {}", field, options.join(", ")))
                }
            }
            Rule::IsoDate => {
                let plain = NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok();
                let full = DateTime::parse_from_rfc3339(text).is_ok();
                if plain || full {
                    Ok(())
                } else {
                    Err(format!("{} must be an ISO-8601 date", field))
                }
            }
        }
    }
}

// ============================================================================
// Field spec
// ============================================================================

/// Ordered rule chain for one field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: &'static str,
    rules: Vec<Rule>,
    escape: bool,
}

impl FieldSpec {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
            escape: false,
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Escape HTML-significant characters after validation succeeds
    pub fn escaped(mut self) -> Self {
        self.escape = true;
        self
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Run all rule chains over a record
///
/// On success, applies post-validation transforms in place: email
/// normalization (lowercase) and HTML escaping for flagged fields.
pub fn run_rules(
    specs: &[FieldSpec],
    record: &mut Map<String, Value>,
) -> Result<(), Vec<FieldDetail>> {
    let mut errors = Vec::new();

    for spec in specs {
        let text = record.get(spec.name).and_then(value_text);
        match text {
            Some(text) if !text.trim().is_empty() => {
                for rule in &spec.rules {
                    if let Err(message) = rule.check(spec.name, &text) {
                        errors.push(FieldDetail::new(spec.name, message));
                    }
                }
            }
            // Missing or blank: only the presence rule can speak; the other
            // rules have nothing to inspect.
            _ => {
                if spec.rules.contains(&Rule::Required) {
                    errors.push(FieldDetail::new(
                        spec.name,
                        format!("{} is required", spec.name),
                    ));
                }
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    for spec in specs {
        if spec.rules.contains(&Rule::Email) {
            if let Some(Value::String(s)) = record.get_mut(spec.name) {
                *s = s.trim().to_lowercase();
            }
        }
        if spec.escape {
            if let Some(Value::String(s)) = record.get_mut(spec.name) {
                *s = escape_html(s);
            }
        }
    }

    Ok(())
}

/// Full request-body pipeline: sanitize, restrict to an allow-list,
/// then validate
///
/// The returned record contains only allow-listed fields, with email
/// normalization and HTML escaping already applied.
pub fn validated_body(
    body: Value,
    allowed: &[&str],
    specs: &[FieldSpec],
) -> Result<Map<String, Value>, AppError> {
    let Value::Object(mut record) = body else {
        return Err(AppError::bad_request("Request body must be a JSON object"));
    };

    sanitize_record(&mut record);
    let mut record = restrict_fields(&record, allowed);
    run_rules(specs, &mut record).map_err(AppError::validation)?;

    Ok(record)
}

/// Extract a validated field as a string
///
/// Only meaningful after `validated_body` confirmed the field's presence.
pub fn str_field(record: &Map<String, Value>, name: &str) -> String {
    match record.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Escape the HTML-significant characters `< > & " '`
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Basic email syntax validation
///
/// Exactly one `@`, non-empty local part (≤64 chars), dotted domain of
/// alphanumerics, dots and hyphens.
fn is_valid_email(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || local.len() > 64 {
        return false;
    }

    if domain.is_empty() || !domain.contains('.') {
        return false;
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }

    if domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }
    if domain.starts_with('-') || domain.ends_with('-') {
        return false;
    }

    true
}
