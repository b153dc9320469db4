//! Request Body Rules
//!
//! Every write endpoint runs the same pipeline before its use case:
//! markup stripping, field allow-list, then declarative validation.
//! Fields outside the allow-list are silently dropped, never persisted.

use platform::validate::{FieldSpec, Rule};

pub use platform::validate::{str_field, validated_body};

/// Fields accepted by POST /register
pub const REGISTER_FIELDS: &[&str] = &["name", "email", "password"];

/// Fields accepted by POST /login
pub const LOGIN_FIELDS: &[&str] = &["email", "password"];

pub fn register_specs() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("name")
            .rule(Rule::Required)
            .rule(Rule::LenBetween(3, 100))
            .escaped(),
        FieldSpec::new("email")
            .rule(Rule::Required)
            .rule(Rule::MaxLen(100))
            .rule(Rule::Email),
        FieldSpec::new("password")
            .rule(Rule::Required)
            .rule(Rule::MinLen(6))
            .rule(Rule::PasswordClasses),
    ]
}

pub fn login_specs() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("email").rule(Rule::Required).rule(Rule::Email),
        FieldSpec::new("password").rule(Rule::Required),
    ]
}
