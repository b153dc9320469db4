//! Request Body Rules

use platform::validate::{FieldSpec, Rule};

pub use platform::validate::{str_field, validated_body};

/// Fields accepted by POST /transactions
pub const TRANSACTION_FIELDS: &[&str] =
    &["userId", "type", "description", "amount", "category", "date"];

pub fn transaction_specs() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("userId").rule(Rule::Required).rule(Rule::Integer),
        FieldSpec::new("type")
            .rule(Rule::Required)
            .rule(Rule::OneOf(&["income", "expense"])),
        FieldSpec::new("description")
            .rule(Rule::Required)
            .rule(Rule::LenBetween(3, 255))
            .escaped(),
        FieldSpec::new("amount")
            .rule(Rule::Required)
            .rule(Rule::PositiveFloat),
        FieldSpec::new("category")
            .rule(Rule::Required)
            .rule(Rule::MaxLen(50))
            .escaped(),
        FieldSpec::new("date").rule(Rule::Required).rule(Rule::IsoDate),
    ]
}
