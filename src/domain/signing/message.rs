//! Canonical message construction.

use std::collections::HashMap;

use super::field::SignatureField;

/// Field name to value mapping used as signing input.
pub type FieldValues = HashMap<String, String>;

/// Builds the canonical `name=value,...` message over every signed field.
///
/// Fields are emitted in [`SignatureField::ALL`] order regardless of map
/// iteration order. Missing fields are emitted with an empty value.
pub fn build_message(fields: &FieldValues) -> String {
    SignatureField::ALL
        .iter()
        .map(|field| {
            let name = field.as_str();
            let value = fields.get(name).map(String::as_str).unwrap_or("");
            format!("{}={}", name, value)
        })
        .collect::<Vec<_>>()
        .join(",")
}
