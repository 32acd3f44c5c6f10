//! Helpers shared by the validator-derived records and the HTTP boundary.

use std::collections::BTreeMap;

use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use super::errors::{DomainError, DomainResult};

/// Flatten nested validator errors into `path: message` strings.
///
/// Nested structs are prefixed with their field name (`bill.fixed_costs`),
/// list items with their index (`owners[1].id`).
pub fn describe_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort();
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if *field == "__all__" {
            prefix.to_string()
        } else if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                for e in errs {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    if path.is_empty() {
                        out.push(msg);
                    } else {
                        out.push(format!("{}: {}", path, msg));
                    }
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    collect(inner, &format!("{}[{}]", path, idx), out);
                }
            }
        }
    }
}

/// Run `Validate` and convert the failure into a [`DomainError::Validation`].
pub fn ensure_valid<T: Validate>(value: &T) -> DomainResult<()> {
    value.validate().map_err(|errors| {
        let messages = describe_errors(&errors);
        if messages.is_empty() {
            DomainError::validation("validation failed")
        } else {
            DomainError::validation(messages.join("; "))
        }
    })
}

pub(crate) fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Meter values must be finite and non-negative.
pub fn validate_meter_values(values: &BTreeMap<String, f64>) -> Result<(), ValidationError> {
    for (owner_id, value) in values {
        if owner_id.trim().is_empty() {
            return Err(validation_error(
                "empty_owner_id",
                "reading keys must be non-empty owner ids",
            ));
        }
        if !value.is_finite() || *value < 0.0 {
            return Err(validation_error(
                "negative_reading",
                "meter values must be finite and non-negative",
            ));
        }
    }
    Ok(())
}
