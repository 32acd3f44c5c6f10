//! Owner domain entity

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::shared::validations::validation_error;

/// Display color used when an owner has none.
pub const DEFAULT_OWNER_COLOR: &str = "#6B7280";

/// A co-owner sharing the property's utility costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Owner {
    #[validate(length(min = 1, max = 128, message = "owner id is required"))]
    pub id: String,
    #[validate(length(min = 1, max = 100, message = "owner name is required"))]
    pub name: String,
    /// Display only
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_OWNER_COLOR.to_string()
}

impl Owner {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: default_color(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// Owner lists must be non-empty and must not repeat an id.
pub fn validate_owner_list(owners: &[Owner]) -> Result<(), ValidationError> {
    if owners.is_empty() {
        return Err(validation_error(
            "no_owners",
            "at least one owner is required",
        ));
    }

    let mut seen = HashSet::with_capacity(owners.len());
    if owners.iter().any(|o| !seen.insert(o.id.as_str())) {
        return Err(validation_error(
            "duplicate_owner",
            "owner ids must be unique",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_without_color() {
        let owner: Owner = serde_json::from_str(r#"{"id":"a","name":"Anna"}"#).unwrap();
        assert_eq!(owner.color, DEFAULT_OWNER_COLOR);
    }

    #[test]
    fn blank_name_fails_validation() {
        let owner = Owner::new("a", "");
        assert!(owner.validate().is_err());
    }

    #[test]
    fn owner_list_rules() {
        assert_eq!(validate_owner_list(&[]).unwrap_err().code, "no_owners");

        let dup = vec![Owner::new("a", "Anna"), Owner::new("a", "Anna bis")];
        assert_eq!(
            validate_owner_list(&dup).unwrap_err().code,
            "duplicate_owner"
        );

        let ok = vec![Owner::new("a", "Anna"), Owner::new("b", "Bruno")];
        assert!(validate_owner_list(&ok).is_ok());
    }
}
