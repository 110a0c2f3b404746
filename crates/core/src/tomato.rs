//! Tomato record, creation/update inputs, and their validation rules.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;
use crate::types::{DbId, EpochMillis};

/// Entity name used in not-found errors.
pub const ENTITY: &str = "Tomato";

// ---------------------------------------------------------------------------
// Validation messages
// ---------------------------------------------------------------------------

pub const REQUIRED_FIELDS_MESSAGE: &str = "Name, variety, and price are required fields";

pub const PRICE_MESSAGE: &str = "Price must be a non-negative number";

pub const EMPTY_TEXT_MESSAGE: &str = "Name and variety cannot be empty";

pub const IN_STOCK_MESSAGE: &str = "inStock must be a boolean";

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A stored tomato record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tomato {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub name: String,
    pub variety: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub in_stock: bool,
    pub created_at: EpochMillis,
    pub updated_at: EpochMillis,
}

/// Input for creating a tomato.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewTomato {
    #[validate(length(min = 1, message = "Name and variety cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Name and variety cannot be empty"))]
    pub variety: String,
    pub price: f64,
    pub description: Option<String>,
    /// Defaults to `true` if omitted.
    pub in_stock: Option<bool>,
}

impl NewTomato {
    pub fn new(name: impl Into<String>, variety: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            variety: variety.into(),
            price,
            description: None,
            in_stock: None,
        }
    }

    /// Check every field against the record invariants.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(into_core_error)?;
        validate_price(self.price)
    }
}

/// Input for a partial update. `None` leaves a field unchanged.
///
/// `description` has a second level: `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct UpdateTomato {
    #[validate(length(min = 1, message = "Name and variety cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Name and variety cannot be empty"))]
    pub variety: Option<String>,
    pub price: Option<f64>,
    pub description: Option<Option<String>>,
    pub in_stock: Option<bool>,
}

impl UpdateTomato {
    /// True when the caller supplied no changeable field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.variety.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.in_stock.is_none()
    }

    /// Check every supplied field against the record invariants.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(into_core_error)?;
        match self.price {
            Some(price) => validate_price(price),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

/// Prices must be finite and non-negative.
pub fn validate_price(price: f64) -> Result<(), CoreError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::Validation(PRICE_MESSAGE.to_string()))
    }
}

/// Stored prices never carry a negative sign: `-0.0` becomes `0.0`.
pub fn normalize_price(price: f64) -> f64 {
    if price == 0.0 {
        0.0
    } else {
        price
    }
}

/// Collapse `validator` output into one message. Messages are sorted and
/// deduplicated so the text is stable regardless of field order.
fn into_core_error(errors: ValidationErrors) -> CoreError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .map(|err| {
            err.message
                .as_deref()
                .map(str::to_owned)
                .unwrap_or_else(|| err.code.to_string())
        })
        .collect();
    messages.sort();
    messages.dedup();
    CoreError::Validation(messages.join("; "))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn valid_new_tomato_passes() {
        assert!(NewTomato::new("Cherry Tomato", "Sweet 100", 4.99).check().is_ok());
    }

    #[test]
    fn zero_price_is_allowed() {
        assert!(NewTomato::new("Free Tomato", "Heirloom", 0.0).check().is_ok());
    }

    #[test]
    fn negative_price_rejected() {
        let err = NewTomato::new("Cherry Tomato", "Sweet 100", -1.0)
            .check()
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == PRICE_MESSAGE);
    }

    #[test]
    fn non_finite_price_rejected() {
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn empty_name_and_variety_give_one_message() {
        let err = NewTomato::new("", "", 1.0).check().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == EMPTY_TEXT_MESSAGE);
    }

    #[test]
    fn empty_update_is_empty() {
        assert!(UpdateTomato::default().is_empty());
        assert!(UpdateTomato::default().check().is_ok());
    }

    #[test]
    fn clearing_description_is_not_empty() {
        let update = UpdateTomato {
            description: Some(None),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn update_with_negative_price_rejected() {
        let update = UpdateTomato {
            price: Some(-5.99),
            ..Default::default()
        };
        assert_matches!(update.check(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn update_with_empty_name_rejected() {
        let update = UpdateTomato {
            name: Some(String::new()),
            ..Default::default()
        };
        assert_matches!(update.check(), Err(CoreError::Validation(msg)) if msg == EMPTY_TEXT_MESSAGE);
    }

    #[test]
    fn record_serializes_with_wire_keys() {
        let tomato = Tomato {
            id: 1,
            name: "Cherry Tomato".into(),
            variety: "Sweet 100".into(),
            price: 4.99,
            description: None,
            in_stock: true,
            created_at: 10,
            updated_at: 10,
        };
        let json = serde_json::to_value(&tomato).unwrap();
        assert_eq!(json["_id"], 1);
        assert_eq!(json["inStock"], true);
        assert_eq!(json["createdAt"], 10);
        assert!(json.get("description").is_none());
    }

    #[test]
    fn normalize_price_drops_negative_zero() {
        assert!(normalize_price(-0.0).is_sign_positive());
        assert_eq!(normalize_price(4.99), 4.99);
        assert!(validate_price(-0.0).is_ok());
    }
}
