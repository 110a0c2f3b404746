//! Presence-tracking wrapper for optional request fields.
//!
//! A JSON body can leave a key out, send it as `null`, or send a value.
//! Plain `Option<T>` folds the first two together, which loses the
//! difference between "leave unchanged" and "clear". Use [`Field`] with
//! `#[serde(default)]` so an absent key deserializes to [`Field::Missing`].

use serde::{Deserialize, Deserializer};

/// An optional input field: absent, explicitly `null`, or a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Missing,
    Null,
    Value(T),
}

impl<T> Field<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    /// The supplied value, treating `null` the same as absence.
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Value(value) => Some(value),
            Field::Missing | Field::Null => None,
        }
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Missing
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Field::Value(value),
            None => Field::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        description: Field<String>,
        #[serde(default)]
        price: Field<serde_json::Value>,
    }

    #[test]
    fn absent_key_is_missing() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert!(body.description.is_missing());
        assert!(body.price.is_missing());
    }

    #[test]
    fn null_is_distinct_from_missing() {
        let body: Body = serde_json::from_str(r#"{"description": null, "price": null}"#).unwrap();
        assert_eq!(body.description, Field::Null);
        assert_eq!(body.price, Field::Null);
    }

    #[test]
    fn value_is_kept_as_supplied() {
        let body: Body =
            serde_json::from_str(r#"{"description": "Sweet", "price": "expensive"}"#).unwrap();
        assert_eq!(body.description, Field::Value("Sweet".to_string()));
        assert_eq!(body.price, Field::Value(serde_json::json!("expensive")));
    }

    #[test]
    fn into_option_folds_null_into_none() {
        assert_eq!(Field::<bool>::Null.into_option(), None);
        assert_eq!(Field::<bool>::Missing.into_option(), None);
        assert_eq!(Field::Value(false).into_option(), Some(false));
    }
}
