//! Shared response envelope types for API handlers.
//!
//! Every response carries a `success` flag. Successful responses put the
//! payload under `data` (plus `count` for lists and `message` for
//! mutations); failures put a human-readable message under `error`.

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(ApiResponse::list(items)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data,
            count: None,
            message: None,
        }
    }

    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// A list payload with its `count`.
    pub fn list(data: Vec<T>) -> Self {
        Self {
            count: Some(data.len()),
            ..Self::data(data)
        }
    }
}

/// `{ "success": false, "error": ... }` body for every failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    /// Request path, set only for unknown routes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_envelope_carries_count() {
        let json = serde_json::to_value(ApiResponse::list(vec![1, 2, 3])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "data": [1, 2, 3], "count": 3})
        );
    }

    #[test]
    fn single_envelope_omits_count_and_message() {
        let json = serde_json::to_value(ApiResponse::data("x")).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": "x"}));
    }

    #[test]
    fn error_body_omits_path_unless_set() {
        let json = serde_json::to_value(ErrorBody::new("Tomato not found")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "error": "Tomato not found"})
        );
    }
}
