//! Uniform result envelope returned by every endpoint

use serde::Serialize;

/// Response envelope: `{isSuccess, message, data?, errors?}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded
    pub is_success: bool,
    /// Human-readable outcome message, never empty
    pub message: String,
    /// Payload, present on success when the operation yields data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Field-level validation detail, present on failure when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    /// Successful response with a payload
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            is_success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }

    /// Successful response without a payload
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            is_success: true,
            message: message.into(),
            data: None,
            errors: None,
        }
    }

    /// Failed response; `errors` may be empty
    pub fn fail(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            is_success: false,
            message: message.into(),
            data: None,
            errors: if errors.is_empty() { None } else { Some(errors) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::ok("Created", 42)).unwrap();
        assert_eq!(body["isSuccess"], true);
        assert_eq!(body["message"], "Created");
        assert_eq!(body["data"], 42);
        assert!(body.get("errors").is_none());
    }

    #[test]
    fn failure_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::<()>::fail(
            "Validation failed",
            vec!["quantity must be >= 1".to_string()],
        ))
        .unwrap();
        assert_eq!(body["isSuccess"], false);
        assert_eq!(body["errors"][0], "quantity must be >= 1");
        assert!(body.get("data").is_none());
    }

    #[test]
    fn failure_without_detail_omits_errors() {
        let body = serde_json::to_value(ApiResponse::<()>::fail("Not found", Vec::new())).unwrap();
        assert!(body.get("errors").is_none());
    }
}
