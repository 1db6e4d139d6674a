//! Response envelope shared by every exposed operation.
//!
//! The `{ success, message, data, errors }` shape is wire-compatible with the
//! storefront's existing consumers, so it is format-significant: list
//! operations carry arrays in `data`, boolean-only operations carry `true`,
//! and "removed" outcomes carry `null`.

use serde::Serialize;

use crate::error::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub errors: Vec<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::ok_with(data, "operation completed")
    }

    pub fn ok_with(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Success with no payload (e.g. removal via zero quantity).
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            errors: Vec::new(),
        }
    }

    pub fn error(err: &DomainError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            data: None,
            errors: vec![err.to_string()],
        }
    }

    pub fn from_result(result: DomainResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::error(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_shape() {
        let resp = ApiResponse::ok_with(vec![1, 2], "fetched");
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "message": "fetched",
                "data": [1, 2],
                "errors": []
            })
        );
    }

    #[test]
    fn error_envelope_carries_message_and_errors() {
        let resp: ApiResponse<bool> = ApiResponse::error(&DomainError::EmptyCart);
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            value,
            json!({
                "success": false,
                "message": "cart is empty",
                "data": null,
                "errors": ["cart is empty"]
            })
        );
    }

    #[test]
    fn empty_success_serializes_null_data() {
        let resp: ApiResponse<u32> = ApiResponse::ok_empty("removed");
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["data"], serde_json::Value::Null);
        assert_eq!(value["success"], json!(true));
    }
}
