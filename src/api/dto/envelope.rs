//! Uniform JSON envelope shared by every API response.

use serde::Serialize;
use serde_json::Value;

/// `{"status": "success"|"error", "message", "data"?, "errors"?}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
            data: None,
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: Value) -> Self {
        self.errors = Some(errors);
        self
    }
}

impl ApiResponse<()> {
    /// Success without a `data` member.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
            data: None,
            errors: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let body = ApiResponse::success("found", json!({ "shortened_url": "http://8000/abc123" }));
        let value = serde_json::to_value(body).unwrap();

        assert_eq!(value["status"], "success");
        assert_eq!(value["message"], "found");
        assert_eq!(value["data"]["shortened_url"], "http://8000/abc123");
        assert!(value.get("errors").is_none());
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let value = serde_json::to_value(ApiResponse::<()>::error("nope")).unwrap();

        assert_eq!(value, json!({ "status": "error", "message": "nope" }));
    }

    #[test]
    fn test_ok_envelope_omits_data() {
        let value = serde_json::to_value(ApiResponse::ok("deleted")).unwrap();

        assert_eq!(value, json!({ "status": "success", "message": "deleted" }));
    }
}
