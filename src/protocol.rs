//! Line-delimited JSON-RPC framing.
//!
//! One request object per input line, one response object per output line.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::ErrorEncoding;
use crate::error::{DecodeError, ToolError};

pub const JSONRPC_VERSION: &str = "2.0";

/// A decoded request line.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// `None` when the field is absent or `null`. Non-string values keep their JSON text.
    pub method: Option<String>,
    /// Always present; an absent or `null` field decodes to `{}`.
    pub params: Value,
    /// Echoed verbatim; absent decodes to `null`.
    pub id: Value,
}

impl Request {
    /// Decode one line (without its terminator).
    pub fn decode(line: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(line)?;
        let mut object = match serde_json::from_str::<Value>(text)? {
            Value::Object(object) => object,
            other => return Err(DecodeError::NotAnObject(json_type(&other))),
        };

        let method = match object.remove("method") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name),
            Some(other) => Some(other.to_string()),
        };
        let params = match object.remove("params") {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(params) => params,
        };
        let id = object.remove("id").unwrap_or(Value::Null);

        Ok(Self { method, params, id })
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Payload {
    Result(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(flatten)]
    pub payload: Payload,
}

impl Response {
    pub fn success(id: Value, result: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            payload: Payload::Result(result.into()),
        }
    }

    pub fn error(id: Value, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            payload: Payload::Error(message.into()),
        }
    }

    /// Response for a line that never became a request.
    pub fn decode_failure(err: &DecodeError) -> Self {
        Self::error(Value::Null, err.to_string())
    }

    pub fn from_outcome(
        id: Value,
        outcome: Result<String, ToolError>,
        encoding: ErrorEncoding,
    ) -> Self {
        match (outcome, encoding) {
            (Ok(text), _) => Self::success(id, text),
            (Err(e), ErrorEncoding::ErrorField) => Self::error(id, e.to_string()),
            (Err(e), ErrorEncoding::ResultText) => Self::success(id, format!("Error: {e}")),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.payload, Payload::Error(_))
    }

    /// Serialize as a single newline-terminated line.
    pub fn to_line(&self) -> serde_json::Result<Vec<u8>> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_request() {
        let line = br#"{"method":"fetch_url","params":{"url":"http://x"},"id":7}"#;
        let req = Request::decode(line).unwrap();
        assert_eq!(req.method.as_deref(), Some("fetch_url"));
        assert_eq!(req.params, json!({"url": "http://x"}));
        assert_eq!(req.id, json!(7));
    }

    #[test]
    fn missing_fields_get_defaults() {
        let req = Request::decode(br#"{"method":"save_file"}"#).unwrap();
        assert_eq!(req.params, json!({}));
        assert_eq!(req.id, Value::Null);

        let req = Request::decode(br#"{"params":null,"id":"abc"}"#).unwrap();
        assert_eq!(req.method, None);
        assert_eq!(req.params, json!({}));
        assert_eq!(req.id, json!("abc"));
    }

    #[test]
    fn non_string_method_keeps_json_text() {
        let req = Request::decode(br#"{"method":42,"id":1}"#).unwrap();
        assert_eq!(req.method.as_deref(), Some("42"));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(matches!(Request::decode(b""), Err(DecodeError::Json(_))));
        assert!(matches!(Request::decode(b"   "), Err(DecodeError::Json(_))));
        assert!(matches!(Request::decode(b"{not json"), Err(DecodeError::Json(_))));
        assert!(matches!(Request::decode(b"[1,2]"), Err(DecodeError::NotAnObject("array"))));
        assert!(matches!(Request::decode(b"\"hi\""), Err(DecodeError::NotAnObject("string"))));
        assert!(matches!(Request::decode(&[0xff, 0xfe]), Err(DecodeError::Utf8(_))));
    }

    #[test]
    fn success_line_shape() {
        let line = Response::success(json!(3), "body").to_line().unwrap();
        assert_eq!(line.last(), Some(&b'\n'));
        let value: Value = serde_json::from_slice(&line).unwrap();
        assert_eq!(value, json!({"jsonrpc": "2.0", "id": 3, "result": "body"}));
    }

    #[test]
    fn decode_failure_has_null_id_and_error() {
        let err = Request::decode(b"{").unwrap_err();
        let value = serde_json::to_value(Response::decode_failure(&err)).unwrap();
        assert_eq!(value["id"], Value::Null);
        assert!(value["error"].is_string());
        assert!(value.get("result").is_none());
    }

    #[test]
    fn outcome_encoding_is_selectable() {
        let err = || Err(ToolError::InvalidParams("missing field `url`".into()));

        let as_error = Response::from_outcome(json!(1), err(), ErrorEncoding::ErrorField);
        assert!(as_error.is_error());

        let as_text = Response::from_outcome(json!(1), err(), ErrorEncoding::ResultText);
        assert!(!as_text.is_error());
        match as_text.payload {
            Payload::Result(text) => assert!(text.starts_with("Error: ")),
            Payload::Error(_) => unreachable!(),
        }
    }
}
