pub mod backend;
pub mod call;
mod client;
mod credentials;
mod error;
mod http;
pub mod local;

/// Single-call JSON-RPC envelope as spoken by the node's control interface.
///
/// This is the pre-2.0 dialect: no `jsonrpc` member, `id` always present.
pub mod jsonrpc {
    use std::borrow::Cow;

    use serde_json::Value;

    use crate::error::{Error, RpcError};
    use crate::Result;

    /// Calls are never pipelined, so every request carries the same id.
    pub const REQUEST_ID: u64 = 1;

    #[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
    pub struct Request<'a> {
        pub method: Cow<'a, str>,
        pub params: Cow<'a, [Value]>,
        pub id: u64,
    }

    impl<'a> Request<'a> {
        pub fn new(method: &'a str, params: &'a [Value], id: u64) -> Self {
            Self {
                method: Cow::Borrowed(method),
                params: Cow::Borrowed(params),
                id,
            }
        }
    }

    #[derive(serde::Deserialize, Debug, Clone, PartialEq)]
    pub struct Response {
        #[serde(default)]
        pub result: Value,
        // `null` and a missing member both land on `None`.
        #[serde(default)]
        pub error: Option<Value>,
        #[serde(default)]
        pub id: Value,
    }

    impl Response {
        /// A present, non-null `error` wins over any `result`.
        pub fn into_result(self) -> Result<Value> {
            match self.error {
                Some(error) => Err(Error::Rpc(RpcError::from_value(&error))),
                None => Ok(self.result),
            }
        }
    }

    pub fn encode(method: &str, params: &[Value], id: u64) -> Result<Vec<u8>> {
        serde_json::to_vec(&Request::new(method, params, id)).map_err(Error::Encode)
    }

    pub fn decode(bytes: &[u8]) -> Result<Response> {
        let value: Value = serde_json::from_slice(bytes).map_err(Error::Parse)?;
        if !value.is_object() {
            return Err(Error::UnexpectedResponse);
        }
        serde_json::from_value(value).map_err(|_| Error::UnexpectedResponse)
    }

    /// Text form of a JSON value: strings unquoted, everything else compact JSON.
    pub fn to_text(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::ErrorKind;
        use serde_json::json;

        #[test]
        fn encode_is_compact_and_ordered() {
            let bytes = encode("foo", &[json!("a"), json!(2)], REQUEST_ID).unwrap();
            assert_eq!(
                std::str::from_utf8(&bytes).unwrap(),
                r#"{"method":"foo","params":["a",2],"id":1}"#
            );
        }

        #[test]
        fn encode_without_params_sends_empty_array() {
            let bytes = encode("getbalance", &[], REQUEST_ID).unwrap();
            assert_eq!(
                std::str::from_utf8(&bytes).unwrap(),
                r#"{"method":"getbalance","params":[],"id":1}"#
            );
        }

        #[test]
        fn echoed_request_keeps_method_and_params() {
            let params = [json!("a"), json!(2)];
            let bytes = encode("foo", &params, REQUEST_ID).unwrap();
            let echoed: Request = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(echoed.method, "foo");
            assert_eq!(echoed.params.as_ref(), &params[..]);
            assert_eq!(echoed.id, 1);
        }

        #[test]
        fn result_with_null_error_is_success() {
            let resp = decode(br#"{"result": 42, "error": null, "id": 1}"#).unwrap();
            assert_eq!(resp.into_result().unwrap(), json!(42));
        }

        #[test]
        fn structured_error_uses_message() {
            let resp = decode(br#"{"error": {"message": "insufficient funds"}, "id": 1}"#).unwrap();
            let err = resp.into_result().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Application);
            assert_eq!(err.to_string(), "insufficient funds");
        }

        #[test]
        fn scalar_error_is_used_as_is() {
            let resp = decode(br#"{"error": "bad request", "id": 1}"#).unwrap();
            assert_eq!(resp.into_result().unwrap_err().to_string(), "bad request");
        }

        #[test]
        fn error_beats_result() {
            let resp = decode(br#"{"result": 1, "error": "nope", "id": 1}"#).unwrap();
            assert_eq!(resp.into_result().unwrap_err().to_string(), "nope");
        }

        #[test]
        fn empty_object_is_null_success() {
            let resp = decode(b"{}").unwrap();
            assert_eq!(resp.into_result().unwrap(), Value::Null);
        }

        #[test]
        fn non_object_is_unexpected() {
            let err = decode(b"[1,2,3]").unwrap_err();
            assert!(matches!(err, Error::UnexpectedResponse));
            assert_eq!(err.to_string(), "Unexpected RPC response.");
            assert_eq!(err.kind(), ErrorKind::Protocol);
        }

        #[test]
        fn invalid_json_is_parse_error() {
            let err = decode(b"{").unwrap_err();
            assert!(matches!(err, Error::Parse(_)));
            assert_eq!(err.to_string(), "Unable to parse RPC response.");
            assert_eq!(err.kind(), ErrorKind::Protocol);
        }

        #[test]
        fn to_text_unquotes_strings_only() {
            assert_eq!(to_text(&json!("abc")), "abc");
            assert_eq!(to_text(&json!(12.5)), "12.5");
            assert_eq!(to_text(&json!(true)), "true");
            assert_eq!(to_text(&Value::Null), "null");
            assert_eq!(to_text(&json!({"a": [1]})), r#"{"a":[1]}"#);
        }
    }
}

pub use backend::Backend;
pub use client::{Client, ClientInner};
pub use credentials::{CredentialStore, Credentials, DEFAULT_PORT};
pub use error::{Error, ErrorKind, RpcError};
pub use http::{HttpTransport, Transport, DEFAULT_TIMEOUT};

pub type Result<T> = std::result::Result<T, Error>;
