use serde_json::Value;

use crate::jsonrpc;

/// Which stage of a call produced the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credentials incomplete; nothing was sent.
    Configuration,
    /// Network, timeout or TLS failure.
    Transport,
    /// The node answered with something that is not a usable envelope.
    Protocol,
    /// The remote method ran and reported an error.
    Application,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("RPC credentials are not set.")]
    NotConfigured,
    #[error("{0}")]
    Transport(String),
    #[error("Encode error {0}")]
    Encode(serde_json::Error),
    #[error("Unable to parse RPC response.")]
    Parse(#[source] serde_json::Error),
    #[error("Unexpected RPC response.")]
    UnexpectedResponse,
    #[error("Decode error {0}")]
    Decode(serde_json::Error),
    #[error("{0}")]
    Rpc(RpcError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotConfigured => ErrorKind::Configuration,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Encode(_) | Error::Parse(_) | Error::UnexpectedResponse | Error::Decode(_) => {
                ErrorKind::Protocol
            }
            Error::Rpc(_) => ErrorKind::Application,
        }
    }

    pub(crate) fn transport(err: &dyn std::error::Error) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !message.contains(&cause_text) {
                message.push_str(": ");
                message.push_str(&cause_text);
            }
            source = cause.source();
        }
        Error::Transport(message)
    }
}

/// Error reported by the node (or the in-process backend) for a call it executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcError {
    pub code: Option<i64>,
    pub message: String,
}

impl RpcError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    /// Builds the error from the envelope's `error` member.
    ///
    /// An object contributes its string `message` (and integer `code`); any
    /// other shape, or an object without a string `message`, is rendered as
    /// text in full.
    pub fn from_value(error: &Value) -> Self {
        match error {
            Value::Object(obj) => {
                let code = obj.get("code").and_then(Value::as_i64);
                match obj.get("message").and_then(Value::as_str) {
                    Some(message) => Self {
                        code,
                        message: message.to_string(),
                    },
                    None => Self {
                        code,
                        message: jsonrpc::to_text(error),
                    },
                }
            }
            other => Self::new(jsonrpc::to_text(other)),
        }
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RpcError {}

impl From<RpcError> for Error {
    fn from(err: RpcError) -> Self {
        Error::Rpc(err)
    }
}
