use std::ops::Deref;
use std::sync::Arc;

use serde_json::Value;

use crate::backend::Backend;
use crate::credentials::{CredentialStore, Credentials};
use crate::error::Error;
use crate::http::{HttpTransport, Transport};
use crate::jsonrpc;
use crate::Result;

/// JSON-RPC client for the node's control interface.
///
/// Cloning is cheap and clones share credentials, so one panel reconfiguring
/// is seen by the next call made through any clone.
pub struct Client<T = HttpTransport> {
    inner: Arc<ClientInner<T>>,
}

impl<T> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Deref for Client<T> {
    type Target = ClientInner<T>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Client<HttpTransport> {
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new()?))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T) -> Self {
        Client {
            inner: Arc::new(ClientInner {
                credentials: CredentialStore::default(),
                transport,
            }),
        }
    }
}

pub struct ClientInner<T> {
    credentials: CredentialStore,
    transport: T,
}

impl<T: Transport> ClientInner<T> {
    /// Replaces the credentials. Never touches the network.
    pub fn configure(&self, credentials: Credentials) {
        tracing::debug!("rpc target set to {}", credentials.url());
        self.credentials.configure(credentials);
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_configured()
    }

    pub fn credentials(&self) -> Credentials {
        self.credentials.snapshot()
    }

    /// One blocking round trip. Uses a single credentials snapshot throughout.
    pub fn call(&self, method: &str, params: &[Value]) -> Result<Value> {
        self.round_trip(method, params).inspect_err(|e| {
            tracing::warn!("rpc call {method} failed: {e}");
        })
    }

    fn round_trip(&self, method: &str, params: &[Value]) -> Result<Value> {
        let credentials = self.credentials.snapshot();
        if !credentials.is_configured() {
            return Err(Error::NotConfigured);
        }

        let body = jsonrpc::encode(method, params, jsonrpc::REQUEST_ID)?;
        tracing::debug!("rpc call {method} -> {}", credentials.url());
        let bytes = self.transport.send(&credentials, body)?;
        let response = jsonrpc::decode(&bytes)?;
        response.into_result()
    }
}

impl<T: Transport> Backend for Client<T> {
    fn call(&self, method: &str, params: &[Value]) -> Result<Value> {
        self.inner.call(method, params)
    }
}
