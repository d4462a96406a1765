//! The call-shaped interface every panel of the front-end talks to.
//!
//! [`Client`](crate::Client) implements it over the network, and
//! [`LocalBackend`](crate::local::LocalBackend) implements it against an
//! in-process wallet and chain index. UI code holds either behind the trait.

use std::sync::Arc;

use serde_json::Value;

use crate::call::Call;
use crate::error::Error;
use crate::Result;

pub trait Backend {
    /// Performs `method` with positional `params` and returns its result.
    fn call(&self, method: &str, params: &[Value]) -> Result<Value>;

    /// Typed form of [`Backend::call`].
    fn request<C: Call>(&self, call: C) -> Result<C::Response>
    where
        Self: Sized,
    {
        let params = call.to_params()?;
        let value = self.call(call.method(), &params)?;
        serde_json::from_value(value).map_err(Error::Decode)
    }
}

impl<B: Backend + ?Sized> Backend for &B {
    fn call(&self, method: &str, params: &[Value]) -> Result<Value> {
        (**self).call(method, params)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn call(&self, method: &str, params: &[Value]) -> Result<Value> {
        (**self).call(method, params)
    }
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn call(&self, method: &str, params: &[Value]) -> Result<Value> {
        (**self).call(method, params)
    }
}
