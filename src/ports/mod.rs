//! Port trait for the billing API boundary.
//!
//! Code under test depends on [`BillingApi`] and receives an implementation
//! through its constructor. Tests hand it a [`FakeClient`](crate::FakeClient);
//! production wiring hands it an adapter over the real HTTP client.

use crate::coercion::FakeResponse;
use crate::error::FakeError;
use crate::fixture::Params;

/// Dispatches `<service>.<operation>` calls to a billing API.
pub trait BillingApi: Send + Sync {
    /// Performs `method` (e.g. `"customers.create"`) with `params`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call cannot be served.
    fn call(&self, method: &str, params: Params) -> Result<FakeResponse, FakeError>;
}

impl<T: BillingApi + ?Sized> BillingApi for &T {
    fn call(&self, method: &str, params: Params) -> Result<FakeResponse, FakeError> {
        (**self).call(method, params)
    }
}

impl<T: BillingApi + ?Sized> BillingApi for std::sync::Arc<T> {
    fn call(&self, method: &str, params: Params) -> Result<FakeResponse, FakeError> {
        (**self).call(method, params)
    }
}
