//! Service proxies: `client.service("customers").create(...)`.
//!
//! A proxy holds a service name and a borrowed API. Each operation composes
//! the method key `<service>.<operation>`, folds its arguments into a single
//! params object, and forwards both to [`BillingApi::call`].

use serde_json::Value;
use tracing::debug;

use crate::coercion::FakeResponse;
use crate::error::FakeError;
use crate::fixture::Params;
use crate::method_key::MethodKey;
use crate::ports::BillingApi;

/// One positional argument of a proxied call.
#[derive(Debug, Clone, PartialEq)]
pub enum CallArg {
    /// A params mapping.
    Params(Params),
    /// Any other value, typically an object id.
    Value(Value),
}

impl CallArg {
    /// The mapping carried by this argument, or an empty one.
    #[must_use]
    pub fn into_params(self) -> Params {
        match self {
            Self::Params(params) => params,
            Self::Value(_) => Params::new(),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Self::Params(params) => Value::Object(params),
            Self::Value(value) => value,
        }
    }
}

impl From<Params> for CallArg {
    fn from(params: Params) -> Self {
        Self::Params(params)
    }
}

impl From<Value> for CallArg {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(params) => Self::Params(params),
            other => Self::Value(other),
        }
    }
}

impl From<&str> for CallArg {
    fn from(id: &str) -> Self {
        Self::Value(Value::String(id.to_string()))
    }
}

impl From<String> for CallArg {
    fn from(id: String) -> Self {
        Self::Value(Value::String(id))
    }
}

/// Fold positional arguments into one params mapping.
///
/// - no arguments: `{}`
/// - one mapping: that mapping
/// - one other value: `{"id": value}`
/// - two or more: the second argument if it is a mapping (else `{}`), with
///   `id` set to the first argument unless the first is null
#[must_use]
pub fn normalize_args(args: Vec<CallArg>) -> Params {
    let mut args = args.into_iter();
    let Some(first) = args.next() else {
        return Params::new();
    };
    match args.next() {
        None => match first {
            CallArg::Params(params) => params,
            CallArg::Value(id) => {
                let mut params = Params::new();
                params.insert("id".to_string(), id);
                params
            }
        },
        Some(second) => {
            let mut params = second.into_params();
            let id = first.into_value();
            if !id.is_null() {
                params.insert("id".to_string(), id);
            }
            params
        }
    }
}

/// A stand-in for one API sub-resource, e.g. `customers`.
pub struct ServiceProxy<'a, A: BillingApi + ?Sized> {
    api: &'a A,
    name: String,
}

impl<'a, A: BillingApi + ?Sized> ServiceProxy<'a, A> {
    /// Bind `name` to `api`.
    pub fn new(api: &'a A, name: impl Into<String>) -> Self {
        Self {
            api,
            name: name.into(),
        }
    }

    /// The service name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full method key for `operation` on this service.
    #[must_use]
    pub fn method_key(&self, operation: &str) -> MethodKey {
        MethodKey::new(&self.name, operation)
    }

    /// Call an arbitrary operation with positional arguments.
    ///
    /// # Errors
    ///
    /// Propagates the API's error, e.g. [`FakeError::NotRegistered`].
    pub fn call(&self, operation: &str, args: Vec<CallArg>) -> Result<FakeResponse, FakeError> {
        let params = normalize_args(args);
        self.dispatch(operation, params)
    }

    /// `create(params)`.
    ///
    /// # Errors
    ///
    /// Propagates the API's error.
    pub fn create(&self, params: impl Into<CallArg>) -> Result<FakeResponse, FakeError> {
        self.call("create", vec![params.into()])
    }

    /// `retrieve(id)`; records `{"id": id}`.
    ///
    /// # Errors
    ///
    /// Propagates the API's error.
    pub fn retrieve(&self, id: impl Into<CallArg>) -> Result<FakeResponse, FakeError> {
        self.call("retrieve", vec![id.into()])
    }

    /// `retrieve(id, params)`; records `params` with `id` merged in.
    ///
    /// # Errors
    ///
    /// Propagates the API's error.
    pub fn retrieve_with(
        &self,
        id: impl Into<CallArg>,
        params: impl Into<CallArg>,
    ) -> Result<FakeResponse, FakeError> {
        self.call("retrieve", vec![id.into(), params.into()])
    }

    /// `update(id, params)`; records `params` only. The id is not merged in.
    ///
    /// # Errors
    ///
    /// Propagates the API's error.
    pub fn update(
        &self,
        id: impl Into<CallArg>,
        params: impl Into<CallArg>,
    ) -> Result<FakeResponse, FakeError> {
        let id = id.into().into_value();
        debug!(service = %self.name, %id, "update");
        self.dispatch("update", params.into().into_params())
    }

    /// `delete(id)`; records `{"id": id}`.
    ///
    /// # Errors
    ///
    /// Propagates the API's error.
    pub fn delete(&self, id: impl Into<CallArg>) -> Result<FakeResponse, FakeError> {
        self.call("delete", vec![id.into()])
    }

    /// `search(params)`.
    ///
    /// # Errors
    ///
    /// Propagates the API's error.
    pub fn search(&self, params: impl Into<CallArg>) -> Result<FakeResponse, FakeError> {
        self.call("search", vec![params.into()])
    }

    /// `all(params)`.
    ///
    /// # Errors
    ///
    /// Propagates the API's error.
    pub fn all(&self, params: impl Into<CallArg>) -> Result<FakeResponse, FakeError> {
        self.call("all", vec![params.into()])
    }

    fn dispatch(&self, operation: &str, params: Params) -> Result<FakeResponse, FakeError> {
        let method = self.method_key(operation);
        self.api.call(method.as_str(), params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Echoes every call back and remembers what it saw.
    #[derive(Default)]
    struct EchoApi {
        seen: Mutex<Vec<(String, Params)>>,
    }

    impl BillingApi for EchoApi {
        fn call(&self, method: &str, params: Params) -> Result<FakeResponse, FakeError> {
            self.seen
                .lock()
                .unwrap()
                .push((method.to_string(), params.clone()));
            Ok(FakeResponse::Raw(Value::Object(params)))
        }
    }

    fn params(value: Value) -> Params {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn no_args_yields_empty_params() {
        assert!(normalize_args(vec![]).is_empty());
    }

    #[test]
    fn single_mapping_is_used_as_is() {
        let got = normalize_args(vec![json!({"email": "a@b.com"}).into()]);
        assert_eq!(got, params(json!({"email": "a@b.com"})));
    }

    #[test]
    fn single_scalar_becomes_id() {
        assert_eq!(
            normalize_args(vec!["cus_1".into()]),
            params(json!({"id": "cus_1"}))
        );
        assert_eq!(
            normalize_args(vec![json!(42).into()]),
            params(json!({"id": 42}))
        );
    }

    #[test]
    fn two_args_merge_id_over_mapping() {
        let got = normalize_args(vec![
            "cus_1".into(),
            json!({"id": "other", "expand": ["x"]}).into(),
        ]);
        assert_eq!(got, params(json!({"id": "cus_1", "expand": ["x"]})));
    }

    #[test]
    fn two_args_with_non_mapping_second_drop_it() {
        let got = normalize_args(vec!["cus_1".into(), "ignored".into()]);
        assert_eq!(got, params(json!({"id": "cus_1"})));
    }

    #[test]
    fn null_first_arg_does_not_inject_id() {
        let got = normalize_args(vec![Value::Null.into(), json!({"limit": 3}).into()]);
        assert_eq!(got, params(json!({"limit": 3})));
    }

    #[test]
    fn proxy_composes_method_keys() {
        let api = EchoApi::default();
        let customers = ServiceProxy::new(&api, "customers");
        customers.create(json!({"email": "a@b.com"})).unwrap();
        customers.retrieve("cus_1").unwrap();
        customers
            .retrieve_with("cus_1", json!({"expand": ["sources"]}))
            .unwrap();
        customers.update("cus_1", json!({"name": "X"})).unwrap();
        customers.delete("cus_1").unwrap();
        customers
            .search(json!({"query": "email:'a@b.com'"}))
            .unwrap();
        customers.all(json!({"limit": 10})).unwrap();
        customers
            .call(
                "createSource",
                vec!["cus_1".into(), json!({"source": "tok_1"}).into()],
            )
            .unwrap();

        let seen = api.seen.lock().unwrap();
        let methods: Vec<&str> = seen.iter().map(|(m, _)| m.as_str()).collect();
        assert_eq!(
            methods,
            vec![
                "customers.create",
                "customers.retrieve",
                "customers.retrieve",
                "customers.update",
                "customers.delete",
                "customers.search",
                "customers.all",
                "customers.createSource",
            ]
        );
        assert_eq!(seen[1].1, params(json!({"id": "cus_1"})));
        assert_eq!(
            seen[2].1,
            params(json!({"id": "cus_1", "expand": ["sources"]}))
        );
        assert_eq!(seen[3].1, params(json!({"name": "X"})));
        assert_eq!(seen[4].1, params(json!({"id": "cus_1"})));
        assert_eq!(seen[7].1, params(json!({"id": "cus_1", "source": "tok_1"})));
    }

    #[test]
    fn proxy_works_over_trait_objects() {
        let api = EchoApi::default();
        let dyn_api: &dyn BillingApi = &api;
        let prices = ServiceProxy::new(dyn_api, "prices");
        assert_eq!(prices.name(), "prices");
        assert_eq!(prices.method_key("all").as_str(), "prices.all");
        prices.all(Params::new()).unwrap();
        assert_eq!(api.seen.lock().unwrap()[0].0, "prices.all");
    }
}
