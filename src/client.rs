//! The fake billing API client.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;
use tracing::{debug, warn};

use crate::cassette::format::Cassette;
use crate::cassette::recorder::CallRecorder;
use crate::coercion::{coerce, FakeResponse};
use crate::config::FakeConfig;
use crate::error::{BoxError, FakeError};
use crate::fixture::file::FixtureFile;
use crate::fixture::{FixtureTable, FixtureValue, MatchKind, Params};
use crate::method_key::MethodKey;
use crate::ports::BillingApi;
use crate::service::ServiceProxy;

#[derive(Debug, Default)]
struct State {
    fixtures: FixtureTable,
    recorder: CallRecorder,
}

/// In-memory stand-in for a network-backed billing client.
///
/// Owns a fixture table and a call recorder behind one mutex. Every
/// dispatched call is recorded before lookup, so calls that fail to resolve
/// still show up in [`call_count`](Self::call_count).
///
/// ```
/// use serde_json::json;
/// use stripe_fake::FakeClient;
///
/// let client = FakeClient::new();
/// client.fake("customers.create", json!({"id": "cus_42"}));
///
/// let customer = client.customers().create(json!({"email": "a@b.com"})).unwrap();
/// assert_eq!(customer.id(), Some("cus_42"));
/// assert_eq!(customer.object_type(), Some("customer"));
/// assert_eq!(client.call_count("customers.create"), 1);
/// ```
#[derive(Default)]
pub struct FakeClient {
    state: Mutex<State>,
}

impl FakeClient {
    /// A client with no fixtures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A client preloaded with `fixtures`. Enum keys are normalized to strings.
    pub fn with_fixtures<I, K, V>(fixtures: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<MethodKey>,
        V: Into<FixtureValue>,
    {
        let table: FixtureTable = fixtures.into_iter().collect();
        Self {
            state: Mutex::new(State {
                fixtures: table,
                recorder: CallRecorder::new(),
            }),
        }
    }

    /// A client preloaded from the fixture file named in `config`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`FakeError::FixtureFile`] if the configured file cannot be loaded.
    pub fn from_config(config: &FakeConfig) -> Result<Self, FakeError> {
        let client = Self::new();
        if let Some(path) = &config.fixtures {
            client.load_fixtures(path)?;
        }
        Ok(client)
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("fake client lock poisoned")
    }

    /// Register (or overwrite) the fixture for `method`.
    pub fn fake(&self, method: impl Into<MethodKey>, response: impl Into<FixtureValue>) -> &Self {
        let method = method.into();
        debug!(%method, "registering fake");
        self.state().fixtures.insert(method, response);
        self
    }

    /// Register a fixture computed from each call's params.
    pub fn fake_fn<F>(&self, method: impl Into<MethodKey>, f: F) -> &Self
    where
        F: Fn(&Params) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.fake(method, FixtureValue::dynamic(f))
    }

    /// Register several fixtures; later entries overwrite earlier ones.
    pub fn fake_many<I, K, V>(&self, fixtures: I) -> &Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<MethodKey>,
        V: Into<FixtureValue>,
    {
        self.state().fixtures.extend(fixtures);
        self
    }

    /// Merge the fixtures of a YAML fixture file into this client.
    ///
    /// # Errors
    ///
    /// Returns [`FakeError::FixtureFile`] if the file cannot be loaded.
    pub fn load_fixtures(&self, path: &Path) -> Result<&Self, FakeError> {
        let table = FixtureFile::load_table(path)?;
        debug!(path = %path.display(), count = table.len(), "loaded fixture file");
        self.state().fixtures.merge(table);
        Ok(self)
    }

    /// True when a fixture (exact or wildcard) would serve `method`.
    #[must_use]
    pub fn has_fake(&self, method: &str) -> bool {
        self.state().fixtures.find(method).is_some()
    }

    /// Registered fixture keys, in table order.
    #[must_use]
    pub fn fixture_keys(&self) -> Vec<String> {
        self.state().fixtures.keys().map(str::to_string).collect()
    }

    /// Record the call, then serve it from the fixture table.
    ///
    /// Lookup tries the exact key first, then wildcard keys in table order.
    /// A dynamic fixture is evaluated without holding the client lock, so it
    /// may itself call back into the client.
    ///
    /// # Errors
    ///
    /// Returns [`FakeError::NotRegistered`] when nothing matches, or
    /// [`FakeError::Fixture`] carrying a dynamic fixture's own error.
    pub fn resolve_fake(
        &self,
        method: impl Into<MethodKey>,
        params: Params,
    ) -> Result<FakeResponse, FakeError> {
        let method = method.into();
        let (seq, found) = {
            let mut state = self.state();
            let seq = state.recorder.record(method.as_str(), params.clone());
            let found = state
                .fixtures
                .find(method.as_str())
                .map(|r| (r.key.to_string(), r.kind, r.value.clone()));
            (seq, found)
        };

        let Some((key, kind, fixture)) = found else {
            let err = FakeError::not_registered(method.as_str());
            warn!(%method, "no fake registered");
            self.state().recorder.settle(seq, Err(&err));
            return Err(err);
        };

        match kind {
            MatchKind::Exact => debug!(%method, "resolved exact fake"),
            MatchKind::Wildcard => debug!(%method, pattern = %key, "resolved wildcard fake"),
        }

        match fixture.evaluate(&params) {
            Ok(value) => {
                let response = coerce(value);
                self.state()
                    .recorder
                    .settle::<FakeError>(seq, Ok(response.to_value()));
                Ok(response)
            }
            Err(err) => {
                self.state().recorder.settle(seq, Err(&err));
                Err(FakeError::Fixture(err))
            }
        }
    }

    /// True when `method` was dispatched at least once.
    #[must_use]
    pub fn was_called(&self, method: impl Into<MethodKey>) -> bool {
        self.call_count(method) > 0
    }

    /// Number of times `method` was dispatched.
    #[must_use]
    pub fn call_count(&self, method: impl Into<MethodKey>) -> usize {
        self.state().recorder.count(method.into().as_str())
    }

    /// Params of the `index`-th call to `method`; `None` when out of range.
    #[must_use]
    pub fn get_call(&self, method: impl Into<MethodKey>, index: usize) -> Option<Params> {
        self.state()
            .recorder
            .get(method.into().as_str(), index)
            .cloned()
    }

    /// Params of every call to `method`, in call order.
    #[must_use]
    pub fn calls(&self, method: impl Into<MethodKey>) -> Vec<Params> {
        self.state()
            .recorder
            .calls(method.into().as_str())
            .into_iter()
            .cloned()
            .collect()
    }

    /// The full call log: method key to ordered params.
    #[must_use]
    pub fn recorded(&self) -> BTreeMap<String, Vec<Params>> {
        self.state().recorder.recorded()
    }

    /// Forget every recorded call. Fixtures are kept.
    pub fn clear_recorded(&self) -> &Self {
        debug!("clearing recorded calls");
        self.state().recorder.clear();
        self
    }

    /// Snapshot the call log, with outcomes, as a cassette.
    #[must_use]
    pub fn cassette(&self, name: impl Into<String>) -> Cassette {
        self.state().recorder.cassette(name)
    }

    /// A proxy for the service called `name`. Any name is accepted; calls to
    /// services without fixtures fail when dispatched.
    pub fn service(&self, name: impl Into<String>) -> ServiceProxy<'_, Self> {
        ServiceProxy::new(self, name)
    }

    /// Shorthand for `service("customers")`.
    #[must_use]
    pub fn customers(&self) -> ServiceProxy<'_, Self> {
        self.service("customers")
    }

    /// Shorthand for `service("subscriptions")`.
    #[must_use]
    pub fn subscriptions(&self) -> ServiceProxy<'_, Self> {
        self.service("subscriptions")
    }

    /// Shorthand for `service("products")`.
    #[must_use]
    pub fn products(&self) -> ServiceProxy<'_, Self> {
        self.service("products")
    }

    /// Shorthand for `service("prices")`.
    #[must_use]
    pub fn prices(&self) -> ServiceProxy<'_, Self> {
        self.service("prices")
    }
}

impl BillingApi for FakeClient {
    fn call(&self, method: &str, params: Params) -> Result<FakeResponse, FakeError> {
        self.resolve_fake(method, params)
    }
}

impl fmt::Debug for FakeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.try_lock() {
            Ok(state) => f
                .debug_struct("FakeClient")
                .field("fixtures", &state.fixtures.keys().collect::<Vec<_>>())
                .field("calls", &state.recorder.interactions().len())
                .finish(),
            Err(_) => f.write_str("FakeClient { <locked> }"),
        }
    }
}
