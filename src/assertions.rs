//! Test assertions over a [`FakeClient`]'s call log.

use crate::client::FakeClient;
use crate::fixture::Params;
use crate::method_key::MethodKey;

impl FakeClient {
    /// Assert `method` was called at least once.
    ///
    /// # Panics
    ///
    /// Panics if `method` was never called.
    #[track_caller]
    pub fn assert_called(&self, method: impl Into<MethodKey>) {
        let method = method.into();
        assert!(
            self.was_called(&method),
            "Expected [{method}] to be called, but it was not. Recorded calls: [{}]",
            self.recorded()
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    /// Assert `method` was called exactly `times` times.
    ///
    /// # Panics
    ///
    /// Panics if the call count differs.
    #[track_caller]
    pub fn assert_called_times(&self, method: impl Into<MethodKey>, times: usize) {
        let method = method.into();
        let count = self.call_count(&method);
        assert_eq!(
            count, times,
            "Expected [{method}] to be called {times} time(s), but it was called {count} time(s)."
        );
    }

    /// Assert some call to `method` had exactly `params`.
    ///
    /// # Panics
    ///
    /// Panics if no recorded call to `method` matches.
    #[track_caller]
    pub fn assert_called_with(&self, method: impl Into<MethodKey>, params: &Params) {
        let method = method.into();
        let calls = self.calls(&method);
        assert!(
            calls.iter().any(|call| call == params),
            "Expected [{method}] to be called with {}, but recorded calls were {}",
            serde_json::Value::Object(params.clone()),
            serde_json::to_string(&calls).unwrap_or_default()
        );
    }

    /// Assert `method` was never called.
    ///
    /// # Panics
    ///
    /// Panics if `method` was called.
    #[track_caller]
    pub fn assert_not_called(&self, method: impl Into<MethodKey>) {
        let method = method.into();
        let count = self.call_count(&method);
        assert!(
            count == 0,
            "Expected [{method}] not to be called, but it was called {count} time(s)."
        );
    }
}
