//! Fixture values and the fixture table.

pub mod file;
pub mod wildcard;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::BoxError;
use crate::method_key::MethodKey;
use wildcard::WildcardPattern;

/// Parameters of a single call: a JSON object.
pub type Params = serde_json::Map<String, Value>;

/// A callable fixture computing its response from the call's params.
pub type DynamicFixture = Arc<dyn Fn(&Params) -> Result<Value, BoxError> + Send + Sync>;

/// A pre-registered response for a method key.
#[derive(Clone)]
pub enum FixtureValue {
    /// A fixed response, usually a JSON object.
    Static(Value),
    /// A response computed from the call's params.
    Dynamic(DynamicFixture),
}

impl FixtureValue {
    /// Wrap a closure as a dynamic fixture.
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&Params) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(f))
    }

    /// Evaluate the fixture against `params`.
    ///
    /// # Errors
    ///
    /// Returns whatever error a dynamic fixture produced.
    pub fn evaluate(&self, params: &Params) -> Result<Value, BoxError> {
        match self {
            Self::Static(value) => Ok(value.clone()),
            Self::Dynamic(f) => f(params),
        }
    }
}

impl fmt::Debug for FixtureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(<fn>)"),
        }
    }
}

impl From<Value> for FixtureValue {
    fn from(value: Value) -> Self {
        Self::Static(value)
    }
}

impl From<Params> for FixtureValue {
    fn from(map: Params) -> Self {
        Self::Static(Value::Object(map))
    }
}

#[derive(Debug, Clone)]
struct FixtureEntry {
    key: String,
    value: FixtureValue,
    pattern: Option<WildcardPattern>,
}

/// How a method key was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The fixture key equals the method key.
    Exact,
    /// The fixture key is a wildcard pattern matching the method key.
    Wildcard,
}

/// A fixture found for a method key.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    /// The fixture key that matched.
    pub key: &'a str,
    /// The registered value.
    pub value: &'a FixtureValue,
    /// Whether the match was exact or through a wildcard.
    pub kind: MatchKind,
}

/// Fixtures keyed by method key, in first-registration order.
///
/// Re-registering a key replaces its value in place, so wildcard precedence
/// is decided by when a key was first added.
#[derive(Debug, Clone, Default)]
pub struct FixtureTable {
    entries: Vec<FixtureEntry>,
}

impl FixtureTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or overwrite the fixture for `key`.
    pub fn insert(&mut self, key: impl Into<MethodKey>, value: impl Into<FixtureValue>) {
        let key = key.into().into_string();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.value = value;
            return;
        }
        let pattern = WildcardPattern::compile(&key);
        self.entries.push(FixtureEntry {
            key,
            value,
            pattern,
        });
    }

    /// Merge every fixture of `other` into this table; `other` wins on conflicts.
    pub fn merge(&mut self, other: FixtureTable) {
        for entry in other.entries {
            self.insert(entry.key, entry.value);
        }
    }

    /// The fixture registered under exactly `method`.
    #[must_use]
    pub fn get(&self, method: &str) -> Option<&FixtureValue> {
        self.entries
            .iter()
            .find(|e| e.key == method)
            .map(|e| &e.value)
    }

    /// Find a fixture for `method`: exact key first, then the first wildcard
    /// key (in table order) whose pattern matches.
    #[must_use]
    pub fn find(&self, method: &str) -> Option<Resolution<'_>> {
        if let Some(entry) = self.entries.iter().find(|e| e.key == method) {
            return Some(Resolution {
                key: &entry.key,
                value: &entry.value,
                kind: MatchKind::Exact,
            });
        }
        self.entries
            .iter()
            .find(|e| e.pattern.as_ref().is_some_and(|p| p.matches(method)))
            .map(|entry| Resolution {
                key: &entry.key,
                value: &entry.value,
                kind: MatchKind::Wildcard,
            })
    }

    /// All registered keys, in table order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Number of registered fixtures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no fixtures are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FixtureTable
where
    K: Into<MethodKey>,
    V: Into<FixtureValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl<K, V> Extend<(K, V)> for FixtureTable
where
    K: Into<MethodKey>,
    V: Into<FixtureValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method_key::StripeMethod;
    use serde_json::json;

    fn evaluate(resolution: Option<Resolution<'_>>) -> Value {
        resolution.unwrap().value.evaluate(&Params::new()).unwrap()
    }

    #[test]
    fn last_write_wins_for_the_same_key() {
        let mut table = FixtureTable::new();
        table.insert("customers.create", json!({"id": "cus_1"}));
        table.insert("customers.create", json!({"id": "cus_2"}));
        assert_eq!(table.len(), 1);
        assert_eq!(
            evaluate(table.find("customers.create")),
            json!({"id": "cus_2"})
        );
    }

    #[test]
    fn enum_keys_are_stored_as_strings() {
        let table: FixtureTable = [(StripeMethod::ProductsCreate, json!({"id": "prod_1"}))]
            .into_iter()
            .collect();
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["products.create"]);
        assert!(table.get("products.create").is_some());
    }

    #[test]
    fn exact_match_beats_earlier_wildcard() {
        let mut table = FixtureTable::new();
        table.insert("customers.*", json!({"id": "cus_any"}));
        table.insert("customers.create", json!({"id": "cus_exact"}));

        let exact = table.find("customers.create").unwrap();
        assert_eq!(exact.kind, MatchKind::Exact);
        assert_eq!(evaluate(Some(exact)), json!({"id": "cus_exact"}));

        let wild = table.find("customers.retrieve").unwrap();
        assert_eq!(wild.kind, MatchKind::Wildcard);
        assert_eq!(wild.key, "customers.*");
    }

    #[test]
    fn first_matching_wildcard_in_table_order_wins() {
        let mut table = FixtureTable::new();
        table.insert("*", json!({"which": "catch_all"}));
        table.insert("customers.*", json!({"which": "customers"}));
        assert_eq!(
            evaluate(table.find("customers.create")),
            json!({"which": "catch_all"})
        );

        // Overwriting keeps the original position.
        table.insert("*", json!({"which": "catch_all_v2"}));
        assert_eq!(
            evaluate(table.find("customers.create")),
            json!({"which": "catch_all_v2"})
        );
    }

    #[test]
    fn no_match_returns_none() {
        let mut table = FixtureTable::new();
        table.insert("customers.*", json!({}));
        assert!(table.find("products.create").is_none());
        assert!(FixtureTable::new().find("customers.create").is_none());
    }

    #[test]
    fn merge_overwrites_conflicting_keys() {
        let mut table = FixtureTable::new();
        table.insert("customers.create", json!({"id": "cus_old"}));
        let mut other = FixtureTable::new();
        other.insert("customers.create", json!({"id": "cus_new"}));
        other.insert("prices.create", json!({"id": "price_1"}));
        table.merge(other);
        assert_eq!(table.len(), 2);
        assert_eq!(
            evaluate(table.find("customers.create")),
            json!({"id": "cus_new"})
        );
    }

    #[test]
    fn dynamic_fixture_sees_params() {
        let fixture = FixtureValue::dynamic(|params| {
            Ok(json!({"id": "cus_1", "email": params.get("email").cloned()}))
        });
        let mut params = Params::new();
        params.insert("email".into(), json!("a@b.com"));
        assert_eq!(
            fixture.evaluate(&params).unwrap(),
            json!({"id": "cus_1", "email": "a@b.com"})
        );
        assert_eq!(format!("{fixture:?}"), "Dynamic(<fn>)");
    }
}
