//! Method keys of the form `<service>.<operation>`.
//!
//! Internally every key is a plain `String`. [`MethodKey`] is the boundary
//! type: anything convertible into it (string slices, owned strings, or a
//! [`StripeMethod`] variant) can be used to register or inspect fixtures.

use std::fmt;

use crate::error::FakeError;

/// A normalized method key such as `"customers.create"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodKey(String);

impl MethodKey {
    /// Build a key from a service name and an operation name.
    #[must_use]
    pub fn new(service: &str, operation: &str) -> Self {
        Self(format!("{service}.{operation}"))
    }

    /// Parse a key, requiring a non-empty service and operation.
    ///
    /// # Errors
    ///
    /// Returns [`FakeError::InvalidMethodKey`] when the dot separator or
    /// either side of it is missing.
    pub fn parse(raw: &str) -> Result<Self, FakeError> {
        match raw.split_once('.') {
            Some((service, operation)) if !service.is_empty() && !operation.is_empty() => {
                Ok(Self(raw.to_string()))
            }
            _ => Err(FakeError::InvalidMethodKey(raw.to_string())),
        }
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The service segment (before the first dot).
    #[must_use]
    pub fn service(&self) -> &str {
        self.0
            .split_once('.')
            .map_or(self.0.as_str(), |(service, _)| service)
    }

    /// The operation segment (after the first dot), empty if there is none.
    #[must_use]
    pub fn operation(&self) -> &str {
        self.0
            .split_once('.')
            .map_or("", |(_, operation)| operation)
    }

    /// True when the key contains a `*` wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.0.contains('*')
    }

    /// Consume the key, returning the underlying string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MethodKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for MethodKey {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&String> for MethodKey {
    fn from(raw: &String) -> Self {
        Self(raw.clone())
    }
}

impl From<&MethodKey> for MethodKey {
    fn from(key: &MethodKey) -> Self {
        key.clone()
    }
}

impl From<StripeMethod> for MethodKey {
    fn from(method: StripeMethod) -> Self {
        Self(method.as_str().to_string())
    }
}

/// Commonly faked billing API methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StripeMethod {
    /// `customers.create`
    CustomersCreate,
    /// `customers.retrieve`
    CustomersRetrieve,
    /// `customers.update`
    CustomersUpdate,
    /// `customers.delete`
    CustomersDelete,
    /// `customers.all`
    CustomersAll,
    /// `customers.search`
    CustomersSearch,
    /// `subscriptions.create`
    SubscriptionsCreate,
    /// `subscriptions.retrieve`
    SubscriptionsRetrieve,
    /// `subscriptions.update`
    SubscriptionsUpdate,
    /// `subscriptions.cancel`
    SubscriptionsCancel,
    /// `subscriptions.all`
    SubscriptionsAll,
    /// `products.create`
    ProductsCreate,
    /// `products.retrieve`
    ProductsRetrieve,
    /// `products.all`
    ProductsAll,
    /// `prices.create`
    PricesCreate,
    /// `prices.retrieve`
    PricesRetrieve,
    /// `prices.all`
    PricesAll,
    /// `invoices.create`
    InvoicesCreate,
    /// `invoices.retrieve`
    InvoicesRetrieve,
    /// `invoices.pay`
    InvoicesPay,
    /// `refunds.create`
    RefundsCreate,
    /// `tokens.create`
    TokensCreate,
}

impl StripeMethod {
    /// The method key string for this variant.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CustomersCreate => "customers.create",
            Self::CustomersRetrieve => "customers.retrieve",
            Self::CustomersUpdate => "customers.update",
            Self::CustomersDelete => "customers.delete",
            Self::CustomersAll => "customers.all",
            Self::CustomersSearch => "customers.search",
            Self::SubscriptionsCreate => "subscriptions.create",
            Self::SubscriptionsRetrieve => "subscriptions.retrieve",
            Self::SubscriptionsUpdate => "subscriptions.update",
            Self::SubscriptionsCancel => "subscriptions.cancel",
            Self::SubscriptionsAll => "subscriptions.all",
            Self::ProductsCreate => "products.create",
            Self::ProductsRetrieve => "products.retrieve",
            Self::ProductsAll => "products.all",
            Self::PricesCreate => "prices.create",
            Self::PricesRetrieve => "prices.retrieve",
            Self::PricesAll => "prices.all",
            Self::InvoicesCreate => "invoices.create",
            Self::InvoicesRetrieve => "invoices.retrieve",
            Self::InvoicesPay => "invoices.pay",
            Self::RefundsCreate => "refunds.create",
            Self::TokensCreate => "tokens.create",
        }
    }
}

impl fmt::Display for StripeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_service_and_operation() {
        let key = MethodKey::new("customers", "create");
        assert_eq!(key.as_str(), "customers.create");
        assert_eq!(key.service(), "customers");
        assert_eq!(key.operation(), "create");
        assert!(!key.is_wildcard());
    }

    #[test]
    fn nested_services_keep_the_rest_as_operation() {
        let key = MethodKey::from("financial_connections.sessions.create");
        assert_eq!(key.service(), "financial_connections");
        assert_eq!(key.operation(), "sessions.create");
    }

    #[test]
    fn enum_keys_normalize_to_strings() {
        let key: MethodKey = StripeMethod::CustomersCreate.into();
        assert_eq!(key, MethodKey::from("customers.create"));
    }

    #[test]
    fn parse_rejects_keys_without_operation() {
        assert!(MethodKey::parse("customers").is_err());
        assert!(MethodKey::parse("customers.").is_err());
        assert!(MethodKey::parse(".create").is_err());
        assert!(MethodKey::parse("customers.*").unwrap().is_wildcard());
    }
}
