//! A call-recording fake of a Stripe-style billing API client.
//!
//! Register fixtures on a [`FakeClient`], hand it to the code under test as a
//! [`BillingApi`], then inspect what was called:
//!
//! ```
//! use serde_json::json;
//! use stripe_fake::{FakeClient, Params};
//!
//! let client = FakeClient::new();
//! client.fake("customers.*", json!({"id": "cus_1"}));
//!
//! client.customers().update("cus_1", json!({"name": "X"})).unwrap();
//!
//! let expected: Params = json!({"name": "X"}).as_object().cloned().unwrap();
//! client.assert_called_with("customers.update", &expected);
//! client.assert_not_called("customers.delete");
//! ```

pub mod assertions;
pub mod cassette;
pub mod cli;
pub mod client;
pub mod coercion;
pub mod commands;
pub mod config;
pub mod error;
pub mod fixture;
pub mod method_key;
pub mod ports;
pub mod service;

pub use client::FakeClient;
pub use coercion::{FakeResponse, RemoteObject};
pub use error::FakeError;
pub use fixture::{FixtureValue, Params};
pub use method_key::{MethodKey, StripeMethod};
pub use ports::BillingApi;
pub use service::{CallArg, ServiceProxy};

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}
