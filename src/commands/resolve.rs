//! `stripe-fake resolve` command.

use crate::client::FakeClient;
use crate::error::FakeError;
use crate::fixture::Params;
use crate::method_key::MethodKey;

/// Execute the `resolve` command, printing the response as pretty JSON.
///
/// # Errors
///
/// Returns an error string if the params are invalid or no fixture matches.
pub fn run(client: &FakeClient, method: &str, params: Option<&str>) -> Result<(), String> {
    let output = render(client, method, params).map_err(|e| e.to_string())?;
    println!("{output}");
    Ok(())
}

/// Dispatch `method` with `params` and render the response.
///
/// # Errors
///
/// Returns [`FakeError::InvalidMethodKey`], [`FakeError::InvalidParams`] or
/// whatever the dispatch itself fails with. A response that cannot be
/// rendered is [`FakeError::Serialize`].
pub fn render(
    client: &FakeClient,
    method: &str,
    params: Option<&str>,
) -> Result<String, FakeError> {
    let method = MethodKey::parse(method)?;
    let params = parse_params(params)?;
    let response = client.resolve_fake(method, params)?;
    Ok(serde_json::to_string_pretty(&response)?)
}

/// Parse `--params`; absent means `{}`.
fn parse_params(raw: Option<&str>) -> Result<Params, FakeError> {
    let Some(raw) = raw else {
        return Ok(Params::new());
    };
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(params)) => Ok(params),
        Ok(other) => Err(FakeError::InvalidParams(format!(
            "expected a JSON object, got {other}"
        ))),
        Err(e) => Err(FakeError::InvalidParams(e.to_string())),
    }
}
