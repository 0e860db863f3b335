//! `stripe-fake keys` command.

use crate::client::FakeClient;

/// Execute the `keys` command.
///
/// # Errors
///
/// Returns an error string if no fixture file was configured.
pub fn run(client: &FakeClient, configured: bool) -> Result<(), String> {
    if !configured {
        return Err(
            "No fixture file: pass --fixtures <FILE> or set STRIPE_FAKE_FIXTURES".to_string(),
        );
    }
    println!("{}", render(client));
    Ok(())
}

/// One line per fixture key, wildcard keys marked.
#[must_use]
pub fn render(client: &FakeClient) -> String {
    let keys = client.fixture_keys();
    if keys.is_empty() {
        return "No fixtures registered.".to_string();
    }
    keys.iter()
        .map(|key| {
            if key.contains('*') {
                format!("{key}  (wildcard)")
            } else {
                key.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
