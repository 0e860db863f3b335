//! Command dispatch and handlers.

pub mod keys;
pub mod resolve;

use std::path::Path;

use crate::cli::Command;
use crate::client::FakeClient;
use crate::config::FakeConfig;

/// Dispatch a parsed command to its handler.
///
/// When `STRIPE_FAKE_RECORD` is set to a file path, the call log is written
/// there as a cassette once the command completes, even on error.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let flag = match command {
        Command::Resolve { fixtures, .. } | Command::Keys { fixtures } => fixtures.clone(),
    };
    dispatch_with_config(command, &FakeConfig::from_env().with_fixtures(flag))
}

/// Dispatch a command under an explicit configuration.
///
/// If both the command and the recording fail, both messages are returned.
///
/// # Errors
///
/// Returns an error string if loading fixtures, the command handler or
/// writing the recording fails.
pub fn dispatch_with_config(command: &Command, config: &FakeConfig) -> Result<(), String> {
    let client = FakeClient::from_config(config).map_err(|e| e.to_string())?;

    let result = dispatch_with_client(command, &client, config);

    let recorded = match &config.record {
        Some(path) => finish_recording(&client, path),
        None => Ok(()),
    };

    match (result, recorded) {
        (Err(command_err), Err(record_err)) => Err(format!("{command_err}\n{record_err}")),
        (result, recorded) => result.and(recorded),
    }
}

/// Dispatch a command against an already configured client.
fn dispatch_with_client(
    command: &Command,
    client: &FakeClient,
    config: &FakeConfig,
) -> Result<(), String> {
    match command {
        Command::Resolve { method, params, .. } => resolve::run(client, method, params.as_deref()),
        Command::Keys { .. } => keys::run(client, config.fixtures.is_some()),
    }
}

/// Write the client's call log and print where it went.
fn finish_recording(client: &FakeClient, path: &Path) -> Result<(), String> {
    client
        .cassette("stripe-fake-cli")
        .write(path)
        .map_err(|e| e.to_string())?;
    eprintln!("Recording saved to: {}", path.display());
    Ok(())
}
