//! Echo command - read values with the configured primitive and print them.

use mel_runtime::{ReadMode, Runtime, RuntimeConfig, RuntimeError};
use std::fs;
use std::path::Path;

/// Build the runtime configuration from an optional JSON file plus flags.
///
/// Flags override values from the file.
pub fn load_config(
    file: Option<&Path>,
    mode: Option<ReadMode>,
    prompt: Option<String>,
) -> miette::Result<RuntimeConfig> {
    let mut config = match file {
        Some(path) => {
            let source = fs::read_to_string(path)
                .map_err(|e| miette::miette!("Failed to read config {}: {}", path.display(), e))?;
            RuntimeConfig::from_json(&source)
                .map_err(|e| miette::miette!("Invalid config {}: {}", path.display(), e))?
        }
        None => RuntimeConfig::default(),
    };
    if let Some(mode) = mode {
        config.read_mode = mode;
    }
    if let Some(prompt) = prompt {
        config.prompt = prompt;
    }
    Ok(config)
}

pub fn run(config: RuntimeConfig) -> miette::Result<()> {
    let runtime = Runtime::stdio(config);
    let count = echo(&runtime)?;
    tracing::info!(count, "input exhausted");
    Ok(())
}

/// Print every value read until end of input. Returns the number echoed.
pub fn echo(runtime: &Runtime) -> miette::Result<usize> {
    let mut count = 0;
    loop {
        match runtime.read() {
            Ok(value) => {
                runtime
                    .println(value)
                    .map_err(|e| miette::miette!("{}", e))?;
                count += 1;
            }
            Err(RuntimeError::EndOfInput) => return Ok(count),
            Err(e) => return Err(miette::miette!("{}", e)),
        }
    }
}
