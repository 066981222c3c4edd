//! Info command - show runtime defaults.

use mel_runtime::RuntimeConfig;

pub(crate) fn run() -> miette::Result<()> {
    let config = RuntimeConfig::default();
    let json = serde_json::to_string_pretty(&config)
        .map_err(|e| miette::miette!("Failed to render config: {}", e))?;

    println!("MEL Runtime");
    println!("===========");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Read modes:");
    println!("  line         - read a full line as text");
    println!("  int          - print the prompt, read one integer token");
    println!();
    println!("Default configuration:");
    println!("{}", json);

    Ok(())
}
