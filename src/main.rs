//! llama-bridge: host harness for the Android llama bridge.
//!
//! Drives the same load → inference → free sequence the Java side performs,
//! without a JVM, so the bridge can be exercised from a desktop shell.

use clap::Parser;
use tracing::info;

use llama_android_bridge::config::{BridgeConfig, Cli};
use llama_android_bridge::inference::bridge::LlamaBridge;
use llama_android_bridge::logging;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Logging first, so config warnings are visible. RUST_LOG overrides.
    logging::init_host(if cli.verbose { "debug" } else { "info" });

    info!("llama-bridge v{}", env!("CARGO_PKG_VERSION"));

    let config = BridgeConfig::load(&cli.config)?;
    let bridge = LlamaBridge::from_config(&config);
    info!(backend = bridge.backend_name(), "Bridge ready");

    let handle = bridge.load_model(&cli.model.to_string_lossy())?;
    for prompt in &cli.prompt {
        let response = bridge.inference(handle, prompt)?;
        println!("{response}");
    }
    bridge.free_model(handle)?;

    if cli.stats {
        println!("{}", serde_json::to_string_pretty(&bridge.stats())?);
    }

    Ok(())
}
