// ABOUTME: Shared helper for connecting to the local container runtime.
// ABOUTME: Used by the image and volume commands once their operands are valid.

use wocker::config::Config;
use wocker::error::Result;
use wocker::output::Output;
use wocker::runtime::{BollardRuntime, RuntimeError, RuntimeInfoTrait, detect_local};

/// Connect to the container runtime on this host.
///
/// This handles the common pattern of:
/// 1. Detecting the runtime type and endpoint
/// 2. Outputting progress messages
/// 3. Establishing the connection and checking it answers
pub async fn connect_to_runtime(config: &Config, output: &Output) -> Result<BollardRuntime> {
    let runtime_info = detect_local(Some(&config.runtime)).map_err(RuntimeError::from)?;

    output.progress(&format!(
        "Using {} at {}",
        runtime_info.runtime_type, runtime_info.endpoint
    ));

    let runtime =
        BollardRuntime::connect(&runtime_info, config.connect_timeout).map_err(RuntimeError::from)?;
    runtime.ping().await.map_err(RuntimeError::from)?;

    Ok(runtime)
}
