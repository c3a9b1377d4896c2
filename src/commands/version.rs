// ABOUTME: The `version` command.
// ABOUTME: Prints the program version with build metadata baked in at compile time.

use serde::Serialize;
use wocker::output::{Output, OutputMode};

const UNKNOWN: &str = "unknown";

#[derive(Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
    project: &'static str,
    git_hash: &'static str,
    build_time: &'static str,
    build_by: &'static str,
}

impl VersionInfo {
    fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            project: env!("CARGO_PKG_REPOSITORY"),
            git_hash: option_env!("WOCKER_GIT_HASH").unwrap_or(UNKNOWN),
            build_time: option_env!("WOCKER_BUILD_TIME").unwrap_or(UNKNOWN),
            build_by: option_env!("WOCKER_BUILD_BY").unwrap_or(UNKNOWN),
        }
    }
}

pub fn version(only: bool, output: &Output) {
    let info = VersionInfo::current();

    if only {
        output.line(info.version);
        return;
    }

    if output.mode() == OutputMode::Json {
        if let Ok(json) = serde_json::to_string(&info) {
            output.line(&json);
        }
        return;
    }

    output.line(&format!("{} {}", info.name, info.version));
    output.line(&format!("Project: {}", info.project));
    output.line(&format!("Build rev: {}", info.git_hash));
    output.line(&format!("Built on: {}", info.build_time));
    output.line(&format!("Built by: {}", info.build_by));
}
