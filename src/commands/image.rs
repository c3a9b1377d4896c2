// ABOUTME: The `image` command: list, save and load images.
// ABOUTME: Resolves requests against one inventory snapshot before saving.

use super::runtime_connection::connect_to_runtime;
use super::{
    Action, Messages, apply_overrides, finish, report_loads, report_saves, report_unresolved,
    report_warnings,
};
use crate::cli::ArchiveArgs;
use chrono::Local;
use nonempty::NonEmpty;
use std::path::PathBuf;
use wocker::archive::{ImageArchiver, load_batch, plan_archives, save_batch};
use wocker::config::Config;
use wocker::diagnostics::Diagnostics;
use wocker::error::Result;
use wocker::inventory::ImageEntry;
use wocker::output::{Output, human_size};
use wocker::resolve::resolve;
use wocker::runtime::{BollardRuntime, ImageOps};

const MESSAGES: Messages = Messages {
    no_such: "No such image",
};

/// Shown for an empty repository or tag.
const NONE: &str = "<none>";

pub async fn image(args: ArchiveArgs, config: Config, output: &mut Output) -> Result<()> {
    let action = Action::from_args(&args, "image")?;
    let config = apply_overrides(config, &args);
    let runtime = connect_to_runtime(&config, output).await?;

    output.start_timer();
    match action {
        Action::List => list(&runtime, output).await,
        Action::Save(requests) => save(&runtime, &requests, &config, output).await,
        Action::Load(files) => load(&runtime, &files, output).await,
    }
}

async fn list(runtime: &BollardRuntime, output: &Output) -> Result<()> {
    let images = runtime.list_images().await?;

    let rows: Vec<Vec<String>> = images.iter().map(row).collect();
    output.table(&["Repository", "Tag", "ID", "Created", "Size"], &rows, &images);
    Ok(())
}

fn row(entry: &ImageEntry) -> Vec<String> {
    let or_none = |value: &str| {
        if value.is_empty() {
            NONE.to_string()
        } else {
            value.to_string()
        }
    };

    vec![
        or_none(&entry.repository),
        or_none(&entry.tag),
        entry.id.short().to_string(),
        entry
            .created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        human_size(entry.size_bytes),
    ]
}

async fn save(
    runtime: &BollardRuntime,
    requests: &NonEmpty<String>,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let inventory = runtime.list_images().await?;
    let results = resolve(requests, &inventory);
    let unresolved = report_unresolved(&results, &MESSAGES, output);

    let mut diagnostics = Diagnostics::default();
    let plans = plan_archives(&results, &config.images.extension, &mut diagnostics);
    report_warnings(&diagnostics, output);

    let total = plans.len() + unresolved;
    let report = save_batch(
        &ImageArchiver::new(runtime),
        plans,
        &config.archive_dir,
        config.on_save_error,
    )
    .await;
    let failed = report_saves(&report, output) + unresolved;

    finish(
        failed,
        total,
        &format!(
            "Saved {} image archive(s) to {}",
            report.succeeded(),
            config.archive_dir.display()
        ),
        output,
    )
}

async fn load(runtime: &BollardRuntime, files: &NonEmpty<PathBuf>, output: &Output) -> Result<()> {
    let report = load_batch(&ImageArchiver::new(runtime), files).await;
    let failed = report_loads(&report, output);

    finish(
        failed,
        report.items.len(),
        &format!("Loaded {} image archive(s)", report.succeeded()),
        output,
    )
}
