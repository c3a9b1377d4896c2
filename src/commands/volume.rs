// ABOUTME: The `volume` command: list, save and load named volumes.
// ABOUTME: Volume contents move through tar in a short-lived helper container.

use super::runtime_connection::connect_to_runtime;
use super::{
    Action, Messages, apply_overrides, finish, report_loads, report_saves, report_unresolved,
    report_warnings,
};
use crate::cli::ArchiveArgs;
use nonempty::NonEmpty;
use std::path::PathBuf;
use wocker::archive::{VolumeArchiver, load_batch, plan_archives, save_batch};
use wocker::config::Config;
use wocker::diagnostics::Diagnostics;
use wocker::error::Result;
use wocker::output::Output;
use wocker::resolve::resolve;
use wocker::runtime::{BollardRuntime, VolumeOps};

const MESSAGES: Messages = Messages {
    no_such: "No such volume",
};

pub async fn volume(args: ArchiveArgs, config: Config, output: &mut Output) -> Result<()> {
    let action = Action::from_args(&args, "volume")?;
    let config = apply_overrides(config, &args);
    let runtime = connect_to_runtime(&config, output).await?;

    output.start_timer();
    match action {
        Action::List => list(&runtime, output).await,
        Action::Save(requests) => save(&runtime, &requests, &config, output).await,
        Action::Load(files) => load(&runtime, &files, &config, output).await,
    }
}

async fn list(runtime: &BollardRuntime, output: &Output) -> Result<()> {
    let volumes = runtime.list_volumes().await?;

    let rows: Vec<Vec<String>> = volumes
        .iter()
        .map(|v| vec![v.name.clone(), v.driver.clone(), v.mountpoint.clone()])
        .collect();
    output.table(&["Name", "Driver", "Mountpoint"], &rows, &volumes);
    Ok(())
}

fn archiver<'a>(runtime: &'a BollardRuntime, config: &Config) -> VolumeArchiver<'a, BollardRuntime> {
    VolumeArchiver::new(
        runtime,
        &config.volumes.helper_image,
        &config.volumes.extension,
    )
}

async fn save(
    runtime: &BollardRuntime,
    requests: &NonEmpty<String>,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let inventory = runtime.list_volumes().await?;
    let results = resolve(requests, &inventory);
    let unresolved = report_unresolved(&results, &MESSAGES, output);

    let mut diagnostics = Diagnostics::default();
    let plans = plan_archives(&results, &config.volumes.extension, &mut diagnostics);
    report_warnings(&diagnostics, output);

    let total = plans.len() + unresolved;
    let archiver = archiver(runtime, config);
    if !plans.is_empty() {
        archiver.prepare().await?;
    }

    let report = save_batch(&archiver, plans, &config.archive_dir, config.on_save_error).await;
    let failed = report_saves(&report, output) + unresolved;

    finish(
        failed,
        total,
        &format!(
            "Saved {} volume archive(s) to {}",
            report.succeeded(),
            config.archive_dir.display()
        ),
        output,
    )
}

async fn load(
    runtime: &BollardRuntime,
    files: &NonEmpty<PathBuf>,
    config: &Config,
    output: &Output,
) -> Result<()> {
    let archiver = archiver(runtime, config);
    archiver.prepare().await?;

    let report = load_batch(&archiver, files).await;
    let failed = report_loads(&report, output);

    finish(
        failed,
        report.items.len(),
        &format!("Loaded {} volume archive(s)", report.succeeded()),
        output,
    )
}
