// ABOUTME: Command module aggregator for the wocker CLI.
// ABOUTME: Shared operand validation, overrides and batch reporting for image and volume.

mod image;
mod runtime_connection;
mod version;
mod volume;

pub use image::image;
pub use version::version;
pub use volume::volume;

use crate::cli::ArchiveArgs;
use nonempty::NonEmpty;
use std::path::PathBuf;
use wocker::archive::{LoadReport, SaveFailurePolicy, SaveReport, require_operands};
use wocker::config::Config;
use wocker::diagnostics::Diagnostics;
use wocker::error::{Error, Result};
use wocker::output::Output;
use wocker::resolve::{ResolutionResult, ResolutionStatus};
use wocker::runtime::LoadMessage;

/// What an `image` or `volume` invocation asked for, with operands checked.
enum Action {
    List,
    Save(NonEmpty<String>),
    Load(NonEmpty<PathBuf>),
}

impl Action {
    /// Validate operands before anything talks to the engine.
    fn from_args(args: &ArchiveArgs, what: &'static str) -> Result<Self> {
        if args.list {
            if !args.args.is_empty() {
                tracing::warn!(operands = args.args.len(), "--list ignores operands");
            }
            Ok(Action::List)
        } else if args.save {
            Ok(Action::Save(require_operands(args.args.clone(), what, "save")?))
        } else if args.load {
            let files = args.args.iter().map(PathBuf::from).collect();
            Ok(Action::Load(require_operands(files, what, "load")?))
        } else {
            Err(Error::NoAction(what))
        }
    }
}

/// Fold `--output` and `--keep-going` into the loaded config.
fn apply_overrides(mut config: Config, args: &ArchiveArgs) -> Config {
    if let Some(dir) = &args.output {
        config.archive_dir = dir.clone();
    }
    if args.keep_going {
        config.on_save_error = SaveFailurePolicy::Continue;
    }
    config
}

/// Wording for unresolved requests of one entity kind.
struct Messages {
    no_such: &'static str,
}

const REFERENCE_NOT_EXIST: &str = "Reference does not exist";

/// Report every request that selected nothing; returns how many there were.
fn report_unresolved<E>(
    results: &[ResolutionResult<E>],
    messages: &Messages,
    output: &Output,
) -> usize {
    let mut unresolved = 0;
    for result in results {
        let message = match result.status {
            ResolutionStatus::Resolved => continue,
            ResolutionStatus::NoSuchEntity => messages.no_such,
            ResolutionStatus::ReferenceNotExist => REFERENCE_NOT_EXIST,
        };
        tracing::error!(request = %result.request, "{}", message);
        output.item_failed(&result.request, message);
        unresolved += 1;
    }
    unresolved
}

fn report_warnings(diagnostics: &Diagnostics, output: &Output) {
    for warning in diagnostics.warnings() {
        output.warning(&warning.message);
    }
}

/// Print each saved item; returns the number of failed or skipped plans.
fn report_saves(report: &SaveReport, output: &Output) -> usize {
    for item in &report.items {
        match &item.result {
            Ok(()) => output.item_ok(
                &item.plan.source,
                &format!("{} -> {}", item.plan.source, item.destination.display()),
            ),
            Err(e) => output.item_failed(&item.plan.source, &e.to_string()),
        }
    }
    for plan in &report.not_attempted {
        output.item_failed(&plan.source, "not attempted after an earlier failure");
    }
    report.failed() + report.not_attempted.len()
}

/// Print each loaded file with the engine's messages; returns the failures.
fn report_loads(report: &LoadReport, output: &Output) -> usize {
    for item in &report.items {
        let source = item.source.display().to_string();
        match &item.result {
            Ok(outcome) => {
                for message in &outcome.messages {
                    match message {
                        LoadMessage::Stream(text) => output.item_ok(&source, text),
                        LoadMessage::Error(text) => output.item_failed(&source, text),
                    }
                }
                if !outcome.loaded && outcome.messages.is_empty() {
                    output.item_failed(&source, "nothing was loaded");
                }
            }
            Err(e) => output.item_failed(&source, &e.to_string()),
        }
    }
    report.failed()
}

/// Turn the failure count of one run into the command result.
fn finish(failed: usize, total: usize, summary: &str, output: &Output) -> Result<()> {
    if failed == 0 {
        output.success(summary);
        Ok(())
    } else {
        Err(Error::BatchFailed { failed, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: bool, save: bool, load: bool, operands: &[&str]) -> ArchiveArgs {
        ArchiveArgs {
            list,
            save,
            load,
            output: None,
            keep_going: false,
            args: operands.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn save_without_operands_is_usage_error() {
        let err = Action::from_args(&args(false, true, false, &[]), "image").err();
        assert!(matches!(err, Some(Error::Usage(_))));
    }

    #[test]
    fn operands_without_action_are_rejected() {
        let err = Action::from_args(&args(false, false, false, &["nginx"]), "image").err();
        assert!(matches!(err, Some(Error::NoAction("image"))));
    }

    #[test]
    fn load_operands_become_paths() {
        let action = Action::from_args(&args(false, false, true, &["a.tar", "b.tar"]), "image");
        match action {
            Ok(Action::Load(files)) => assert_eq!(files.len(), 2),
            _ => panic!("expected load action"),
        }
    }

    #[test]
    fn overrides_replace_config_values() {
        let mut cli = args(false, true, false, &["all"]);
        cli.output = Some(PathBuf::from("/backups"));
        cli.keep_going = true;

        let config = apply_overrides(Config::default(), &cli);

        assert_eq!(config.archive_dir, PathBuf::from("/backups"));
        assert_eq!(config.on_save_error, SaveFailurePolicy::Continue);
    }
}
