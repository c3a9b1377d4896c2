// ABOUTME: Drives one save or load per planned item and collects the outcomes.
// ABOUTME: Saves stop at the first failure unless told otherwise; loads never stop.

use super::error::ArchiveError;
use super::naming::ArchivePlan;
use crate::runtime::LoadOutcome;
use async_trait::async_trait;
use nonempty::NonEmpty;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Engine side of a save: write one entity to one file.
#[async_trait]
pub trait SaveCapable: Send + Sync {
    async fn save_entity(&self, target: &str, destination: &Path) -> Result<(), ArchiveError>;
}

/// Engine side of a load: read one archive file back in.
#[async_trait]
pub trait LoadCapable: Send + Sync {
    async fn load_entity(&self, source: &Path) -> Result<LoadOutcome, ArchiveError>;
}

/// What a save batch does after an item fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveFailurePolicy {
    /// Stop; the remaining plans are reported as not attempted.
    #[default]
    Abort,
    /// Keep saving the remaining plans.
    Continue,
}

#[derive(Debug)]
pub struct SavedItem {
    pub plan: ArchivePlan,
    pub destination: PathBuf,
    pub result: Result<(), ArchiveError>,
}

#[derive(Debug, Default)]
pub struct SaveReport {
    /// Attempted items, in plan order.
    pub items: Vec<SavedItem>,
    pub not_attempted: Vec<ArchivePlan>,
}

impl SaveReport {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.not_attempted.is_empty()
    }
}

/// Save every plan into `dir`, one at a time, in order.
pub async fn save_batch<S: SaveCapable + ?Sized>(
    engine: &S,
    plans: Vec<ArchivePlan>,
    dir: &Path,
    policy: SaveFailurePolicy,
) -> SaveReport {
    let mut report = SaveReport::default();
    let mut remaining = plans.into_iter();

    while let Some(plan) = remaining.next() {
        let destination = plan.destination(dir);
        tracing::info!(
            source = %plan.source,
            destination = %destination.display(),
            "saving"
        );

        let result = engine.save_entity(&plan.target, &destination).await;
        let failed = result.is_err();
        if let Err(ref e) = result {
            tracing::error!(source = %plan.source, "save failed: {}", e);
        }

        report.items.push(SavedItem {
            plan,
            destination,
            result,
        });

        if failed && policy == SaveFailurePolicy::Abort {
            report.not_attempted = remaining.collect();
            if !report.not_attempted.is_empty() {
                tracing::warn!(
                    skipped = report.not_attempted.len(),
                    "stopping save batch after failure"
                );
            }
            break;
        }
    }

    report
}

#[derive(Debug)]
pub struct LoadedItem {
    pub source: PathBuf,
    pub result: Result<LoadOutcome, ArchiveError>,
}

impl LoadedItem {
    /// Loaded when the engine call worked and reported something loaded.
    pub fn succeeded(&self) -> bool {
        matches!(&self.result, Ok(outcome) if outcome.loaded)
    }
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub items: Vec<LoadedItem>,
}

impl LoadReport {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.succeeded()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Load every file in order; a failed file never stops the next one.
pub async fn load_batch<L: LoadCapable + ?Sized>(
    engine: &L,
    files: &NonEmpty<PathBuf>,
) -> LoadReport {
    let mut report = LoadReport::default();

    for source in files.iter() {
        tracing::info!(source = %source.display(), "loading");

        let result = engine.load_entity(source).await;
        match &result {
            Ok(outcome) if !outcome.loaded => {
                tracing::error!(source = %source.display(), "engine loaded nothing")
            }
            Err(e) => tracing::error!(source = %source.display(), "load failed: {}", e),
            Ok(_) => {}
        }

        report.items.push(LoadedItem {
            source: source.clone(),
            result,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{ImageError, LoadMessage};
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Records every call and fails for the configured targets.
    #[derive(Default)]
    struct FakeEngine {
        failing: HashSet<String>,
        /// Sources whose load errors out before the engine answers.
        unreadable: HashSet<String>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeEngine {
        fn failing(targets: &[&str]) -> Self {
            Self {
                failing: targets.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            }
        }

        fn unreadable(sources: &[&str]) -> Self {
            Self {
                unreadable: sources.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SaveCapable for FakeEngine {
        async fn save_entity(&self, target: &str, _destination: &Path) -> Result<(), ArchiveError> {
            self.calls.lock().unwrap().push(target.to_string());
            if self.failing.contains(target) {
                return Err(ImageError::NotFound(target.to_string()).into());
            }
            Ok(())
        }
    }

    #[async_trait]
    impl LoadCapable for FakeEngine {
        async fn load_entity(&self, source: &Path) -> Result<LoadOutcome, ArchiveError> {
            let name = source.display().to_string();
            self.calls.lock().unwrap().push(name.clone());
            if self.unreadable.contains(&name) {
                return Err(ArchiveError::io(
                    source,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                ));
            }
            if self.failing.contains(&name) {
                return Ok(LoadOutcome::from_messages(vec![LoadMessage::Error(
                    "unexpected EOF".to_string(),
                )]));
            }
            Ok(LoadOutcome::from_messages(vec![LoadMessage::Stream(
                format!("Loaded image: {name}"),
            )]))
        }
    }

    fn plan(target: &str) -> ArchivePlan {
        ArchivePlan {
            source: target.to_string(),
            target: target.to_string(),
            file_name: format!("{}.tar", target.replace(':', "_")),
        }
    }

    fn plans(targets: &[&str]) -> Vec<ArchivePlan> {
        targets.iter().map(|t| plan(t)).collect()
    }

    #[tokio::test]
    async fn save_stops_at_first_failure() {
        let engine = FakeEngine::failing(&["b:1"]);

        let report = save_batch(
            &engine,
            plans(&["a:1", "b:1", "c:1"]),
            Path::new("/backups"),
            SaveFailurePolicy::Abort,
        )
        .await;

        assert_eq!(engine.calls(), vec!["a:1", "b:1"]);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.not_attempted, vec![plan("c:1")]);
        assert!(!report.is_success());
    }

    #[tokio::test]
    async fn save_can_continue_past_failures() {
        let engine = FakeEngine::failing(&["b:1"]);

        let report = save_batch(
            &engine,
            plans(&["a:1", "b:1", "c:1"]),
            Path::new("/backups"),
            SaveFailurePolicy::Continue,
        )
        .await;

        assert_eq!(engine.calls(), vec!["a:1", "b:1", "c:1"]);
        assert_eq!(report.succeeded(), 2);
        assert!(report.not_attempted.is_empty());
    }

    #[tokio::test]
    async fn save_reports_destinations() {
        let engine = FakeEngine::default();

        let report = save_batch(
            &engine,
            plans(&["app:v1", "app:v2"]),
            Path::new("/backups"),
            SaveFailurePolicy::Abort,
        )
        .await;

        assert!(report.is_success());
        assert_eq!(
            report.items[1].destination,
            PathBuf::from("/backups/app_v2.tar")
        );
    }

    #[tokio::test]
    async fn empty_plan_list_makes_no_calls() {
        let engine = FakeEngine::default();

        let report = save_batch(&engine, vec![], Path::new("."), SaveFailurePolicy::Abort).await;

        assert!(engine.calls().is_empty());
        assert!(report.items.is_empty());
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn load_continues_after_failure() {
        let engine = FakeEngine::failing(&["broken.tar"]);
        let files = NonEmpty::from_vec(vec![
            PathBuf::from("broken.tar"),
            PathBuf::from("good.tar"),
        ])
        .unwrap();

        let report = load_batch(&engine, &files).await;

        assert_eq!(engine.calls(), vec!["broken.tar", "good.tar"]);
        assert!(!report.items[0].succeeded());
        assert!(report.items[1].succeeded());
        assert_eq!(report.failed(), 1);
    }

    #[tokio::test]
    async fn load_continues_after_engine_error() {
        let engine = FakeEngine::unreadable(&["missing.tar"]);
        let files = NonEmpty::from_vec(vec![
            PathBuf::from("missing.tar"),
            PathBuf::from("good.tar"),
        ])
        .unwrap();

        let report = load_batch(&engine, &files).await;

        assert_eq!(engine.calls(), vec!["missing.tar", "good.tar"]);
        assert!(matches!(
            report.items[0].result,
            Err(ArchiveError::Io { .. })
        ));
        assert!(report.items[1].succeeded());
        assert_eq!(report.failed(), 1);
    }

    #[tokio::test]
    async fn load_keeps_engine_messages() {
        let engine = FakeEngine::default();
        let files = NonEmpty::new(PathBuf::from("app.tar"));

        let report = load_batch(&engine, &files).await;

        let outcome = report.items[0].result.as_ref().unwrap();
        assert_eq!(
            outcome.messages,
            vec![LoadMessage::Stream("Loaded image: app.tar".to_string())]
        );
    }

    #[test]
    fn policy_deserializes_from_config_words() {
        let policy: SaveFailurePolicy = serde_yaml::from_str("continue").unwrap();
        assert_eq!(policy, SaveFailurePolicy::Continue);
        assert_eq!(SaveFailurePolicy::default(), SaveFailurePolicy::Abort);
    }
}
