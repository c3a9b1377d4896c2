// ABOUTME: Derives deterministic, filesystem-safe archive names for resolved entries.
// ABOUTME: Fans resolution results out into one archive plan per matched entry.

use crate::diagnostics::{Diagnostics, Warning};
use crate::inventory::{ImageEntry, VolumeEntry};
use crate::resolve::ResolutionResult;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Entries that can be written to an archive file.
pub trait ArchiveName {
    /// File name without the extension.
    fn archive_stem(&self) -> String;

    /// Reference handed to the engine's save primitive.
    fn save_target(&self) -> String;

    /// Human-facing name used in reports.
    fn source_name(&self) -> String {
        self.save_target()
    }
}

impl ArchiveName for ImageEntry {
    /// `{repository}_{tag}_{id12}` with `/` turned into `-`, or `{id12}` when untagged.
    fn archive_stem(&self) -> String {
        if self.is_tagged() {
            format!(
                "{}_{}_{}",
                self.repository.replace('/', "-"),
                self.tag,
                self.id.short()
            )
        } else {
            self.id.short().to_string()
        }
    }

    fn save_target(&self) -> String {
        self.reference()
    }
}

impl ArchiveName for VolumeEntry {
    fn archive_stem(&self) -> String {
        self.name.clone()
    }

    fn save_target(&self) -> String {
        self.name.clone()
    }
}

/// Full archive file name for an entry.
pub fn archive_file_name<E: ArchiveName>(entry: &E, extension: &str) -> String {
    format!(
        "{}.{}",
        entry.archive_stem(),
        extension.trim_start_matches('.')
    )
}

/// A resolved entry paired with where its archive goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchivePlan {
    pub source: String,
    pub target: String,
    pub file_name: String,
}

impl ArchivePlan {
    pub fn for_entry<E: ArchiveName>(entry: &E, extension: &str) -> Self {
        Self {
            source: entry.source_name(),
            target: entry.save_target(),
            file_name: archive_file_name(entry, extension),
        }
    }

    pub fn destination(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }
}

/// One plan per matched entry of every resolved request, in request order.
///
/// Repeated file names are kept (the later save overwrites the earlier one)
/// and recorded as warnings.
pub fn plan_archives<E: ArchiveName>(
    results: &[ResolutionResult<E>],
    extension: &str,
    diagnostics: &mut Diagnostics,
) -> Vec<ArchivePlan> {
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut plans = Vec::new();

    for entry in results
        .iter()
        .filter(|result| result.is_resolved())
        .flat_map(|result| result.matches.iter())
    {
        let plan = ArchivePlan::for_entry(entry, extension);

        if let Some(previous) = seen.get(&plan.file_name) {
            if *previous == plan.target {
                diagnostics.warn(Warning::duplicate_selection(&plan.source));
            } else {
                diagnostics.warn(Warning::name_collision(
                    &plan.file_name,
                    previous,
                    &plan.target,
                ));
            }
        } else {
            seen.insert(plan.file_name.clone(), plan.target.clone());
        }

        plans.push(plan);
    }

    plans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::WarningKind;
    use crate::resolve::ResolutionStatus;
    use crate::types::ImageId;
    use chrono::DateTime;

    fn image(repository: &str, tag: &str, id: &str) -> ImageEntry {
        ImageEntry {
            repository: repository.to_string(),
            tag: tag.to_string(),
            id: ImageId::new(id),
            created_at: DateTime::default(),
            size_bytes: 0,
        }
    }

    fn resolved(matches: Vec<ImageEntry>) -> ResolutionResult<ImageEntry> {
        ResolutionResult {
            request: "test".to_string(),
            status: ResolutionStatus::Resolved,
            matches,
        }
    }

    #[test]
    fn tagged_image_name() {
        let entry = image("library/nginx", "1.25", "abcdef1234567890abcdef");
        assert_eq!(
            archive_file_name(&entry, "tar"),
            "library-nginx_1.25_abcdef123456.tar"
        );
    }

    #[test]
    fn untagged_image_name() {
        let entry = image("", "", "abcdef1234567890abcdef");
        assert_eq!(archive_file_name(&entry, "tar"), "abcdef123456.tar");
        assert_eq!(entry.save_target(), "abcdef1234567890abcdef");
    }

    #[test]
    fn volume_name() {
        let entry = VolumeEntry {
            name: "pgdata".to_string(),
            driver: "local".to_string(),
            mountpoint: String::new(),
        };
        assert_eq!(archive_file_name(&entry, ".tar.gz"), "pgdata.tar.gz");
    }

    #[test]
    fn naming_is_deterministic() {
        let entry = image("registry.io/team/app", "v1", "0011223344556677");
        assert_eq!(
            archive_file_name(&entry, "tar"),
            archive_file_name(&entry, "tar")
        );
    }

    #[test]
    fn plans_follow_request_order_and_skip_unresolved() {
        let results = vec![
            resolved(vec![image("app", "v1", "1111aaaa2222"), image("app", "v2", "3333cccc4444")]),
            ResolutionResult {
                request: "missing".to_string(),
                status: ResolutionStatus::NoSuchEntity,
                matches: vec![],
            },
            resolved(vec![image("db", "16", "5555eeee6666")]),
        ];

        let mut diag = Diagnostics::default();
        let plans = plan_archives(&results, "tar", &mut diag);

        let targets: Vec<_> = plans.iter().map(|p| p.target.as_str()).collect();
        assert_eq!(targets, vec!["app:v1", "app:v2", "db:16"]);
        assert!(!diag.has_warnings());
    }

    #[test]
    fn repeated_selection_is_kept_and_warned() {
        let entry = image("app", "v1", "1111aaaa2222");
        let results = vec![resolved(vec![entry.clone()]), resolved(vec![entry])];

        let mut diag = Diagnostics::default();
        let plans = plan_archives(&results, "tar", &mut diag);

        assert_eq!(plans.len(), 2);
        assert_eq!(diag.warnings()[0].kind, WarningKind::DuplicateSelection);
    }

    #[test]
    fn colliding_names_are_warned() {
        let results = vec![resolved(vec![
            image("a/b", "1", "1111aaaa2222"),
            image("a-b", "1", "1111aaaa2222"),
        ])];

        let mut diag = Diagnostics::default();
        let plans = plan_archives(&results, "tar", &mut diag);

        assert_eq!(plans[0].file_name, plans[1].file_name);
        assert_eq!(diag.warnings()[0].kind, WarningKind::NameCollision);
    }

    #[test]
    fn destination_joins_directory() {
        let plan = ArchivePlan::for_entry(&image("app", "v1", "1111aaaa2222"), "tar");
        assert_eq!(
            plan.destination(Path::new("/backups")),
            PathBuf::from("/backups/app_v1_1111aaaa2222.tar")
        );
    }
}
