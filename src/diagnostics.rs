// ABOUTME: Diagnostics accumulator for non-fatal warnings during a batch.
// ABOUTME: Collects warnings that shouldn't fail a save or load but should be shown to users.

/// Collects non-fatal warnings during archive operations.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during a batch.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Two plans in one batch share a destination file name.
    pub fn name_collision(file_name: &str, first: &str, second: &str) -> Self {
        Self {
            kind: WarningKind::NameCollision,
            message: format!("{second} overwrites archive {file_name} already planned for {first}"),
        }
    }

    /// Inventory entry selected more than once by different tokens.
    pub fn duplicate_selection(source: &str) -> Self {
        Self {
            kind: WarningKind::DuplicateSelection,
            message: format!("{source} was selected more than once"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Distinct entries derived the same archive file name.
    NameCollision,
    /// The same entry was selected again; its archive is written twice.
    DuplicateSelection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_starts_empty() {
        let diag = Diagnostics::default();
        assert!(!diag.has_warnings());
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn diagnostics_collects_warnings() {
        let mut diag = Diagnostics::default();

        diag.warn(Warning::name_collision("a.tar", "a:1", "b:1"));
        diag.warn(Warning::duplicate_selection("a:1"));

        assert!(diag.has_warnings());
        assert_eq!(diag.warnings().len(), 2);
    }

    #[test]
    fn warning_constructors_set_correct_kind() {
        let collision = Warning::name_collision("x.tar", "x:1", "y:1");
        assert_eq!(collision.kind, WarningKind::NameCollision);
        assert!(collision.message.contains("x.tar"));

        let duplicate = Warning::duplicate_selection("x:1");
        assert_eq!(duplicate.kind, WarningKind::DuplicateSelection);
    }
}
