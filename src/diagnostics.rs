// ABOUTME: Non-fatal findings gathered while an invocation runs.
// ABOUTME: Reported through Output once the run ends, whether it succeeded or not.

use crate::output::Output;

/// Warnings raised by one invocation, in the order they occurred.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Keep `warning` for the final report. It is also traced immediately so it
    /// shows up in verbose logs next to the step that raised it.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(kind = ?warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Hand every warning to `output`.
    pub fn report(&self, output: &Output) {
        for warning in &self.warnings {
            output.warning(&warning.message);
        }
    }
}

#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// More than one deployment is inactive; the last listed one was picked as staging.
    pub fn ambiguous_staging(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::AmbiguousStaging,
            message: message.into(),
        }
    }

    /// The temporary `.tar.gz` built from a source directory was not removed.
    pub fn archive_cleanup(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::ArchiveCleanup,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    AmbiguousStaging,
    ArchiveCleanup,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputMode;

    #[test]
    fn warnings_keep_insertion_order() {
        let mut diag = Diagnostics::default();
        assert!(diag.is_empty());

        diag.warn(Warning::ambiguous_staging("blue and green are both inactive"));
        diag.warn(Warning::archive_cleanup("scratch dir busy"));

        let kinds: Vec<_> = diag.warnings().iter().map(|w| w.kind).collect();
        assert_eq!(
            kinds,
            vec![WarningKind::AmbiguousStaging, WarningKind::ArchiveCleanup]
        );
    }

    #[test]
    fn report_on_empty_diagnostics_is_silent() {
        Diagnostics::default().report(&Output::new(OutputMode::Quiet));
    }
}
