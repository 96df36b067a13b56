//! Copy report models and mutable report builder.

use std::fmt;

use crate::spec::EnumFileCopyStatus;

/// Aggregate counters and diagnostics for one `copy_tree` run.
#[derive(Debug, Default, Clone)]
pub struct ReportCopy {
    /// Final component of the source directory.
    pub name: String,
    /// Total scanned directory/file entries.
    pub cnt_scanned: u64,
    /// Number of regular files successfully written.
    pub cnt_copied: u64,
    /// Number of destination directories created.
    pub cnt_dirs_created: u64,
    /// Number of entries skipped (directory or broken symlinks, special files, dry-run).
    pub cnt_skipped: u64,
    /// Non-fatal warnings collected during traversal.
    pub warnings: Vec<String>,
    /// Whether the run was a dry run.
    pub if_dry_run: bool,
}

impl ReportCopy {
    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} {} scanned={} copied={} dirs={} skipped={} warnings={}",
            self.name,
            self.cnt_scanned,
            self.cnt_copied,
            self.cnt_dirs_created,
            self.cnt_skipped,
            self.warning_count()
        )
    }
}

impl fmt::Display for ReportCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.if_dry_run { "[DRY-RUN]" } else { "[COPY]" };
        write!(f, "{}", self.format(prefix))
    }
}

/// Mutable accumulator for copy statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportCopyBuilder {
    /// See [`ReportCopy::name`].
    pub name: String,
    /// See [`ReportCopy::cnt_scanned`].
    pub cnt_scanned: u64,
    /// See [`ReportCopy::cnt_copied`].
    pub cnt_copied: u64,
    /// See [`ReportCopy::cnt_dirs_created`].
    pub cnt_dirs_created: u64,
    /// See [`ReportCopy::cnt_skipped`].
    pub cnt_skipped: u64,
    /// See [`ReportCopy::warnings`].
    pub warnings: Vec<String>,
    /// See [`ReportCopy::if_dry_run`].
    pub if_dry_run: bool,
}

impl ReportCopyBuilder {
    pub fn new(name: String, if_dry_run: bool) -> Self {
        Self {
            name,
            if_dry_run,
            ..Self::default()
        }
    }

    pub fn add_scanned(&mut self) {
        self.cnt_scanned += 1;
    }

    pub fn add_copied(&mut self) {
        self.cnt_copied += 1;
    }

    pub fn add_dir_created(&mut self) {
        self.cnt_dirs_created += 1;
    }

    pub fn add_skipped(&mut self) {
        self.cnt_skipped += 1;
    }

    /// Add warning message and mirror it to the log.
    pub fn add_warning(&mut self, warning: String) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportCopy {
        ReportCopy {
            name: self.name,
            cnt_scanned: self.cnt_scanned,
            cnt_copied: self.cnt_copied,
            cnt_dirs_created: self.cnt_dirs_created,
            cnt_skipped: self.cnt_skipped,
            warnings: self.warnings,
            if_dry_run: self.if_dry_run,
        }
    }
}

/// Outcome for one entry of a `copy_named_files` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFileOutcome {
    /// File name as requested.
    pub name: String,
    pub status: EnumFileCopyStatus,
}

/// Per-name results of `copy_named_files`, in request order.
#[derive(Debug, Default, Clone)]
pub struct ReportCopyFiles {
    pub outcomes: Vec<SpecFileOutcome>,
    pub if_dry_run: bool,
}

impl ReportCopyFiles {
    pub fn cnt_copied(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_copied()).count()
    }

    pub fn cnt_failed(&self) -> usize {
        self.outcomes.len() - self.cnt_copied()
    }

    pub fn has_failures(&self) -> bool {
        self.cnt_failed() > 0
    }
}
