//! Setup orchestration: copy shared components from the source project into
//! the destination project.

use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;
use uisync_io_fs::{
    CopyTreeError, EnumFileCopyStatus, ReportCopy, ReportCopyFiles, SpecCopyOptions,
    copy_named_files, copy_tree,
};

use crate::layout::{SpecLayout, SpecProjectPaths, join_relative};
use crate::message::{PrintMessage, Status};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("{name} not found at: {}", path.display())]
    SourceProjectMissing { name: String, path: PathBuf },
}

/// One recursive copy and its outcome.
#[derive(Debug)]
pub struct SpecTreeStep {
    /// Relative entry as written in the layout.
    pub label: String,
    pub path_src: PathBuf,
    pub path_dst: PathBuf,
    pub result: Result<ReportCopy, CopyTreeError>,
}

impl SpecTreeStep {
    fn run(
        label: String,
        path_src: PathBuf,
        path_dst: PathBuf,
        spec_cp_options: &SpecCopyOptions,
    ) -> Self {
        let result = copy_tree(&path_src, &path_dst, spec_cp_options.clone());
        if let Err(e) = &result {
            tracing::warn!("Copy of {label} failed: {e}");
        }
        Self {
            label,
            path_src,
            path_dst,
            result,
        }
    }
}

/// Everything a setup run did, in execution order.
#[derive(Debug)]
pub struct ReportSetup {
    pub paths: SpecProjectPaths,
    pub component_trees: Vec<SpecTreeStep>,
    pub component_files: ReportCopyFiles,
    pub asset_trees: Vec<SpecTreeStep>,
}

impl ReportSetup {
    /// Failed tree copies plus missing or failed named files.
    pub fn cnt_failed(&self) -> usize {
        let n_trees = self
            .component_trees
            .iter()
            .chain(&self.asset_trees)
            .filter(|step| step.result.is_err())
            .count();
        n_trees + self.component_files.cnt_failed()
    }

    pub fn has_failures(&self) -> bool {
        self.cnt_failed() > 0
    }
}

/// Copy the component trees, the component files and the asset trees.
///
/// Fails only when the source project itself is missing; in that case
/// nothing is copied. Every other failure is recorded in the report and the
/// remaining steps still run.
pub fn run_setup(
    layout: &SpecLayout,
    paths: &SpecProjectPaths,
    spec_cp_options: &SpecCopyOptions,
) -> Result<ReportSetup, SetupError> {
    if !paths.source_dir.exists() {
        return Err(SetupError::SourceProjectMissing {
            name: layout.source_project.clone(),
            path: paths.source_dir.clone(),
        });
    }

    let path_components_src = join_relative(&paths.source_dir, &layout.component_dir);
    let path_components_dst = join_relative(&paths.destination_dir, &layout.component_dir);

    let component_trees = layout
        .component_trees
        .iter()
        .map(|rel| {
            SpecTreeStep::run(
                format!("{}/{rel}", layout.component_dir),
                join_relative(&path_components_src, rel),
                join_relative(&path_components_dst, rel),
                spec_cp_options,
            )
        })
        .collect();

    let component_files = copy_named_files(
        &path_components_src,
        &path_components_dst,
        &layout.component_files,
        spec_cp_options,
    );

    let asset_trees = layout
        .asset_trees
        .iter()
        .map(|rel| {
            SpecTreeStep::run(
                rel.clone(),
                join_relative(&paths.source_dir, rel),
                join_relative(&paths.destination_dir, rel),
                spec_cp_options,
            )
        })
        .collect();

    let report = ReportSetup {
        paths: paths.clone(),
        component_trees,
        component_files,
        asset_trees,
    };
    tracing::info!(
        "Setup finished for {} ({} failed steps)",
        paths.destination_dir.display(),
        report.cnt_failed()
    );
    Ok(report)
}

////////////////////////////////////////////////////////////////////////////////
// #region Printing

pub fn print_header<W: Write>(
    pm: &mut PrintMessage<W>,
    layout: &SpecLayout,
    paths: &SpecProjectPaths,
) -> io::Result<()> {
    pm.blank()?;
    pm.heading(format!("Setting up {}...", layout.destination_project))?;
    pm.blank()?;
    pm.line(format!("Solution Root: {}", paths.solution_root.display()))?;
    pm.line(format!(
        "{} Project: {}",
        layout.source_project,
        paths.source_dir.display()
    ))?;
    pm.line(format!(
        "{} Project: {}",
        layout.destination_project,
        paths.destination_dir.display()
    ))?;
    pm.blank()
}

pub fn print_fatal<W: Write>(pm: &mut PrintMessage<W>, err: &SetupError) -> io::Result<()> {
    pm.status(Status::Error, err)
}

fn print_tree_steps<W: Write>(pm: &mut PrintMessage<W>, steps: &[SpecTreeStep]) -> io::Result<()> {
    for step in steps {
        match &step.result {
            Ok(report) if report.if_dry_run => pm.status(
                Status::Skip,
                format!(
                    "Would copy {} ({} files)",
                    step.label, report.cnt_skipped
                ),
            )?,
            Ok(report) => pm.status(
                Status::Ok,
                format!("Copied {} ({} files)", report.name, report.cnt_copied),
            )?,
            Err(e) => pm.status(Status::Error, e)?,
        }
    }
    Ok(())
}

impl ReportSetup {
    pub fn print<W: Write>(&self, pm: &mut PrintMessage<W>, layout: &SpecLayout) -> io::Result<()> {
        pm.line("Copying components...")?;
        print_tree_steps(pm, &self.component_trees)?;

        pm.line("Copying component files...")?;
        for outcome in &self.component_files.outcomes {
            match &outcome.status {
                EnumFileCopyStatus::Copied if self.component_files.if_dry_run => {
                    pm.status(Status::Skip, format!("Would copy {}", outcome.name))?
                }
                EnumFileCopyStatus::Copied => {
                    pm.status(Status::Ok, format!("Copied {}", outcome.name))?
                }
                EnumFileCopyStatus::Missing => {
                    pm.status(Status::Error, format!("File not found: {}", outcome.name))?
                }
                EnumFileCopyStatus::Failed(msg) => pm.status(
                    Status::Error,
                    format!("Failed to copy {}: {msg}", outcome.name),
                )?,
            }
        }

        for step in &self.asset_trees {
            pm.line(format!("Copying {}...", step.label))?;
            print_tree_steps(pm, std::slice::from_ref(step))?;
        }

        pm.blank()?;
        if self.has_failures() {
            pm.heading(format!(
                "Setup complete with {} failed step(s).",
                self.cnt_failed()
            ))?;
        } else {
            pm.heading("Setup complete!")?;
        }
        pm.blank()?;
        pm.line("Next steps:")?;
        for (i, cmd) in layout.next_steps.iter().enumerate() {
            pm.line(format!("{}. {cmd}", i + 1))?;
        }
        pm.blank()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;
    use uisync_io_fs::{EnumFileCopyStatus, SpecCopyOptions};

    use super::{SetupError, run_setup};
    use crate::layout::SpecLayout;
    use crate::message::PrintMessage;

    fn write_text(path: &Path, txt: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, txt).unwrap();
    }

    #[test]
    fn missing_source_project_is_fatal_and_copies_nothing() {
        let tmp = TempDir::new().unwrap();
        let layout = SpecLayout::default();
        let paths = layout.resolve(tmp.path());

        let err = run_setup(&layout, &paths, &SpecCopyOptions::default()).unwrap_err();
        assert!(matches!(err, SetupError::SourceProjectMissing { .. }));
        assert!(err.to_string().starts_with("MCBDS.PublicUI not found at:"));
        assert!(!paths.destination_dir.exists());
    }

    #[test]
    fn failed_steps_do_not_stop_later_steps() {
        let tmp = TempDir::new().unwrap();
        let layout = SpecLayout::default();
        let paths = layout.resolve(tmp.path());
        // Only wwwroot/lib and one component file exist in the source.
        write_text(&paths.source_dir.join("wwwroot/lib/site.js"), "js");
        write_text(
            &paths.source_dir.join("Components/ServerSwitcher.razor"),
            "razor",
        );

        let report = run_setup(&layout, &paths, &SpecCopyOptions::default()).unwrap();
        assert!(report.component_trees.iter().all(|s| s.result.is_err()));
        assert_eq!(
            report.component_files.outcomes[0].status,
            EnumFileCopyStatus::Copied
        );
        assert_eq!(
            report.component_files.outcomes[1].status,
            EnumFileCopyStatus::Missing
        );
        assert!(report.asset_trees[0].result.is_ok());
        assert!(paths.destination_dir.join("wwwroot/lib/site.js").is_file());
        assert_eq!(report.cnt_failed(), 3);
    }

    #[test]
    fn print_lists_steps_and_failure_summary() {
        let tmp = TempDir::new().unwrap();
        let layout = SpecLayout::default();
        let paths = layout.resolve(tmp.path());
        write_text(&paths.source_dir.join("Components/Layout/MainLayout.razor"), "m");

        let report = run_setup(&layout, &paths, &SpecCopyOptions::default()).unwrap();
        let mut pm = PrintMessage::plain(Vec::new());
        report.print(&mut pm, &layout).unwrap();
        let txt = String::from_utf8(pm.into_inner()).unwrap();

        assert!(txt.contains("[OK] Copied Layout (1 files)"));
        assert!(txt.contains("[ERROR] Source not found:"));
        assert!(txt.contains("[ERROR] File not found: ServerSwitcher.razor.css"));
        assert!(txt.contains("Copying wwwroot/lib..."));
        assert!(txt.contains("failed step(s)"));
        assert!(txt.contains("1. dotnet build"));
    }
}
