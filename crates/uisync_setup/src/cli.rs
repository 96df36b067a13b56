use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser};
use uisync_io_fs::SpecCopyOptions;

use crate::{
    check::check_layout,
    layout::{SpecLayout, SpecProjectPaths, resolve_solution_root},
    message::PrintMessage,
    setup::{print_fatal, print_header, run_setup},
};

/// Options shared by both tools.
#[derive(Debug, Args)]
pub struct LayoutArgs {
    /// Directory holding both projects. Defaults to the parent of the
    /// directory containing this executable.
    #[arg(long, value_name = "DIR")]
    pub solution_root: Option<PathBuf>,
    /// TOML file overriding the default project layout.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Log more (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl LayoutArgs {
    pub fn load(&self) -> color_eyre::Result<(SpecLayout, SpecProjectPaths)> {
        let layout = SpecLayout::load(self.config.as_deref())?;
        let solution_root = resolve_solution_root(self.solution_root.as_deref())?;
        let paths = layout.resolve(solution_root);
        Ok((layout, paths))
    }
}

/// Copy shared UI components from the source project into the destination
/// project.
#[derive(Debug, Parser)]
#[command(name = "uisync-setup", version)]
pub struct SetupCli {
    #[command(flatten)]
    pub layout: LayoutArgs,
    /// Report what would be copied without writing anything.
    #[arg(long)]
    pub dry_run: bool,
    /// Exit with status 1 when any copy step fails.
    #[arg(long)]
    pub strict: bool,
    /// Worker threads for file copies inside one tree.
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,
}

impl SetupCli {
    pub fn run<W: Write>(self, pm: &mut PrintMessage<W>) -> color_eyre::Result<ExitCode> {
        let (layout, paths) = self.layout.load()?;
        print_header(pm, &layout, &paths)?;

        let spec_cp_options = SpecCopyOptions {
            num_workers_max: self.workers,
            if_dry_run: self.dry_run,
        };
        let report = match run_setup(&layout, &paths, &spec_cp_options) {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("{e}");
                print_fatal(pm, &e)?;
                return Ok(ExitCode::FAILURE);
            }
        };
        report.print(pm, &layout)?;

        if self.strict && report.has_failures() {
            return Ok(ExitCode::FAILURE);
        }
        Ok(ExitCode::SUCCESS)
    }
}

/// Check that the destination project has every expected component.
#[derive(Debug, Parser)]
#[command(name = "uisync-check", version)]
pub struct CheckCli {
    #[command(flatten)]
    pub layout: LayoutArgs,
}

impl CheckCli {
    pub fn run<W: Write>(self, pm: &mut PrintMessage<W>) -> color_eyre::Result<ExitCode> {
        let (layout, paths) = self.layout.load()?;
        let report = check_layout(&layout, &paths);
        report.print(pm, &layout)?;

        if report.is_complete() {
            Ok(ExitCode::SUCCESS)
        } else {
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{CheckCli, SetupCli};

    #[test]
    fn setup_flags_parse() {
        let cli = SetupCli::parse_from([
            "uisync-setup",
            "--solution-root",
            "/sln",
            "--dry-run",
            "--workers",
            "4",
            "-vv",
        ]);
        assert!(cli.dry_run);
        assert!(!cli.strict);
        assert_eq!(cli.workers, Some(4));
        assert_eq!(cli.layout.verbose, 2);
        assert_eq!(
            cli.layout.solution_root.as_deref(),
            Some(std::path::Path::new("/sln"))
        );
    }

    #[test]
    fn check_takes_no_required_arguments() {
        let cli = CheckCli::parse_from(["uisync-check"]);
        assert!(cli.layout.solution_root.is_none());
        assert!(cli.layout.config.is_none());
    }
}
