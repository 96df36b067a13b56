//! Project layout: which directories and files are shared, and where.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Failed to read layout config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid layout config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to locate the running executable: {0}")]
    CurrentExe(#[source] io::Error),
    #[error("Cannot derive a solution root from {}", .0.display())]
    NoSolutionRoot(PathBuf),
}

/// Relative names of everything the setup and check tools touch.
///
/// Entries use `/` as separator regardless of platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SpecLayout {
    /// Project copied from, relative to the solution root.
    pub source_project: String,
    /// Project copied into, relative to the solution root.
    pub destination_project: String,
    /// Components directory inside both projects.
    pub component_dir: String,
    /// Trees under `component_dir` copied recursively.
    pub component_trees: Vec<String>,
    /// Single files under `component_dir`.
    pub component_files: Vec<String>,
    /// Trees relative to the project root copied recursively.
    pub asset_trees: Vec<String>,
    /// Paths the checker expects in the destination project, in report order.
    pub expected: Vec<String>,
    /// Commands suggested once the destination project is complete.
    pub next_steps: Vec<String>,
}

impl Default for SpecLayout {
    fn default() -> Self {
        Self {
            source_project: "MCBDS.PublicUI".to_string(),
            destination_project: "MCBDS.PublicUI.Android".to_string(),
            component_dir: "Components".to_string(),
            component_trees: to_strings(&["Layout", "Pages"]),
            component_files: to_strings(&["ServerSwitcher.razor", "ServerSwitcher.razor.css"]),
            asset_trees: to_strings(&["wwwroot/lib"]),
            expected: to_strings(&[
                "Components/Layout",
                "Components/Pages",
                "Components/ServerSwitcher.razor",
                "Components/ServerSwitcher.razor.css",
                "Components/_Imports.razor",
                "Components/Routes.razor",
                "wwwroot/lib",
                "wwwroot/index.html",
                "wwwroot/app.css",
            ]),
            next_steps: to_strings(&[
                "dotnet build MCBDS.PublicUI.Android/MCBDS.PublicUI.Android.csproj -f net10.0-android",
                "dotnet run --project MCBDS.PublicUI.Android -f net10.0-android",
            ]),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl SpecLayout {
    /// Read a TOML layout file. Missing keys keep their defaults.
    pub fn parse(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LayoutError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| LayoutError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `parse` when a path is given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, LayoutError> {
        match path {
            Some(path) => Self::parse(path),
            None => Ok(Self::default()),
        }
    }

    pub fn resolve(&self, solution_root: impl Into<PathBuf>) -> SpecProjectPaths {
        let solution_root = solution_root.into();
        SpecProjectPaths {
            source_dir: join_relative(&solution_root, &self.source_project),
            destination_dir: join_relative(&solution_root, &self.destination_project),
            solution_root,
        }
    }
}

/// Absolute locations derived from a [`SpecLayout`] and a solution root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecProjectPaths {
    pub solution_root: PathBuf,
    pub source_dir: PathBuf,
    pub destination_dir: PathBuf,
}

/// Join a `/`-separated relative entry onto `base` one component at a time.
pub fn join_relative(base: &Path, rel: &str) -> PathBuf {
    rel.split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .fold(base.to_path_buf(), |acc, part| acc.join(part))
}

/// The solution root for a tool binary: the parent of the directory holding
/// the executable.
pub fn solution_root_from_exe(path_exe: &Path) -> Result<PathBuf, LayoutError> {
    path_exe
        .parent()
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .ok_or_else(|| LayoutError::NoSolutionRoot(path_exe.to_path_buf()))
}

/// Explicit root when given, otherwise derived from the running executable.
pub fn resolve_solution_root(explicit: Option<&Path>) -> Result<PathBuf, LayoutError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let path_exe = std::env::current_exe().map_err(LayoutError::CurrentExe)?;
    solution_root_from_exe(&path_exe)
}
