//! Setup diagnostic: verify every expected path exists in the destination
//! project.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::layout::{SpecLayout, SpecProjectPaths, join_relative};
use crate::message::{PrintMessage, Status};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCheckEntry {
    /// Relative entry as written in the layout.
    pub name: String,
    pub path: PathBuf,
    pub if_present: bool,
}

#[derive(Debug, Clone)]
pub struct ReportCheck {
    pub paths: SpecProjectPaths,
    pub entries: Vec<SpecCheckEntry>,
}

impl ReportCheck {
    /// Names of absent entries, in layout order.
    pub fn missing(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| !entry.if_present)
            .map(|entry| entry.name.as_str())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|entry| entry.if_present)
    }
}

/// Check each expected entry under the destination project. Read-only.
pub fn check_layout(layout: &SpecLayout, paths: &SpecProjectPaths) -> ReportCheck {
    let entries = layout
        .expected
        .iter()
        .map(|name| {
            let path = join_relative(&paths.destination_dir, name);
            let if_present = path.exists();
            tracing::debug!("{name}: present={if_present}");
            SpecCheckEntry {
                name: name.clone(),
                path,
                if_present,
            }
        })
        .collect();

    let report = ReportCheck {
        paths: paths.clone(),
        entries,
    };
    if !report.is_complete() {
        tracing::info!("Missing entries: {:?}", report.missing());
    }
    report
}

impl ReportCheck {
    pub fn print<W: Write>(&self, pm: &mut PrintMessage<W>, layout: &SpecLayout) -> io::Result<()> {
        pm.blank()?;
        pm.rule('=')?;
        pm.heading(format!("{} - Setup Diagnostic", layout.destination_project))?;
        pm.rule('=')?;
        pm.blank()?;

        pm.line("Checking directories...")?;
        for (label, path) in [
            ("Solution Root", &self.paths.solution_root),
            (layout.destination_project.as_str(), &self.paths.destination_dir),
            (layout.source_project.as_str(), &self.paths.source_dir),
        ] {
            let status = if path.exists() {
                Status::Present
            } else {
                Status::Absent
            };
            pm.status(status, format!("{label}: {}", path.display()))?;
        }
        pm.blank()?;

        pm.line("Checking required components...")?;
        for entry in &self.entries {
            let status = if entry.if_present {
                Status::Present
            } else {
                Status::Absent
            };
            pm.status(status, &entry.name)?;
        }
        pm.blank()?;

        let missing = self.missing();
        if missing.is_empty() {
            pm.heading("SETUP COMPLETE")?;
            pm.blank()?;
            pm.line("All required components are in place.")?;
            pm.line(format!(
                "You can now build and run {}:",
                layout.destination_project
            ))?;
            pm.blank()?;
            for cmd in &layout.next_steps {
                pm.line(format!("  {cmd}"))?;
            }
            return pm.blank();
        }

        pm.heading("SETUP NOT COMPLETE")?;
        pm.blank()?;
        pm.line("Missing components:")?;
        for name in &missing {
            pm.line(format!("   - {name}"))?;
        }
        pm.blank()?;
        pm.line("SOLUTION:")?;
        pm.rule('-')?;
        pm.blank()?;
        pm.line("Option 1 (recommended): run the setup tool")?;
        pm.line(format!(
            "  uisync-setup --solution-root {}",
            self.paths.solution_root.display()
        ))?;
        pm.blank()?;
        pm.line("Option 2: copy the missing paths by hand")?;
        pm.line(format!(
            "  from {} into {}",
            self.paths.source_dir.display(),
            self.paths.destination_dir.display()
        ))?;
        pm.blank()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::check_layout;
    use crate::layout::{SpecLayout, join_relative};
    use crate::message::PrintMessage;

    #[test]
    fn absent_destination_reports_all_missing() {
        let tmp = TempDir::new().unwrap();
        let layout = SpecLayout::default();
        let paths = layout.resolve(tmp.path());

        let report = check_layout(&layout, &paths);
        assert!(!report.is_complete());
        let expected: Vec<&str> = layout.expected.iter().map(String::as_str).collect();
        assert_eq!(report.missing(), expected);

        let mut pm = PrintMessage::plain(Vec::new());
        report.print(&mut pm, &layout).unwrap();
        let txt = String::from_utf8(pm.into_inner()).unwrap();
        assert!(txt.contains("SETUP NOT COMPLETE"));
        for name in &layout.expected {
            assert!(txt.contains(&format!("   - {name}\n")), "{name}");
        }
    }

    #[test]
    fn single_missing_file_is_the_only_one_listed() {
        let tmp = TempDir::new().unwrap();
        let layout = SpecLayout::default();
        let paths = layout.resolve(tmp.path());
        for name in &layout.expected {
            let path = join_relative(&paths.destination_dir, name);
            if name.contains('.') {
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                fs::write(&path, "").unwrap();
            } else {
                fs::create_dir_all(&path).unwrap();
            }
        }
        fs::remove_file(paths.destination_dir.join("Components/Routes.razor")).unwrap();

        let report = check_layout(&layout, &paths);
        assert_eq!(report.missing(), vec!["Components/Routes.razor"]);
        assert!(!report.is_complete());
    }
}
