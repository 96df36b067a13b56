use std::fs;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tempfile::TempDir;
use uisync_setup::{CheckCli, PrintMessage, SetupCli, SpecLayout, check_layout};

fn write_text(path: &Path, txt: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, txt).unwrap();
}

fn is_success(code: ExitCode) -> bool {
    format!("{code:?}") == format!("{:?}", ExitCode::SUCCESS)
}

/// Source project with every shared component, destination with only the
/// files that are expected to pre-exist.
fn seed_solution(root: &Path) {
    let src = root.join("MCBDS.PublicUI");
    write_text(&src.join("Components/Layout/MainLayout.razor"), "layout");
    write_text(&src.join("Components/Layout/NavMenu.razor.css"), "nav");
    write_text(&src.join("Components/Pages/Home.razor"), "home");
    write_text(&src.join("Components/Pages/Admin/Backups.razor"), "backups");
    write_text(&src.join("Components/ServerSwitcher.razor"), "switcher");
    write_text(&src.join("Components/ServerSwitcher.razor.css"), ".switcher{}");
    write_text(&src.join("wwwroot/lib/bootstrap/bootstrap.min.css"), "bs");

    let dst = root.join("MCBDS.PublicUI.Android");
    write_text(&dst.join("Components/_Imports.razor"), "@using");
    write_text(&dst.join("Components/Routes.razor"), "<Router/>");
    write_text(&dst.join("wwwroot/index.html"), "<html/>");
    write_text(&dst.join("wwwroot/app.css"), "body{}");
}

fn run_check(root: &Path) -> (bool, String) {
    let root = root.to_string_lossy().to_string();
    let cli = CheckCli::parse_from(["uisync-check", "--solution-root", root.as_str()]);
    let mut pm = PrintMessage::plain(Vec::new());
    let code = cli.run(&mut pm).unwrap();
    (is_success(code), String::from_utf8(pm.into_inner()).unwrap())
}

fn run_setup_cli(root: &Path, extra: &[&str]) -> (bool, String) {
    let root = root.to_string_lossy().to_string();
    let mut args = vec!["uisync-setup", "--solution-root", root.as_str()];
    args.extend_from_slice(extra);
    let cli = SetupCli::parse_from(args);
    let mut pm = PrintMessage::plain(Vec::new());
    let code = cli.run(&mut pm).unwrap();
    (is_success(code), String::from_utf8(pm.into_inner()).unwrap())
}

#[test]
fn check_with_absent_destination_lists_all_nine() {
    let tmp = TempDir::new().unwrap();

    let (ok, txt) = run_check(tmp.path());
    assert!(!ok);
    assert!(txt.contains("SETUP NOT COMPLETE"));
    let layout = SpecLayout::default();
    assert_eq!(layout.expected.len(), 9);
    for name in &layout.expected {
        assert!(txt.contains(&format!("[✗] {name}")), "{name}");
        assert!(txt.contains(&format!("   - {name}")), "{name}");
    }
}

#[test]
fn setup_then_check_reports_complete() {
    let tmp = TempDir::new().unwrap();
    seed_solution(tmp.path());

    let (ok, txt) = run_setup_cli(tmp.path(), &[]);
    assert!(ok, "{txt}");
    assert!(txt.contains("Setup complete!"));

    let (ok, txt) = run_check(tmp.path());
    assert!(ok, "{txt}");
    assert!(txt.contains("SETUP COMPLETE"));
    assert!(!txt.contains("[✗] Components"));

    let dst = tmp.path().join("MCBDS.PublicUI.Android");
    assert_eq!(
        fs::read_to_string(dst.join("Components/Pages/Admin/Backups.razor")).unwrap(),
        "backups"
    );
    // pre-existing files untouched
    assert_eq!(
        fs::read_to_string(dst.join("Components/Routes.razor")).unwrap(),
        "<Router/>"
    );
}

#[test]
fn setup_fills_in_only_missing_lib() {
    let tmp = TempDir::new().unwrap();
    seed_solution(tmp.path());
    run_setup_cli(tmp.path(), &[]);
    let lib = tmp.path().join("MCBDS.PublicUI.Android/wwwroot/lib");
    fs::remove_dir_all(&lib).unwrap();

    let layout = SpecLayout::default();
    let report = check_layout(&layout, &layout.resolve(tmp.path()));
    assert_eq!(report.missing(), vec!["wwwroot/lib"]);

    run_setup_cli(tmp.path(), &[]);
    let (ok, _) = run_check(tmp.path());
    assert!(ok);
    assert!(lib.join("bootstrap/bootstrap.min.css").is_file());
}

#[test]
fn setup_without_source_project_fails_and_writes_nothing() {
    let tmp = TempDir::new().unwrap();

    let (ok, txt) = run_setup_cli(tmp.path(), &[]);
    assert!(!ok);
    assert!(txt.contains("[ERROR] MCBDS.PublicUI not found at:"));
    assert!(!tmp.path().join("MCBDS.PublicUI.Android").exists());
}

#[test]
fn setup_exit_code_is_lenient_unless_strict() {
    let tmp = TempDir::new().unwrap();
    seed_solution(tmp.path());
    fs::remove_dir_all(tmp.path().join("MCBDS.PublicUI/Components/Pages")).unwrap();

    let (ok, txt) = run_setup_cli(tmp.path(), &[]);
    assert!(ok);
    assert!(txt.contains("[ERROR] Source not found:"));

    let (ok, _) = run_setup_cli(tmp.path(), &["--strict"]);
    assert!(!ok);
}

#[test]
fn dry_run_leaves_destination_unchanged() {
    let tmp = TempDir::new().unwrap();
    seed_solution(tmp.path());

    let (ok, txt) = run_setup_cli(tmp.path(), &["--dry-run"]);
    assert!(ok);
    assert!(txt.contains("[SKIP] Would copy Components/Layout (2 files)"));
    assert!(
        !tmp.path()
            .join("MCBDS.PublicUI.Android/Components/Layout")
            .exists()
    );
}

#[test]
fn custom_layout_from_config_file() {
    let tmp = TempDir::new().unwrap();
    write_text(&tmp.path().join("Shared/Components/Layout/A.razor"), "a");
    let config = tmp.path().join("uisync.toml");
    fs::write(
        &config,
        r#"
source-project = "Shared"
destination-project = "App"
component-trees = ["Layout"]
component-files = []
asset-trees = []
expected = ["Components/Layout/A.razor"]
"#,
    )
    .unwrap();
    let root = tmp.path().to_string_lossy().to_string();
    let config = config.to_string_lossy().to_string();

    let cli = SetupCli::parse_from([
        "uisync-setup",
        "--solution-root",
        root.as_str(),
        "--config",
        config.as_str(),
    ]);
    let mut pm = PrintMessage::plain(Vec::new());
    assert!(is_success(cli.run(&mut pm).unwrap()));

    let cli = CheckCli::parse_from([
        "uisync-check",
        "--solution-root",
        root.as_str(),
        "--config",
        config.as_str(),
    ]);
    let mut pm = PrintMessage::plain(Vec::new());
    assert!(is_success(cli.run(&mut pm).unwrap()));
}
