//! Filesystem tree traversal and copy orchestration.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::report::{ReportCopy, ReportCopyBuilder, ReportCopyFiles, SpecFileOutcome};
use crate::spec::{CopyTreeError, EnumFileCopyStatus, SpecCopyOptions};
use crate::util::{
    calculate_worker_limit, copy_file_with_metadata, derive_destination_path, is_overlap,
    source_name,
};

#[derive(Debug, Clone)]
struct SpecDirEntry {
    path_dir_src_sub: PathBuf,
    name_dir: String,
}

#[derive(Debug, Clone)]
struct SpecFileEntry {
    path_file_src: PathBuf,
    name_file: String,
}

#[derive(Debug, Clone)]
struct SpecCopyTaskFile {
    path_file_src: PathBuf,
    path_file_dst: PathBuf,
}

#[derive(Debug)]
struct SpecCopyContext {
    name_src: String,
    path_dir_src: PathBuf,
    path_dir_dst: PathBuf,
    spec_cp_options: SpecCopyOptions,
    n_workers_max: usize,
    builder_cp_report: ReportCopyBuilder,
    l_tasks_file_copy: Vec<SpecCopyTaskFile>,
}

impl SpecCopyContext {
    fn io_error(&self, path: &Path, e: impl std::fmt::Display) -> CopyTreeError {
        CopyTreeError::Io {
            name: self.name_src.clone(),
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    }
}

/// Copy every regular file under `dir_source` to the same relative location
/// under `dir_destination`.
///
/// This function performs:
/// 1. Input validation (source exists and is a directory, no overlap).
/// 2. Destination root creation.
/// 3. Directory traversal in name order, creating destination
///    subdirectories and planning file copies.
/// 4. File-copy execution (serial, or on a rayon pool when
///    [`SpecCopyOptions::num_workers_max`] is above one).
///
/// Symlinks to regular files are dereferenced and their target content is
/// copied. Directory symlinks, broken symlinks and special files are skipped
/// with a warning. Existing destination files are overwritten.
///
/// The first IO failure aborts the run with [`CopyTreeError::Io`]; files
/// written before it stay on disk. A missing source returns
/// [`CopyTreeError::SourceNotFound`] before anything is created.
pub fn copy_tree<P, Q>(
    dir_source: P,
    dir_destination: Q,
    spec_cp_options: SpecCopyOptions,
) -> Result<ReportCopy, CopyTreeError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_dir_src = dir_source.as_ref().to_path_buf();
    let path_dir_dst = dir_destination.as_ref().to_path_buf();

    if !path_dir_src.exists() {
        return Err(CopyTreeError::SourceNotFound(path_dir_src));
    }
    if !path_dir_src.is_dir() {
        return Err(CopyTreeError::SourceNotDirectory(path_dir_src));
    }
    if is_overlap(&path_dir_src, &path_dir_dst) {
        return Err(CopyTreeError::SourceDestinationOverlap {
            source_dir: path_dir_src,
            destination_dir: path_dir_dst,
        });
    }

    let if_dry_run = spec_cp_options.if_dry_run;
    let name_src = source_name(&path_dir_src);
    let mut builder_cp_report = ReportCopyBuilder::new(name_src.clone(), if_dry_run);

    if !if_dry_run && !path_dir_dst.is_dir() {
        fs::create_dir_all(&path_dir_dst).map_err(|e| CopyTreeError::DestinationInitFailed {
            path: path_dir_dst.clone(),
            message: e.to_string(),
        })?;
        builder_cp_report.add_dir_created();
    }

    let n_workers_max = calculate_worker_limit(spec_cp_options.num_workers_max);
    let mut spec_cp_ctx = SpecCopyContext {
        name_src,
        path_dir_src: path_dir_src.clone(),
        path_dir_dst,
        spec_cp_options,
        n_workers_max,
        builder_cp_report,
        l_tasks_file_copy: Vec::new(),
    };

    walk_directory(&path_dir_src, &mut spec_cp_ctx)?;
    flush_file_copy_tasks(&mut spec_cp_ctx)?;

    let report = spec_cp_ctx.builder_cp_report.build();
    tracing::info!("{report}");
    Ok(report)
}

fn walk_directory(
    path_root: &Path,
    spec_cp_ctx: &mut SpecCopyContext,
) -> Result<(), CopyTreeError> {
    let mut l_dirs: Vec<SpecDirEntry> = Vec::new();
    let mut l_files: Vec<SpecFileEntry> = Vec::new();

    let iter_entries = fs::read_dir(path_root).map_err(|e| spec_cp_ctx.io_error(path_root, e))?;

    for _entry_res in iter_entries {
        let entry = _entry_res.map_err(|e| spec_cp_ctx.io_error(path_root, e))?;
        let path_entry = entry.path();
        let c_name = entry.file_name().to_string_lossy().to_string();
        let cfg_file_type = entry
            .file_type()
            .map_err(|e| spec_cp_ctx.io_error(&path_entry, e))?;

        spec_cp_ctx.builder_cp_report.add_scanned();
        if cfg_file_type.is_symlink() {
            // Links to regular files are copied by content; the rest are skipped.
            match fs::metadata(&path_entry) {
                Ok(meta_target) if meta_target.is_file() => l_files.push(SpecFileEntry {
                    path_file_src: path_entry,
                    name_file: c_name,
                }),
                Ok(_) => {
                    spec_cp_ctx.builder_cp_report.add_warning(format!(
                        "Directory symlink skipped: {}",
                        path_entry.display()
                    ));
                    spec_cp_ctx.builder_cp_report.add_skipped();
                }
                Err(e) => {
                    spec_cp_ctx.builder_cp_report.add_warning(format!(
                        "Broken symlink skipped: {} ({e})",
                        path_entry.display()
                    ));
                    spec_cp_ctx.builder_cp_report.add_skipped();
                }
            }
        } else if cfg_file_type.is_dir() {
            l_dirs.push(SpecDirEntry {
                path_dir_src_sub: path_entry,
                name_dir: c_name,
            });
        } else if cfg_file_type.is_file() {
            l_files.push(SpecFileEntry {
                path_file_src: path_entry,
                name_file: c_name,
            });
        } else {
            spec_cp_ctx
                .builder_cp_report
                .add_warning(format!("Special file skipped: {}", path_entry.display()));
            spec_cp_ctx.builder_cp_report.add_skipped();
        }
    }

    l_dirs.sort_by(|a, b| a.name_dir.cmp(&b.name_dir));
    l_files.sort_by(|a, b| a.name_file.cmp(&b.name_file));

    for _file_entry in l_files {
        handle_file_entry(_file_entry, spec_cp_ctx);
    }

    for _dir_entry in l_dirs {
        handle_dir_entry(&_dir_entry, spec_cp_ctx)?;
        walk_directory(&_dir_entry.path_dir_src_sub, spec_cp_ctx)?;
    }
    Ok(())
}

fn handle_dir_entry(
    spec_dir_entry: &SpecDirEntry,
    spec_cp_ctx: &mut SpecCopyContext,
) -> Result<(), CopyTreeError> {
    let path_dir_dst_sub = derive_destination_path(
        &spec_dir_entry.path_dir_src_sub,
        &spec_cp_ctx.path_dir_src,
        &spec_cp_ctx.path_dir_dst,
    );
    if path_dir_dst_sub.is_dir() || spec_cp_ctx.spec_cp_options.if_dry_run {
        return Ok(());
    }

    fs::create_dir_all(&path_dir_dst_sub)
        .map_err(|e| spec_cp_ctx.io_error(&path_dir_dst_sub, e))?;
    spec_cp_ctx.builder_cp_report.add_dir_created();
    Ok(())
}

fn handle_file_entry(spec_file_entry: SpecFileEntry, spec_cp_ctx: &mut SpecCopyContext) {
    let path_file_dst = derive_destination_path(
        &spec_file_entry.path_file_src,
        &spec_cp_ctx.path_dir_src,
        &spec_cp_ctx.path_dir_dst,
    );

    if spec_cp_ctx.spec_cp_options.if_dry_run {
        tracing::debug!(
            "Would copy {} -> {}",
            spec_file_entry.path_file_src.display(),
            path_file_dst.display()
        );
        spec_cp_ctx.builder_cp_report.add_skipped();
        return;
    }

    spec_cp_ctx.l_tasks_file_copy.push(SpecCopyTaskFile {
        path_file_src: spec_file_entry.path_file_src,
        path_file_dst,
    });
}

fn run_file_copy_task(spec_task: &SpecCopyTaskFile) -> Result<(), String> {
    copy_file_with_metadata(&spec_task.path_file_src, &spec_task.path_file_dst)
        .map_err(|e| e.to_string())?;
    tracing::debug!(
        "Copied {} -> {}",
        spec_task.path_file_src.display(),
        spec_task.path_file_dst.display()
    );
    Ok(())
}

fn flush_file_copy_tasks(spec_cp_ctx: &mut SpecCopyContext) -> Result<(), CopyTreeError> {
    let l_tasks_file_copy = std::mem::take(&mut spec_cp_ctx.l_tasks_file_copy);
    if l_tasks_file_copy.is_empty() {
        return Ok(());
    }

    let copy_serial = |spec_cp_ctx: &mut SpecCopyContext,
                       l_tasks: Vec<SpecCopyTaskFile>|
     -> Result<(), CopyTreeError> {
        for spec_task in l_tasks {
            run_file_copy_task(&spec_task)
                .map_err(|msg| spec_cp_ctx.io_error(&spec_task.path_file_src, msg))?;
            spec_cp_ctx.builder_cp_report.add_copied();
        }
        Ok(())
    };

    if spec_cp_ctx.n_workers_max <= 1 {
        return copy_serial(spec_cp_ctx, l_tasks_file_copy);
    }

    let thread_pool = ThreadPoolBuilder::new()
        .num_threads(spec_cp_ctx.n_workers_max)
        .build();
    let Ok(thread_pool) = thread_pool else {
        spec_cp_ctx.builder_cp_report.add_warning(format!(
            "Failed to initialize thread pool (workers={}); fallback to serial copy.",
            spec_cp_ctx.n_workers_max
        ));
        return copy_serial(spec_cp_ctx, l_tasks_file_copy);
    };

    let n_tasks = l_tasks_file_copy.len() as u64;
    let res_copy = thread_pool.install(|| {
        l_tasks_file_copy.par_iter().try_for_each(|spec_task| {
            run_file_copy_task(spec_task).map_err(|msg| (spec_task.path_file_src.clone(), msg))
        })
    });
    match res_copy {
        Ok(()) => {
            spec_cp_ctx.builder_cp_report.cnt_copied += n_tasks;
            Ok(())
        }
        Err((path_file_src, msg)) => Err(spec_cp_ctx.io_error(&path_file_src, msg)),
    }
}

/// Copy each of `names` from `dir_source` into `dir_destination`.
///
/// Every name gets exactly one outcome, in order. A missing source file or a
/// failed copy is recorded and the remaining names are still processed.
pub fn copy_named_files<P, Q, S>(
    dir_source: P,
    dir_destination: Q,
    names: &[S],
    spec_cp_options: &SpecCopyOptions,
) -> ReportCopyFiles
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    S: AsRef<str>,
{
    let path_dir_src = dir_source.as_ref();
    let path_dir_dst = dir_destination.as_ref();
    let if_dry_run = spec_cp_options.if_dry_run;

    let outcomes = names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let status = copy_named_file(path_dir_src, path_dir_dst, name, if_dry_run);
            match &status {
                EnumFileCopyStatus::Copied => tracing::debug!("Copied file {name}"),
                EnumFileCopyStatus::Missing => {
                    tracing::warn!("File not found: {}", path_dir_src.join(name).display())
                }
                EnumFileCopyStatus::Failed(msg) => tracing::warn!("Failed to copy {name}: {msg}"),
            }
            SpecFileOutcome {
                name: name.to_string(),
                status,
            }
        })
        .collect();

    ReportCopyFiles {
        outcomes,
        if_dry_run,
    }
}

fn copy_named_file(
    path_dir_src: &Path,
    path_dir_dst: &Path,
    name: &str,
    if_dry_run: bool,
) -> EnumFileCopyStatus {
    let path_file_src = path_dir_src.join(name);
    if !path_file_src.is_file() {
        return EnumFileCopyStatus::Missing;
    }
    if if_dry_run {
        return EnumFileCopyStatus::Copied;
    }
    if let Err(e) = fs::create_dir_all(path_dir_dst) {
        return EnumFileCopyStatus::Failed(e.to_string());
    }
    match copy_file_with_metadata(&path_file_src, &path_dir_dst.join(name)) {
        Ok(()) => EnumFileCopyStatus::Copied,
        Err(e) => EnumFileCopyStatus::Failed(e.to_string()),
    }
}
