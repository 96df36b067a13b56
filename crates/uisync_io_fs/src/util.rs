use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::{FileTime, set_file_times};

////////////////////////////////////////////////////////////////////////////////
// #region PathUtilities

fn _normalize_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }
    _absolutize_path(path)
}

fn _absolutize_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(path)
}

/// `true` when one of the two directories contains the other.
///
/// The destination usually does not exist yet, so its nearest existing
/// ancestor is canonicalized and the remaining components are re-appended.
pub(crate) fn is_overlap(src: &Path, dst: &Path) -> bool {
    let src_resolved = _normalize_path(src);
    let dst_resolved = _normalize_existing_prefix(dst);
    dst_resolved.starts_with(&src_resolved) || src_resolved.starts_with(&dst_resolved)
}

fn _normalize_existing_prefix(path: &Path) -> PathBuf {
    let path_abs = _absolutize_path(path);
    let mut path_cursor = path_abs.as_path();
    let mut l_tail = Vec::new();
    loop {
        if let Ok(resolved) = fs::canonicalize(path_cursor) {
            return l_tail
                .iter()
                .rev()
                .fold(resolved, |acc: PathBuf, part| acc.join(part));
        }
        match (path_cursor.parent(), path_cursor.file_name()) {
            (Some(parent), Some(name)) => {
                l_tail.push(name.to_os_string());
                path_cursor = parent;
            }
            _ => return path_abs,
        }
    }
}

/// Display name for a copy source: its final path component.
pub(crate) fn source_name(path_dir_src: &Path) -> String {
    path_dir_src
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path_dir_src.display().to_string())
}

/// Map `path_src` under `path_dir_src` to the same relative location under
/// `path_dir_dst`.
pub(crate) fn derive_destination_path(
    path_src: &Path,
    path_dir_src: &Path,
    path_dir_dst: &Path,
) -> PathBuf {
    match path_src.strip_prefix(path_dir_src) {
        Ok(path_rel) => path_dir_dst.join(path_rel),
        Err(_) => path_dir_dst.join(path_src.file_name().unwrap_or_default()),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FileCopy

/// Copy file bytes, then carry over permissions, timestamps and (on Linux)
/// extended attributes.
pub(crate) fn copy_file_with_metadata(
    path_file_src: &Path,
    path_file_dst: &Path,
) -> Result<(), io::Error> {
    fs::copy(path_file_src, path_file_dst)?;

    let stat_src = fs::metadata(path_file_src)?;
    fs::set_permissions(path_file_dst, stat_src.permissions())?;

    let file_time_access = FileTime::from_last_access_time(&stat_src);
    let file_time_modify = FileTime::from_last_modification_time(&stat_src);
    set_file_times(path_file_dst, file_time_access, file_time_modify)?;

    #[cfg(target_os = "linux")]
    {
        copy_xattrs_linux(path_file_src, path_file_dst);
    }
    Ok(())
}

#[cfg(target_os = "linux")]
fn copy_xattrs_linux(path_file_src: &Path, path_file_dst: &Path) {
    let iter_xattr_names = match xattr::list(path_file_src) {
        Ok(v) => v,
        Err(_) => return,
    };

    for name in iter_xattr_names {
        let Some(raw_value) = xattr::get(path_file_src, &name).ok().flatten() else {
            continue;
        };
        if let Err(e) = xattr::set(path_file_dst, &name, &raw_value) {
            tracing::debug!(
                "Extended attribute {:?} not copied to {} ({e})",
                name,
                path_file_dst.display()
            );
        }
    }
}

/// Worker count for the copy stage. `None` means serial.
pub(crate) fn calculate_worker_limit(num_workers_max: Option<usize>) -> usize {
    let n_cpu = std::thread::available_parallelism()
        .map(|v| v.get())
        .unwrap_or(1);

    match num_workers_max {
        Some(n) => n.clamp(1, n_cpu),
        None => 1,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
