use crate::error::{ErrorKind, Result};
use std::path::{Path, PathBuf};
use tracing::instrument;

#[cfg(unix)]
use std::os::unix::fs::symlink as symlink_dir;
#[cfg(windows)]
use std::os::windows::fs::symlink_dir;

/// Points `link` at `target`, replacing whatever `link` pointed at before.
///
/// The new link is created next to the old one and renamed over it, so
/// readers see either the previous entry or the new one, never a missing
/// path. A real directory at `link` (left by older tooling) is removed first.
#[instrument(skip_all, fields(link = %link.display(), target = %target.display()))]
pub fn repoint(link: &Path, target: &Path) -> Result<()> {
    if !target.is_dir() {
        exn::bail!(ErrorKind::NotFound(target.to_path_buf()));
    }
    match std::fs::symlink_metadata(link) {
        Ok(metadata) if metadata.is_dir() => {
            tracing::warn!("Replacing real directory with a link");
            std::fs::remove_dir_all(link).map_err(|e| ErrorKind::from_io(e, link))?;
        },
        Ok(_) => {},
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if let Some(parent) = link.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ErrorKind::from_io(e, parent))?;
            }
        },
        Err(e) => exn::bail!(ErrorKind::from_io(e, link)),
    }

    let staging = staging_path(link)?;
    // Leftover from a run that died between creating and renaming.
    if std::fs::symlink_metadata(&staging).is_ok() {
        std::fs::remove_file(&staging).map_err(|e| ErrorKind::from_io(e, &staging))?;
    }
    symlink_dir(target, &staging).map_err(|e| ErrorKind::from_io(e, &staging))?;
    std::fs::rename(&staging, link).map_err(|e| ErrorKind::from_io(e, link))?;
    tracing::info!("Link repointed");
    Ok(())
}

/// `<link>.tmp-<pid>`, beside `link`.
fn staging_path(link: &Path) -> Result<PathBuf> {
    let Some(name) = link.file_name() else {
        exn::bail!(ErrorKind::InvalidPath(link.to_path_buf()));
    };
    let mut staging = name.to_os_string();
    staging.push(format!(".tmp-{}", std::process::id()));
    Ok(link.with_file_name(staging))
}
