use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::SAVED_SPRITE_PREFIX;
use crate::error::{Error, Result};

/// Outcome of a symlink rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rotation {
    /// The symlink now points at this saved sprite.
    Rotated(PathBuf),
    /// No saved sprites to choose from; the symlink was left alone.
    NoSprites,
}

/// Saved sprites in `wal_dir`, sorted by name.
pub fn saved_sprites(wal_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(wal_dir).map_err(|e| Error::io(wal_dir, e))?;
    let mut sprites = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(wal_dir, e))?;
        if entry
            .file_name()
            .to_string_lossy()
            .starts_with(SAVED_SPRITE_PREFIX)
        {
            sprites.push(entry.path());
        }
    }
    sprites.sort();
    Ok(sprites)
}

/// Point `symlink` at a uniformly chosen saved sprite from `wal_dir`.
pub fn change_symlink(wal_dir: &Path, symlink: &Path) -> Result<Rotation> {
    change_symlink_with(wal_dir, symlink, &mut rand::thread_rng())
}

pub fn change_symlink_with<R: Rng + ?Sized>(
    wal_dir: &Path,
    symlink: &Path,
    rng: &mut R,
) -> Result<Rotation> {
    let sprites = saved_sprites(wal_dir)?;
    let Some(target) = sprites.choose(rng) else {
        return Ok(Rotation::NoSprites);
    };

    // symlink_metadata also sees dangling links
    if symlink.symlink_metadata().is_ok() {
        if let Err(e) = std::fs::remove_file(symlink) {
            tracing::warn!(path = %symlink.display(), "Error removing symlink: {e}");
        }
    }
    make_symlink(target, symlink).map_err(|e| Error::io(symlink, e))?;
    tracing::debug!(
        sprite = %target.display(),
        link = %symlink.display(),
        "Rotated sprite symlink"
    );
    Ok(Rotation::Rotated(target.clone()))
}

#[cfg(unix)]
fn make_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn make_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
