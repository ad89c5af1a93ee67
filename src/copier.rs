use anyhow::Result;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Names never copied and never descended into: dependency caches,
/// version-control state, and anything dot-prefixed.
pub fn is_reserved_name(name: &str) -> bool {
    name.starts_with('.') || name == "node_modules"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Destination already exists. Never overwritten; this is the
    /// idempotence guarantee.
    SkippedExisting,
    /// Source stub absent. Some stubs are optional, so this is a warning,
    /// not an error.
    MissingSource,
}

/// Mirror `src` into `dest` without clobbering existing destination
/// content. `visited` holds canonical paths of ancestor directories in the
/// current walk; it is shared by reference through the whole recursion so
/// that a symlink cycle back to an ancestor is detected, while a diamond
/// re-visit through an unrelated branch is not.
pub fn copy_directory(src: &Path, dest: &Path, visited: &mut HashSet<PathBuf>) -> Result<()> {
    if !src.exists() {
        return Ok(());
    }

    let canonical = fs::canonicalize(src)?;
    if visited.contains(&canonical) {
        tracing::warn!(
            "Skipping {}: directory cycle detected",
            src.display()
        );
        return Ok(());
    }

    visited.insert(canonical.clone());
    let result = copy_children(src, dest, visited);
    visited.remove(&canonical);
    result
}

fn copy_children(src: &Path, dest: &Path, visited: &mut HashSet<PathBuf>) -> Result<()> {
    fs::create_dir_all(dest)?;

    for entry in fs::read_dir(src)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Failed to read an entry of {}: {}", src.display(), e);
                continue;
            }
        };

        let name = entry.file_name();
        if is_reserved_name(&name.to_string_lossy()) {
            tracing::debug!("Skipping reserved entry {:?}", name);
            continue;
        }

        let src_path = entry.path();
        let dest_path = dest.join(&name);

        // file_type() reports the entry's own link status without
        // following it.
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                tracing::warn!("Could not stat {}: {}", src_path.display(), e);
                continue;
            }
        };

        if file_type.is_symlink() {
            tracing::warn!(
                "Skipping symlink {} (links are never copied)",
                src_path.display()
            );
            continue;
        }

        let outcome = if file_type.is_dir() {
            copy_directory(&src_path, &dest_path, visited)
        } else {
            copy_file(&src_path, &dest_path).map(|_| ())
        };

        // Per-item failures don't abort the walk; siblings still get copied.
        if let Err(e) = outcome {
            tracing::warn!("Failed to copy {}: {}", src_path.display(), e);
        }
    }

    Ok(())
}

/// Byte-for-byte copy that never overwrites.
pub fn copy_file(src: &Path, dest: &Path) -> Result<CopyOutcome> {
    if !src.exists() {
        tracing::warn!("Source file {} not found", src.display());
        return Ok(CopyOutcome::MissingSource);
    }

    if dest.exists() {
        tracing::info!("Skipping {} (already exists)", dest.display());
        return Ok(CopyOutcome::SkippedExisting);
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::copy(src, dest)?;
    Ok(CopyOutcome::Copied)
}

/// Like [`copy_file`], but pipes the text through `transform` before
/// writing. Used for stubs that need a path rewrite at their new nesting
/// depth.
pub fn copy_file_transformed(
    src: &Path,
    dest: &Path,
    transform: impl FnOnce(&str) -> String,
) -> Result<CopyOutcome> {
    if !src.exists() {
        tracing::warn!("Source file {} not found", src.display());
        return Ok(CopyOutcome::MissingSource);
    }

    if dest.exists() {
        tracing::info!("Skipping {} (already exists)", dest.display());
        return Ok(CopyOutcome::SkippedExisting);
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = fs::read_to_string(src)?;
    fs::write(dest, transform(&content))?;
    Ok(CopyOutcome::Copied)
}
