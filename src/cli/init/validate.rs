//! Target directory checks before scaffolding.

use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Where `init` writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMode {
    /// `quire init`: the current directory, which must be empty
    CurrentDir,
    /// `quire init <name>`: a new subdirectory, which must not exist
    NewDir,
}

/// Refuse to scaffold over existing files.
pub fn validate_target(root: &Path, mode: InitMode) -> Result<()> {
    match mode {
        InitMode::NewDir if root.exists() => {
            bail!("directory '{}' already exists", root.display())
        }
        InitMode::CurrentDir if has_entries(root)? => bail!(
            "directory '{}' is not empty, use `quire init <name>` to create a new blog in a subdirectory",
            root.display()
        ),
        _ => Ok(()),
    }
}

fn has_entries(dir: &Path) -> Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }
    let mut entries =
        fs::read_dir(dir).with_context(|| format!("failed to read '{}'", dir.display()))?;
    Ok(entries.next().is_some())
}
