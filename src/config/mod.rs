pub mod builder;
pub mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::constants::ENV_FILES;

/// Load `.env.local` and `.env` from `dir` into the process environment.
///
/// Variables already present in the process win, and `.env.local` wins
/// over `.env`. Missing files are skipped.
pub fn load_env_files(dir: &Path) -> Result<()> {
    for name in ENV_FILES {
        let path = dir.join(name);
        if path.is_file() {
            debug!("Loading environment from {}", path.display());
            dotenv::from_path(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
        }
    }
    Ok(())
}

/// Entries defined by the env files in `dir`, `.env.local` overriding `.env`
pub fn read_env_files(dir: &Path) -> Result<Vec<(String, String)>> {
    let mut entries: Vec<(String, String)> = Vec::new();
    for name in ENV_FILES.iter().rev() {
        let path = dir.join(name);
        if !path.is_file() {
            continue;
        }
        let iter = dotenv::from_path_iter(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        for item in iter {
            let (key, value) =
                item.with_context(|| format!("Failed to parse {}", path.display()))?;
            match entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
        }
    }
    Ok(entries)
}
