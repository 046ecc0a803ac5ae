use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Variables the binary reads for the default `postgres` service
const POSTGRES_VARS: &[&str] = &[
    "DEVKER_POSTGRES_PORT",
    "DEVKER_POSTGRES_SUPER_DB",
    "DEVKER_POSTGRES_SUPER_USER",
    "DEVKER_POSTGRES_SUPER_PASSWORD",
    "DEVKER_POSTGRES_CONNECTIONS",
    "DEVKER_POSTGRES_connections",
];

/// CLI test helper: a temporary project directory and an isolated binary
pub struct CliTestHelper {
    pub temp_dir: TempDir,
    pub project_root: PathBuf,
}

impl CliTestHelper {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp directory")?;
        let project_root = temp_dir.path().to_path_buf();
        Ok(Self {
            temp_dir,
            project_root,
        })
    }

    /// The devker binary, run from the project directory with none of the
    /// host's Postgres variables leaking in
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("devker").unwrap();
        cmd.current_dir(&self.project_root);
        for var in POSTGRES_VARS {
            cmd.env_remove(var);
        }
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Write `.env` in the project root
    pub fn write_env(&self, content: &str) -> Result<()> {
        fs::write(self.project_root.join(".env"), content).context("Failed to write .env")
    }

    /// Write `.env.local` in the project root
    pub fn write_env_local(&self, content: &str) -> Result<()> {
        fs::write(self.project_root.join(".env.local"), content)
            .context("Failed to write .env.local")
    }
}

/// Run a CLI test against a fresh project directory
///
/// # Example
/// ```
/// #[test]
/// fn test_list() -> Result<()> {
///     with_cli_helper(|helper| {
///         helper.command().args(["postgres", "list", "connections"]).assert().success();
///         Ok(())
///     })
/// }
/// ```
pub fn with_cli_helper<F>(test_fn: F) -> Result<()>
where
    F: FnOnce(&CliTestHelper) -> Result<()>,
{
    let helper = CliTestHelper::new()?;
    test_fn(&helper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_helper_setup() -> Result<()> {
        with_cli_helper(|helper| {
            helper.write_env("A=1\n")?;
            assert!(helper.project_root.join(".env").exists());
            Ok(())
        })
    }
}
