use anyhow::Result;
use std::path::Path;

use crate::config::read_env_files;

/// Print every variable defined by the project's env files
pub fn cmd_print_env(dir: &Path) -> Result<()> {
    for (key, value) in read_env_files(dir)? {
        println!("{}={}", key, value);
    }
    Ok(())
}
