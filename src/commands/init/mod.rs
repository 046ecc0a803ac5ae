pub mod project;

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::Path;

use project::render_project_files;

/// CLI arguments for the init command
#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Directory to create the project in
    pub dir: String,

    /// Application name used for the compose project and example role
    #[arg(short = 'n', long, default_value = "My App")]
    pub name: String,

    /// Replace files that already exist
    #[arg(long)]
    pub overwrite: bool,
}

/// Write the project skeleton. Returns `false` if any file was skipped or failed.
pub fn cmd_init(cwd: &Path, args: &InitArgs) -> Result<bool> {
    let root_dir = cwd.join(&args.dir);
    fs::create_dir_all(&root_dir)
        .with_context(|| format!("Failed to create {}", root_dir.display()))?;

    let project = render_project_files(&args.name, &mut rand::rng())?;
    let mut ok = true;

    for (relative, contents) in &project.files {
        let path = root_dir.join(relative);
        if !args.overwrite && path.exists() {
            ok = false;
            eprintln!(
                "Skipping: {}\n  \"{}\" already exists. Use \"--overwrite\" flag to force.",
                path.display(),
                relative
            );
            continue;
        }

        let written = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| fs::write(&path, contents));
        match written {
            Ok(()) => println!("Wrote: {}", path.display()),
            Err(e) => {
                ok = false;
                eprintln!("Error while writing file: {}\n  {}", path.display(), e);
            }
        }
    }

    Ok(ok)
}
