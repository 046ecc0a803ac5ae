use clap::Args;
use std::path::PathBuf;

use crate::constants::DEFAULT_POSTGRES_SERVICE;
use crate::process::{ExecOptions, OutputSink};

// CLI argument groups shared by commands

#[derive(Debug, Clone, Default, Args)]
pub struct CwdArgs {
    #[arg(long, help = "Project directory containing docker-compose.yml")]
    pub cwd: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct ServiceArgs {
    #[arg(short = 's', long, default_value = DEFAULT_POSTGRES_SERVICE, help = "Compose service running Postgres")]
    pub service: String,

    #[arg(long, help = "Environment variable prefix (default: DEVKER_<SERVICE>_)")]
    pub env_prefix: Option<String>,

    #[command(flatten)]
    pub cwd_args: CwdArgs,
}

#[derive(Debug, Clone, Default, Args)]
pub struct DumpArgs {
    /// Database to dump (repeatable, default: every connection)
    #[arg(short = 'd', long = "db", value_name = "NAME")]
    pub databases: Vec<String>,

    /// Dump name without extension (default: timestamped)
    #[arg(short = 'f', long)]
    pub filename: Option<String>,

    /// Write plain SQL instead of gzip
    #[arg(long)]
    pub no_gz: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RestoreArgs {
    /// Database to restore (repeatable, default: every connection)
    #[arg(short = 'd', long = "db", value_name = "NAME")]
    pub databases: Vec<String>,

    /// Dump name without extension
    #[arg(short = 'f', long)]
    pub filename: Option<String>,

    /// Role to create for the restored databases
    #[arg(short = 'u', long)]
    pub username: Option<String>,

    /// Show output of the restore and the role SQL
    #[arg(long)]
    pub verbose: bool,

    /// Hide error output of the restore
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Read plain SQL instead of gzip
    #[arg(long)]
    pub no_gz: bool,
}

/// Which compose service and variables a Postgres command targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresTarget {
    pub service: String,
    pub env_prefix: String,
    pub cwd: PathBuf,
}

/// What remote output a workflow shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputMode {
    pub verbose: bool,
    pub quiet: bool,
}

impl OutputMode {
    /// Quiet wins over verbose
    pub fn verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// stdout only with verbose, stderr unless quiet
    pub fn exec_options(&self, cwd: &std::path::Path) -> ExecOptions {
        ExecOptions::new(cwd)
            .with_stdout(if self.verbose() {
                OutputSink::Inherit
            } else {
                OutputSink::Discard
            })
            .with_stderr(if self.quiet {
                OutputSink::Discard
            } else {
                OutputSink::Inherit
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpConfig {
    pub target: PostgresTarget,
    pub databases: Vec<String>,
    pub filename: Option<String>,
    pub gzip: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreConfig {
    pub target: PostgresTarget,
    pub databases: Vec<String>,
    pub filename: String,
    pub username: Option<String>,
    pub output: OutputMode,
    pub gzip: bool,
}

impl RestoreConfig {
    /// File extension of the dumps this restore reads
    pub fn extension(&self) -> &'static str {
        dump_extension(self.gzip)
    }
}

impl DumpConfig {
    pub fn extension(&self) -> &'static str {
        dump_extension(self.gzip)
    }
}

fn dump_extension(gzip: bool) -> &'static str {
    if gzip { ".sql.gz" } else { ".sql" }
}
