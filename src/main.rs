use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use devker::commands;
use devker::commands::generate::PasswordOptions;
use devker::commands::init::InitArgs;
use devker::config::{
    self, CwdArgs, DumpArgs, DumpConfig, PostgresTarget, RestoreArgs, RestoreConfig, ServiceArgs,
};
use devker::postgres::PostgresEnv;
use devker::process::{ExecOptions, ShellRunner, resolve_cwd};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "devker", author, version, about, long_about = None)]
struct Cli {
    /// Enable debug output (debug level)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print variables defined in .env and .env.local
    Print {
        #[command(subcommand)]
        command: PrintCommands,
    },

    /// Generate passwords or UUIDs
    Generate {
        #[command(subcommand)]
        command: GenerateCommands,
    },

    /// Scaffold a new project
    Init {
        #[command(flatten)]
        args: InitArgs,

        #[command(flatten)]
        cwd_args: CwdArgs,
    },

    /// Open an interactive shell in a service container
    Ssh {
        /// Compose service name
        service: String,

        /// Use a bash login shell instead of sh
        #[arg(long)]
        bash: bool,

        #[command(flatten)]
        cwd_args: CwdArgs,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run a bash command in a service container
    Bash {
        /// Compose service name
        service: String,

        /// Command line passed to `bash -c`
        #[arg(default_value = "")]
        command: String,

        #[command(flatten)]
        cwd_args: CwdArgs,
    },

    /// Run docker-compose with the project's environment
    #[command(name = "docker-compose")]
    DockerCompose {
        #[command(flatten)]
        cwd_args: CwdArgs,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Start the environment in the background
    Up {
        #[command(flatten)]
        cwd_args: CwdArgs,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Stop the environment
    Down {
        #[command(flatten)]
        cwd_args: CwdArgs,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Stop the environment and remove its volumes
    Destroy {
        #[command(flatten)]
        cwd_args: CwdArgs,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Postgres commands
    Postgres {
        #[command(subcommand)]
        command: PostgresCommands,
    },
}

#[derive(Subcommand)]
enum PrintCommands {
    /// Print KEY=VALUE for every entry of the env files
    Env {
        #[command(flatten)]
        cwd_args: CwdArgs,
    },
}

#[derive(Subcommand)]
enum GenerateCommands {
    /// Generate random passwords
    Password {
        /// Number of passwords
        #[arg(short = 'c', long, default_value = "1")]
        count: usize,

        /// Password length
        #[arg(short = 'l', long, default_value = "10")]
        length: usize,

        /// Characters to leave out
        #[arg(short = 'e', long, default_value = "")]
        exclude: String,

        /// Flags such as `symbols`, `lowercase`, `strict` or `!numbers`
        #[arg(allow_hyphen_values = true)]
        flags: Vec<String>,
    },

    /// Generate UUIDs
    Uuid {
        /// Number of UUIDs
        #[arg(short = 'c', long, default_value = "1")]
        count: usize,

        /// UUID version (v4 or v7)
        #[arg(default_value = "v4")]
        version: String,
    },
}

#[derive(Subcommand)]
enum PostgresCommands {
    /// Dump databases into the container's dump directory
    Dump {
        #[command(flatten)]
        service_args: ServiceArgs,

        #[command(flatten)]
        args: DumpArgs,
    },

    /// Drop, recreate and reload databases from dumps
    Restore {
        #[command(flatten)]
        service_args: ServiceArgs,

        #[command(flatten)]
        args: RestoreArgs,
    },

    /// Open psql in the service container
    Psql {
        #[command(flatten)]
        service_args: ServiceArgs,

        /// Role to connect as (default: the super user)
        #[arg(short = 'U', long)]
        username: Option<String>,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List configured objects
    List {
        #[command(subcommand)]
        command: PostgresListCommands,
    },

    /// Kill database sessions
    Kill {
        #[command(subcommand)]
        command: PostgresKillCommands,
    },
}

#[derive(Subcommand)]
enum PostgresListCommands {
    /// Print the URL of every configured connection
    Connections {
        #[command(flatten)]
        service_args: ServiceArgs,
    },
}

#[derive(Subcommand)]
enum PostgresKillCommands {
    /// Terminate all sessions except the current one
    Connections {
        #[command(flatten)]
        service_args: ServiceArgs,
    },
}

impl Commands {
    /// Commands that hand the terminal to a child process
    fn is_interactive(&self) -> bool {
        matches!(
            self,
            Commands::Ssh { .. }
                | Commands::DockerCompose { .. }
                | Commands::Postgres {
                    command: PostgresCommands::Psql { .. }
                }
        )
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    initialize_logging(&cli);

    let result = if cli.command.is_interactive() {
        run_main(cli).await
    } else {
        tokio::select! {
            result = run_main(cli) => result,
            _ = wait_for_shutdown_signal() => {
                warn!("Received shutdown signal, stopping. A temporary database may be left behind.");
                Ok(130)
            }
        }
    };

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            1
        }
    };
    std::process::exit(code);
}

async fn wait_for_shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn initialize_logging(cli: &Cli) {
    let level = if cli.debug { "debug" } else { "warn" };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve the project directory and load its env files
fn project_dir(cwd_args: &CwdArgs) -> Result<PathBuf> {
    let cwd = resolve_cwd(cwd_args.cwd.as_deref())?;
    config::load_env_files(&cwd)?;
    Ok(cwd)
}

fn postgres_env(target: &PostgresTarget) -> Result<PostgresEnv> {
    config::load_env_files(&target.cwd)?;
    info!("Reading connections from {}*", target.env_prefix);
    Ok(PostgresEnv::from_process_env(&target.env_prefix)?)
}

async fn run_main(cli: Cli) -> Result<i32> {
    let runner = ShellRunner;

    match cli.command {
        Commands::Print {
            command: PrintCommands::Env { cwd_args },
        } => {
            let cwd = resolve_cwd(cwd_args.cwd.as_deref())?;
            commands::cmd_print_env(&cwd)?;
            Ok(0)
        }
        Commands::Generate { command } => match command {
            GenerateCommands::Password {
                count,
                length,
                exclude,
                flags,
            } => {
                let options = PasswordOptions::from_flags(length, &exclude, &flags)?;
                commands::cmd_generate_password(count, &options)?;
                Ok(0)
            }
            GenerateCommands::Uuid { count, version } => {
                commands::cmd_generate_uuid(count, &version)?;
                Ok(0)
            }
        },
        Commands::Init { args, cwd_args } => {
            let cwd = resolve_cwd(cwd_args.cwd.as_deref())?;
            let ok = commands::cmd_init(&cwd, &args)?;
            Ok(if ok { 0 } else { 1 })
        }
        Commands::Ssh {
            service,
            bash,
            cwd_args,
            args,
        } => {
            let options = ExecOptions::new(project_dir(&cwd_args)?);
            commands::cmd_ssh(&runner, &options, &service, bash, &args).await?;
            Ok(0)
        }
        Commands::Bash {
            service,
            command,
            cwd_args,
        } => {
            let options = ExecOptions::new(project_dir(&cwd_args)?);
            commands::cmd_bash(&runner, &options, &service, &command).await?;
            Ok(0)
        }
        Commands::DockerCompose { cwd_args, args } => {
            let options = ExecOptions::new(project_dir(&cwd_args)?);
            commands::cmd_compose(&runner, &options, &args).await?;
            Ok(0)
        }
        Commands::Up { cwd_args, args } => {
            let options = ExecOptions::new(project_dir(&cwd_args)?);
            commands::cmd_up(&runner, &options, &args).await?;
            Ok(0)
        }
        Commands::Down { cwd_args, args } => {
            let options = ExecOptions::new(project_dir(&cwd_args)?);
            commands::cmd_down(&runner, &options, &args).await?;
            Ok(0)
        }
        Commands::Destroy { cwd_args, args } => {
            let options = ExecOptions::new(project_dir(&cwd_args)?);
            commands::cmd_destroy(&runner, &options, &args).await?;
            Ok(0)
        }
        Commands::Postgres { command } => match command {
            PostgresCommands::Dump { service_args, args } => {
                let config = DumpConfig::resolve(&service_args, &args)?;
                let env = postgres_env(&config.target)?;
                let report = commands::cmd_postgres_dump(&runner, &config, &env).await?;
                Ok(report.exit_code())
            }
            PostgresCommands::Restore { service_args, args } => {
                let config = RestoreConfig::resolve(&service_args, &args)?;
                let env = postgres_env(&config.target)?;
                let report = commands::cmd_postgres_restore(&runner, &config, &env).await?;
                Ok(report.exit_code())
            }
            PostgresCommands::Psql {
                service_args,
                username,
                args,
            } => {
                let target = PostgresTarget::resolve(&service_args)?;
                let env = postgres_env(&target)?;
                commands::cmd_postgres_psql(&runner, &target, &env, username.as_deref(), &args)
                    .await?;
                Ok(0)
            }
            PostgresCommands::List {
                command: PostgresListCommands::Connections { service_args },
            } => {
                let target = PostgresTarget::resolve(&service_args)?;
                let env = postgres_env(&target)?;
                commands::cmd_postgres_list_connections(&env)?;
                Ok(0)
            }
            PostgresCommands::Kill {
                command: PostgresKillCommands::Connections { service_args },
            } => {
                let target = PostgresTarget::resolve(&service_args)?;
                let env = postgres_env(&target)?;
                commands::cmd_postgres_kill_connections(&runner, &target, &env).await?;
                Ok(0)
            }
        },
    }
}
