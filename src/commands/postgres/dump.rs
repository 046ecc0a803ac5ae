use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::info;

use super::paths::{dump_path, parent_dir};
use crate::config::DumpConfig;
use crate::constants::DUMP_NAME_PREFIX;
use crate::postgres::{ConnectionDescriptor, PostgresEnv, PostgresRemote, select_connections};
use crate::process::{CommandRunner, ExecOptions};
use crate::progress::{DatabaseReporter, WorkflowReport};
use crate::shell::{escape, pipeline, quote_args};

/// Dump every selected database into the container's dump directory.
///
/// Databases are processed one at a time; a failure is reported and the
/// next database is still dumped.
pub async fn cmd_postgres_dump<R: CommandRunner>(
    runner: &R,
    config: &DumpConfig,
    env: &PostgresEnv,
) -> Result<WorkflowReport> {
    let connections = select_connections(env, &config.databases)?;
    let remote = PostgresRemote::new(
        runner,
        &config.target.service,
        &env.super_connection.username,
    );
    let options = ExecOptions::new(&config.target.cwd);
    let name = config
        .filename
        .clone()
        .unwrap_or_else(|| default_dump_name(Utc::now()));

    info!(
        "Dumping {} database(s) from service {}",
        connections.len(),
        config.target.service
    );

    let mut reporter = DatabaseReporter::new("dumping", connections.len());
    for connection in &connections {
        reporter.start_database(&connection.dbname);
        let path = dump_path(&connection.dbname, &name, config.extension());
        match dump_database(&remote, connection, &path, config.gzip, &options).await {
            Ok(()) => {
                reporter.step(&path);
                reporter.succeed(&connection.dbname);
            }
            Err(e) => reporter.fail(&connection.dbname, &e),
        }
    }

    Ok(reporter.finish())
}

async fn dump_database<R: CommandRunner>(
    remote: &PostgresRemote<'_, R>,
    connection: &ConnectionDescriptor,
    path: &str,
    gzip: bool,
    options: &ExecOptions,
) -> Result<()> {
    remote
        .exec(&quote_args("mkdir", &["-p", parent_dir(path)]), options)
        .await?;

    let mut stages = vec![quote_args(
        "pg_dump",
        &["-U", remote.superuser(), "--dbname", connection.dbname.as_str()],
    )];
    if gzip {
        stages.push("gzip".to_string());
    }
    let command = format!("{} > \"{}\"", pipeline(&stages), escape(path));
    remote.exec(&command, options).await
}

/// `dump-<ISO-8601 UTC timestamp>` with `:` replaced so it is a valid file name
pub fn default_dump_name(now: DateTime<Utc>) -> String {
    format!(
        "{}{}",
        DUMP_NAME_PREFIX,
        now.format("%Y-%m-%dT%H-%M-%S%.3fZ")
    )
}
