use anyhow::{Context, Result};
use tracing::{debug, info};

use super::paths::dump_path;
use crate::config::RestoreConfig;
use crate::postgres::sql::{initialize_role_sql, recreate_database_sql};
use crate::postgres::{
    ConnectionDescriptor, PostgresEnv, PostgresRemote, TemporaryDatabase, select_connections,
};
use crate::process::{CommandRunner, ExecOptions};
use crate::progress::{DatabaseReporter, WorkflowReport};
use crate::shell::{escape, pipeline, quote_args};

/// Recreate every selected database from its dump file.
///
/// All drop/create statements run from a session on one temporary database
/// that lives for the whole command. Each database is restored on its own:
/// a failed step skips the rest of that database and moves on to the next.
pub async fn cmd_postgres_restore<R: CommandRunner>(
    runner: &R,
    config: &RestoreConfig,
    env: &PostgresEnv,
) -> Result<WorkflowReport> {
    let connections = restore_targets(env, config)?;
    let remote = PostgresRemote::new(
        runner,
        &config.target.service,
        &env.super_connection.username,
    );
    let options = config.output.exec_options(&config.target.cwd);

    info!(
        "Restoring {} database(s) on service {}",
        connections.len(),
        config.target.service
    );

    let mut reporter = DatabaseReporter::new("restoring", connections.len());
    let scope = remote
        .with_temporary_database(&options, async |tmpdb| {
            debug!("Using {} as maintenance database", tmpdb.name());
            for connection in &connections {
                reporter.start_database(&connection.dbname);
                let outcome =
                    restore_database(&remote, tmpdb, connection, config, &options, &reporter)
                        .await;
                match outcome {
                    Ok(()) => reporter.succeed(&connection.dbname),
                    Err(e) => reporter.fail(&connection.dbname, &e),
                }
            }
            Ok(())
        })
        .await;

    if let Err(e) = scope {
        // Nothing was attempted when the temporary database could not be created
        if reporter.attempted() == 0 {
            return Err(e);
        }
        let report = reporter.finish();
        return Err(e.context(format!(
            "Restore finished with {} succeeded and {} failed",
            report.succeeded.len(),
            report.failed.len()
        )));
    }

    Ok(reporter.finish())
}

/// Connections to restore, with the `--username` override applied.
///
/// Without `--db` the super connection's own database is left alone; it can
/// still be restored by naming it explicitly.
fn restore_targets(env: &PostgresEnv, config: &RestoreConfig) -> Result<Vec<ConnectionDescriptor>> {
    let mut connections = select_connections(env, &config.databases)?;
    if config.databases.is_empty() {
        connections.retain(|c| c.dbname != env.super_connection.dbname);
    }

    if let Some(username) = &config.username {
        for connection in connections
            .iter_mut()
            .filter(|c| c.dbname != env.super_connection.dbname)
        {
            connection.username = username.clone();
        }
    }
    Ok(connections)
}

async fn restore_database<R: CommandRunner>(
    remote: &PostgresRemote<'_, R>,
    tmpdb: &TemporaryDatabase<'_, '_, R>,
    connection: &ConnectionDescriptor,
    config: &RestoreConfig,
    options: &ExecOptions,
    reporter: &DatabaseReporter,
) -> Result<()> {
    let dbname = connection.dbname.as_str();

    reporter.step("Dropping and recreating database");
    tmpdb
        .run_sql(&recreate_database_sql(dbname), &options.quiet())
        .await
        .with_context(|| format!("Failed to recreate database {}", dbname))?;

    match initialize_role_sql(connection) {
        Some(sql) => {
            reporter.step(&format!("Creating role: {}", connection.username));
            if config.output.verbose() {
                println!("Executing SQL:\n{}", sql);
            }
            tmpdb
                .run_sql(&sql, options)
                .await
                .with_context(|| format!("Failed to create role {}", connection.username))?;
        }
        None => reporter.warn("Creating role: skipped because username is empty"),
    }

    let path = dump_path(dbname, &config.filename, config.extension());
    reporter.step(&format!("Restoring from {}", path));
    let reader = if config.gzip { "gunzip -c" } else { "cat" };
    let command = pipeline(&[
        format!("{} \"{}\"", reader, escape(&path)),
        quote_args("psql", &["-U", remote.superuser(), "--dbname", dbname]),
    ]);
    remote
        .exec(&command, options)
        .await
        .with_context(|| format!("Failed to load {}", path))?;
    Ok(())
}
