use anyhow::{Context, Result};

use crate::config::PostgresTarget;
use crate::docker::Compose;
use crate::postgres::sql::kill_connections_sql;
use crate::postgres::{PostgresEnv, PostgresRemote};
use crate::process::{CommandRunner, ExecOptions};
use crate::shell::quote_args;

/// Connection URLs of every configured connection, super connection first
pub fn connection_urls(env: &PostgresEnv) -> Vec<String> {
    env.connections.iter().map(ToString::to_string).collect()
}

pub fn cmd_postgres_list_connections(env: &PostgresEnv) -> Result<()> {
    for url in connection_urls(env) {
        println!("{}", url);
    }
    Ok(())
}

/// Terminate every backend except the one doing the terminating
pub async fn cmd_postgres_kill_connections<R: CommandRunner>(
    runner: &R,
    target: &PostgresTarget,
    env: &PostgresEnv,
) -> Result<()> {
    let superuser = &env.super_connection;
    let remote = PostgresRemote::new(runner, &target.service, &superuser.username);
    remote
        .run_sql(
            &superuser.username,
            &superuser.dbname,
            &kill_connections_sql(None),
            &ExecOptions::new(&target.cwd),
        )
        .await
        .context("Failed to kill connections")
}

/// Interactive psql session in the service container
pub async fn cmd_postgres_psql<R: CommandRunner>(
    runner: &R,
    target: &PostgresTarget,
    env: &PostgresEnv,
    username: Option<&str>,
    args: &[String],
) -> Result<()> {
    let username = username
        .filter(|name| !name.is_empty())
        .unwrap_or(&env.super_connection.username);

    let mut psql_args = vec!["-U".to_string(), username.to_string()];
    psql_args.extend(args.iter().cloned());
    let psql = quote_args("psql", &psql_args);

    Compose::new(runner)
        .exec_interactive(
            &target.service,
            &["bash", "-c", psql.as_str()],
            &ExecOptions::new(&target.cwd),
        )
        .await
}
