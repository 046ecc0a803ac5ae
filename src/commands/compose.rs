//! Thin docker-compose passthrough commands

use anyhow::Result;

use crate::docker::Compose;
use crate::process::{CommandRunner, ExecOptions};

fn with_args(base: &[&str], rest: &[String]) -> Vec<String> {
    base.iter()
        .map(|s| s.to_string())
        .chain(rest.iter().cloned())
        .collect()
}

pub async fn cmd_compose<R: CommandRunner>(
    runner: &R,
    options: &ExecOptions,
    args: &[String],
) -> Result<()> {
    Compose::new(runner).run(args, options).await
}

/// Start the environment detached
pub async fn cmd_up<R: CommandRunner>(
    runner: &R,
    options: &ExecOptions,
    args: &[String],
) -> Result<()> {
    Compose::new(runner)
        .run(&with_args(&["up", "-d"], args), options)
        .await
}

pub async fn cmd_down<R: CommandRunner>(
    runner: &R,
    options: &ExecOptions,
    args: &[String],
) -> Result<()> {
    Compose::new(runner)
        .run(&with_args(&["down"], args), options)
        .await
}

/// Stop the environment and delete its volumes
pub async fn cmd_destroy<R: CommandRunner>(
    runner: &R,
    options: &ExecOptions,
    args: &[String],
) -> Result<()> {
    Compose::new(runner)
        .run(&with_args(&["down", "-v", "--remove-orphans"], args), options)
        .await
}

/// Interactive shell in a service container
pub async fn cmd_ssh<R: CommandRunner>(
    runner: &R,
    options: &ExecOptions,
    service: &str,
    bash: bool,
    args: &[String],
) -> Result<()> {
    let shell: &[&str] = if bash { &["bash", "-l"] } else { &["sh"] };
    Compose::new(runner)
        .exec_interactive(service, &with_args(shell, args), options)
        .await
}

/// Non-interactive bash command in a service container
pub async fn cmd_bash<R: CommandRunner>(
    runner: &R,
    options: &ExecOptions,
    service: &str,
    command: &str,
) -> Result<()> {
    Compose::new(runner)
        .exec_in_container(service, command, options)
        .await
}
