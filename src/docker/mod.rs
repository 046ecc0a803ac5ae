//! docker-compose invocation
//!
//! Every container interaction goes through the `docker-compose` binary of
//! the project in the working directory. Arguments are quoted with
//! [`quote_args`] before they reach the host shell.

use anyhow::Result;
use tracing::debug;

use crate::constants::COMPOSE_BIN;
use crate::error::DevkerError;
use crate::process::{CommandRunner, ExecOptions};
use crate::shell::quote_args;

/// docker-compose front end bound to a command runner
pub struct Compose<'a, R: CommandRunner> {
    runner: &'a R,
}

impl<'a, R: CommandRunner> Compose<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    /// Run `docker-compose <args>`, failing on a non-zero exit
    pub async fn run<S: AsRef<str>>(&self, args: &[S], options: &ExecOptions) -> Result<()> {
        let command_line = quote_args(COMPOSE_BIN, args);
        let exit_code = self.runner.run(&command_line, options).await?;
        if exit_code != 0 {
            debug!("docker-compose failed with {}: {}", exit_code, command_line);
            return Err(DevkerError::RemoteCommand { exit_code }.into());
        }
        Ok(())
    }

    /// Run a bash command inside a service container without a TTY
    pub async fn exec_in_container(
        &self,
        service: &str,
        shell_command: &str,
        options: &ExecOptions,
    ) -> Result<()> {
        self.run(
            &["exec", "-T", service, "bash", "-c", shell_command],
            options,
        )
        .await
    }

    /// Run a command inside a service container attached to the terminal
    pub async fn exec_interactive<S: AsRef<str>>(
        &self,
        service: &str,
        command: &[S],
        options: &ExecOptions,
    ) -> Result<()> {
        let mut args = vec!["exec".to_string(), service.to_string()];
        args.extend(command.iter().map(|part| part.as_ref().to_string()));
        self.run(&args, options).await
    }
}
