//! Postgres client tools run inside the database service container
//!
//! SQL is always delivered through `printf ... | psql`, never as a `-c`
//! argument, and `psql` stops at the first failing statement. Destructive
//! DDL against a database runs from a session on a disposable temporary
//! database, since a session cannot drop the database it is connected to.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::constants::{TEMP_DB_ID_LEN, TEMP_DB_PREFIX};
use crate::docker::Compose;
use crate::process::{CommandRunner, ExecOptions};
use crate::shell::{escape_printf_format, pipeline, quote_args};

/// Postgres operations against one compose service, as one superuser
pub struct PostgresRemote<'a, R: CommandRunner> {
    compose: Compose<'a, R>,
    service: String,
    superuser: String,
}

impl<'a, R: CommandRunner> PostgresRemote<'a, R> {
    pub fn new(runner: &'a R, service: impl Into<String>, superuser: impl Into<String>) -> Self {
        Self {
            compose: Compose::new(runner),
            service: service.into(),
            superuser: superuser.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn superuser(&self) -> &str {
        &self.superuser
    }

    /// Run a bash command line in the service container
    pub async fn exec(&self, shell_command: &str, options: &ExecOptions) -> Result<()> {
        self.compose
            .exec_in_container(&self.service, shell_command, options)
            .await
    }

    /// Pipe SQL into `psql` connected to `dbname` as `user`
    pub async fn run_sql(
        &self,
        user: &str,
        dbname: &str,
        sql: &str,
        options: &ExecOptions,
    ) -> Result<()> {
        debug!("Executing SQL on {} as {}:\n{}", dbname, user, sql);
        let command = pipeline(&[
            format!("printf \"{}\"", escape_printf_format(sql)),
            quote_args(
                "psql",
                &["-v", "ON_ERROR_STOP=1", "-U", user, "--dbname", dbname],
            ),
        ]);
        self.exec(&command, options).await
    }

    /// Run `body` with a scratch database that is dropped afterwards.
    ///
    /// The drop uses `--if-exists` and runs whether or not creation or the
    /// body succeeded. Create and drop output is always discarded. An error
    /// from the body takes precedence over an error from the drop.
    pub async fn with_temporary_database<T, F>(&self, options: &ExecOptions, body: F) -> Result<T>
    where
        F: AsyncFnOnce(&TemporaryDatabase<'_, 'a, R>) -> Result<T>,
    {
        let quiet = options.quiet();
        let tmpdb = TemporaryDatabase {
            remote: self,
            name: temporary_database_name(),
        };

        debug!("Creating temporary database {}", tmpdb.name);
        let created = self
            .exec(
                &quote_args("createdb", &["-U", self.superuser.as_str(), tmpdb.name.as_str()]),
                &quiet,
            )
            .await
            .with_context(|| format!("Failed to create temporary database {}", tmpdb.name));

        let result = match created {
            Ok(()) => body(&tmpdb).await,
            Err(e) => Err(e),
        };

        debug!("Dropping temporary database {}", tmpdb.name);
        let dropped = self
            .exec(
                &quote_args(
                    "dropdb",
                    &["-U", self.superuser.as_str(), "--if-exists", tmpdb.name.as_str()],
                ),
                &quiet,
            )
            .await
            .with_context(|| format!("Failed to drop temporary database {}", tmpdb.name));

        match (result, dropped) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(drop_err)) => Err(drop_err),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(drop_err)) => {
                warn!("{:#}", drop_err);
                Err(e)
            }
        }
    }
}

/// Handle to the scratch database of [`PostgresRemote::with_temporary_database`]
pub struct TemporaryDatabase<'r, 'a, R: CommandRunner> {
    remote: &'r PostgresRemote<'a, R>,
    name: String,
}

impl<R: CommandRunner> TemporaryDatabase<'_, '_, R> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run SQL as the superuser in a session on the scratch database
    pub async fn run_sql(&self, sql: &str, options: &ExecOptions) -> Result<()> {
        self.remote
            .run_sql(self.remote.superuser(), &self.name, sql, options)
            .await
    }
}

fn temporary_database_name() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{}{}", TEMP_DB_PREFIX, &id[..TEMP_DB_ID_LEN])
}
