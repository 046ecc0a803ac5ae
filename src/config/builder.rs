use anyhow::{Result, anyhow};

use crate::config::types::*;
use crate::constants::DEFAULT_RESTORE_NAME;
use crate::postgres::env_prefix_for_service;
use crate::process::resolve_cwd;

impl PostgresTarget {
    pub fn resolve(args: &ServiceArgs) -> Result<Self> {
        let service = args.service.trim();
        if service.is_empty() {
            return Err(anyhow!("Service name must not be empty"));
        }

        let env_prefix = args
            .env_prefix
            .as_ref()
            .filter(|prefix| !prefix.is_empty())
            .cloned()
            .unwrap_or_else(|| env_prefix_for_service(service));

        Ok(Self {
            service: service.to_string(),
            env_prefix,
            cwd: resolve_cwd(args.cwd_args.cwd.as_deref())?,
        })
    }
}

impl DumpConfig {
    pub fn resolve(service_args: &ServiceArgs, args: &DumpArgs) -> Result<Self> {
        Ok(Self {
            target: PostgresTarget::resolve(service_args)?,
            databases: validate_databases(&args.databases)?,
            filename: args
                .filename
                .as_deref()
                .map(validate_filename)
                .transpose()?,
            gzip: !args.no_gz,
        })
    }
}

impl RestoreConfig {
    pub fn resolve(service_args: &ServiceArgs, args: &RestoreArgs) -> Result<Self> {
        let filename = match args.filename.as_deref() {
            Some(name) => validate_filename(name)?,
            None => DEFAULT_RESTORE_NAME.to_string(),
        };
        let username = args
            .username
            .as_ref()
            .filter(|name| !name.is_empty())
            .cloned();

        Ok(Self {
            target: PostgresTarget::resolve(service_args)?,
            databases: validate_databases(&args.databases)?,
            filename,
            username,
            output: OutputMode {
                verbose: args.verbose,
                quiet: args.quiet,
            },
            gzip: !args.no_gz,
        })
    }
}

fn validate_databases(databases: &[String]) -> Result<Vec<String>> {
    if databases.iter().any(|name| name.is_empty()) {
        return Err(anyhow!("Database names passed with --db must not be empty"));
    }
    Ok(databases.to_vec())
}

/// Dump names are relative to a database's dump directory
fn validate_filename(name: &str) -> Result<String> {
    if name.is_empty() {
        return Err(anyhow!("Dump filename must not be empty"));
    }
    if name.starts_with('/') || name.split('/').any(|segment| segment == "..") {
        return Err(anyhow!(
            "Dump filename '{}' must stay inside the database's dump directory",
            name
        ));
    }
    Ok(name.to_string())
}
