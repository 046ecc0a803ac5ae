//! Postgres connection environment
//!
//! Turns the flat `DEVKER_<SERVICE>_*` variables into a [`PostgresEnv`]
//! once per command invocation. Nothing downstream reads raw variables.

use std::collections::HashMap;
use tracing::debug;

use super::connection::ConnectionDescriptor;
use crate::constants::{DEFAULT_HOST, DEFAULT_SUPER_DB, DEFAULT_SUPER_USER, ENV_PREFIX_ROOT};
use crate::error::DevkerError;

/// The super connection plus every application connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresEnv {
    pub port: String,
    pub super_connection: ConnectionDescriptor,
    /// Always starts with the super connection
    pub connections: Vec<ConnectionDescriptor>,
}

impl PostgresEnv {
    /// Resolve from the process environment
    pub fn from_process_env(prefix: &str) -> Result<Self, DevkerError> {
        Self::resolve(prefix, |name| std::env::var(name).ok())
    }

    /// Resolve from an explicit variable map
    pub fn from_vars(prefix: &str, vars: &HashMap<String, String>) -> Result<Self, DevkerError> {
        Self::resolve(prefix, |name| vars.get(name).cloned())
    }

    /// Resolve from any variable lookup. Empty values count as unset.
    pub fn resolve<F>(prefix: &str, lookup: F) -> Result<Self, DevkerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| lookup(&format!("{}{}", prefix, suffix)).filter(|v| !v.is_empty());

        let port = var("PORT").unwrap_or_default();
        let super_connection = ConnectionDescriptor {
            dbname: var("SUPER_DB").unwrap_or_else(|| DEFAULT_SUPER_DB.to_string()),
            username: var("SUPER_USER").unwrap_or_else(|| DEFAULT_SUPER_USER.to_string()),
            password: var("SUPER_PASSWORD").unwrap_or_default(),
            host: DEFAULT_HOST.to_string(),
            port: port.clone(),
        };

        let (connections_var, raw) = match var("CONNECTIONS") {
            Some(raw) => (format!("{}CONNECTIONS", prefix), Some(raw)),
            None => (format!("{}connections", prefix), var("connections")),
        };

        let literals: Vec<String> = match raw {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                DevkerError::Configuration(format!(
                    "{} must be a JSON array of connection strings: {}",
                    connections_var, e
                ))
            })?,
            None => Vec::new(),
        };
        debug!(
            "Resolved {} application connection(s) from {}",
            literals.len(),
            connections_var
        );

        let mut connections = Vec::with_capacity(literals.len() + 1);
        connections.push(super_connection.clone());
        for literal in &literals {
            let parsed = ConnectionDescriptor::parse(literal)?;
            connections.push(ConnectionDescriptor {
                host: non_empty_or(parsed.host, &super_connection.host),
                port: non_empty_or(parsed.port, &super_connection.port),
                ..parsed
            });
        }

        Ok(Self {
            port,
            super_connection,
            connections,
        })
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

/// Default variable prefix for a service: `postgres` becomes `DEVKER_POSTGRES_`
pub fn env_prefix_for_service(service: &str) -> String {
    format!("{}_", constant_case(&format!("{}_{}", ENV_PREFIX_ROOT, service)))
}

fn constant_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev: Option<char> = None;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if ch.is_ascii_uppercase()
                && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
            {
                out.push('_');
            }
            out.push(ch.to_ascii_uppercase());
            prev = Some(ch);
        } else {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            prev = None;
        }
    }
    out.trim_end_matches('_').to_string()
}
