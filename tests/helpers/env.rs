//! Fixtures for Postgres workflow tests

use devker::config::{DumpConfig, OutputMode, PostgresTarget, RestoreConfig};
use devker::postgres::PostgresEnv;
use std::collections::HashMap;
use std::path::PathBuf;

pub const PREFIX: &str = "DEVKER_POSTGRES_";

/// Environment with a super password and the given connection literals
pub fn postgres_env(connections: &[&str]) -> PostgresEnv {
    let literals = serde_json::to_string(connections).unwrap();
    let vars = HashMap::from([
        (format!("{}SUPER_PASSWORD", PREFIX), "root".to_string()),
        (format!("{}PORT", PREFIX), "5432".to_string()),
        (format!("{}CONNECTIONS", PREFIX), literals),
    ]);
    PostgresEnv::from_vars(PREFIX, &vars).unwrap()
}

pub fn target() -> PostgresTarget {
    PostgresTarget {
        service: "postgres".to_string(),
        env_prefix: PREFIX.to_string(),
        cwd: PathBuf::from("/srv/project"),
    }
}

pub fn dump_config(databases: &[&str], filename: Option<&str>) -> DumpConfig {
    DumpConfig {
        target: target(),
        databases: databases.iter().map(|d| d.to_string()).collect(),
        filename: filename.map(str::to_string),
        gzip: true,
    }
}

pub fn restore_config(databases: &[&str]) -> RestoreConfig {
    RestoreConfig {
        target: target(),
        databases: databases.iter().map(|d| d.to_string()).collect(),
        filename: "latest".to_string(),
        username: None,
        output: OutputMode::default(),
        gzip: true,
    }
}
