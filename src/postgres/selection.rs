use itertools::Itertools;

use super::connection::ConnectionDescriptor;
use super::env::PostgresEnv;
use crate::error::DevkerError;

/// Pick the connections a command should act on.
///
/// With no requested names every connection is selected once, in declared
/// order. Otherwise the requested names are matched exactly, in the order
/// first given. A single missing name fails the whole selection.
pub fn select_connections<S: AsRef<str>>(
    env: &PostgresEnv,
    requested: &[S],
) -> Result<Vec<ConnectionDescriptor>, DevkerError> {
    let names: Vec<&str> = if requested.is_empty() {
        env.connections
            .iter()
            .map(|c| c.dbname.as_str())
            .unique()
            .collect()
    } else {
        requested.iter().map(|name| name.as_ref()).unique().collect()
    };

    names
        .into_iter()
        .map(|dbname| {
            env.connections
                .iter()
                .find(|c| c.dbname == dbname)
                .cloned()
                .ok_or_else(|| {
                    DevkerError::Selection(format!(
                        "Unable to find connection with db \"{}\"",
                        dbname
                    ))
                })
        })
        .collect()
}
