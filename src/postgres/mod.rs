//! Postgres connection model and remote housekeeping

pub mod connection;
pub mod env;
pub mod remote;
pub mod selection;
pub mod sql;

pub use connection::ConnectionDescriptor;
pub use env::{PostgresEnv, env_prefix_for_service};
pub use remote::{PostgresRemote, TemporaryDatabase};
pub use selection::select_connections;
