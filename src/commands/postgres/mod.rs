//! `devker postgres ...` commands

pub mod connections;
pub mod dump;
pub mod paths;
pub mod restore;

pub use connections::{
    cmd_postgres_kill_connections, cmd_postgres_list_connections, cmd_postgres_psql,
};
pub use dump::cmd_postgres_dump;
pub use restore::cmd_postgres_restore;
