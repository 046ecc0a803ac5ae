pub mod compose;
pub mod env;
pub mod generate;
pub mod init;
pub mod postgres;

// Re-export all command functions
pub use compose::{cmd_bash, cmd_compose, cmd_destroy, cmd_down, cmd_ssh, cmd_up};
pub use env::cmd_print_env;
pub use generate::{cmd_generate_password, cmd_generate_uuid};
pub use init::cmd_init;
pub use postgres::{
    cmd_postgres_dump, cmd_postgres_kill_connections, cmd_postgres_list_connections,
    cmd_postgres_psql, cmd_postgres_restore,
};
