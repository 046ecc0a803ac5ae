// External binaries
pub const COMPOSE_BIN: &str = "docker-compose";

// Service defaults
pub const DEFAULT_POSTGRES_SERVICE: &str = "postgres";
pub const ENV_PREFIX_ROOT: &str = "DEVKER";

// Super connection defaults
pub const DEFAULT_SUPER_DB: &str = "postgres";
pub const DEFAULT_SUPER_USER: &str = "postgres";
pub const DEFAULT_HOST: &str = "localhost";

// Dump layout inside the database container
pub const DUMP_ROOT: &str = "/root/db-dumps";
pub const DEFAULT_RESTORE_NAME: &str = "latest";
pub const DUMP_NAME_PREFIX: &str = "dump-";

// Scratch database naming
pub const TEMP_DB_PREFIX: &str = "tmpdb_";
pub const TEMP_DB_ID_LEN: usize = 8;

// Env files loaded from the project directory, highest precedence first
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];
