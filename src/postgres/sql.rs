//! SQL text for database and role housekeeping
//!
//! The SQL is piped to `psql` as opaque text. Identifiers and literals are
//! quoted here so odd database or role names cannot break out of the
//! statement.

use super::connection::ConnectionDescriptor;

pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

pub fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Terminate every other backend, optionally only those on one database
pub fn kill_connections_sql(dbname: Option<&str>) -> String {
    let filter = dbname
        .map(|name| format!(" AND datname = {}", quote_literal(name)))
        .unwrap_or_default();
    format!(
        "\n-- Kill all connections except this one\nSELECT pg_terminate_backend(pg_stat_activity.pid) FROM pg_stat_activity WHERE pid <> pg_backend_pid(){};\n",
        filter
    )
}

/// Kill connections to a database, then drop and create it empty
pub fn recreate_database_sql(dbname: &str) -> String {
    let ident = quote_ident(dbname);
    format!(
        "{}DROP DATABASE IF EXISTS {};\nCREATE DATABASE {};\n",
        kill_connections_sql(Some(dbname)),
        ident,
        ident
    )
}

/// Create the connection's role if missing and give it the database.
///
/// Returns `None` when the connection has no username.
pub fn initialize_role_sql(connection: &ConnectionDescriptor) -> Option<String> {
    if connection.username.is_empty() {
        return None;
    }
    let role = quote_ident(&connection.username);
    let database = quote_ident(&connection.dbname);

    let mut sql = format!(
        "\n--\n-- Create {role} user/role\n--\nDO $$ BEGIN IF NOT EXISTS (SELECT FROM pg_catalog.pg_roles WHERE rolname = {name}) THEN\n  CREATE ROLE {role};\nEND IF; END $$;\n",
        role = role,
        name = quote_literal(&connection.username),
    );
    if !connection.password.is_empty() {
        sql.push_str(&format!(
            "ALTER ROLE {} WITH PASSWORD {};\nALTER ROLE {} WITH LOGIN;\n",
            role,
            quote_literal(&connection.password),
            role
        ));
    }
    sql.push_str(&format!(
        "ALTER ROLE {role} WITH CREATEDB;\nALTER ROLE {role} WITH CREATEROLE;\nGRANT ALL PRIVILEGES ON DATABASE {database} TO {role};\n",
        role = role,
        database = database,
    ));
    Some(sql)
}
