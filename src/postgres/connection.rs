use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::DevkerError;

/// `[scheme://][username[:password]@]host[:port]/dbname[?query]`
static CONNECTION_STRING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:.*?//)?(?:(?P<username>[^:@]*)?(?::(?P<password>[^@]*))?@)?(?P<host>[^:/]+)(?::(?P<port>\d+))?/(?P<dbname>[^?]+)",
    )
    .expect("connection string pattern is valid")
});

/// Resolved identity of one target database.
///
/// Empty `username`, `password` or `port` mean "not specified"; the
/// operation then falls back to the super user session or the server default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    pub dbname: String,
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: String,
}

impl ConnectionDescriptor {
    /// Parse a connection string literal
    pub fn parse(input: &str) -> Result<Self, DevkerError> {
        let captures = CONNECTION_STRING_RE.captures(input).ok_or_else(|| {
            DevkerError::Configuration(format!("Unable to parse connection string: {}", input))
        })?;
        let group = |name: &str| {
            captures
                .name(name)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        };

        Ok(Self {
            dbname: group("dbname"),
            username: group("username"),
            password: group("password"),
            host: group("host"),
            port: group("port"),
        })
    }
}

impl fmt::Display for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.dbname
        )
    }
}
