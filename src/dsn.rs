//! Data source name handling for the MySQL/MariaDB connection.
//!
//! The descriptor format follows the classic MySQL client convention:
//! `user:password@tcp(host:port)/dbname?charset=...&parseTime=...`, with the
//! `tcp(host:port)` segment omitted entirely when the port is the stock
//! `3306` (the driver then connects to its default endpoint).

use sqlx::mysql::MySqlConnectOptions;
use std::fmt;

use crate::error::SnippetboxError;

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: &str = "3306";
pub const DEFAULT_DB_USER: &str = "web";
pub const DEFAULT_DB_PASSWORD: &str = "pass";
pub const DEFAULT_DB_NAME: &str = "snippetbox";
pub const DEFAULT_DB_CHARSET: &str = "utf8mb4";
pub const DEFAULT_DB_PARSE_TIME: &str = "true";

/// Structured form of the connection descriptor.
///
/// `port` and `parse_time` stay as strings: the port participates in the
/// descriptor format as text (the `3306` comparison is textual), and
/// `parseTime` is carried for descriptor compatibility only — timestamp
/// decoding is inherent to the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dsn {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: String,
    pub name: String,
    pub charset: String,
    pub parse_time: String,
}

impl Default for Dsn {
    fn default() -> Self {
        Self {
            user: DEFAULT_DB_USER.to_string(),
            password: DEFAULT_DB_PASSWORD.to_string(),
            host: DEFAULT_DB_HOST.to_string(),
            port: DEFAULT_DB_PORT.to_string(),
            name: DEFAULT_DB_NAME.to_string(),
            charset: DEFAULT_DB_CHARSET.to_string(),
            parse_time: DEFAULT_DB_PARSE_TIME.to_string(),
        }
    }
}

impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.port == DEFAULT_DB_PORT {
            write!(
                f,
                "{user}:{password}@/{name}?charset={charset}&parseTime={parse_time}",
                user = self.user,
                password = self.password,
                name = self.name,
                charset = self.charset,
                parse_time = self.parse_time,
            )
        } else {
            write!(
                f,
                "{user}:{password}@tcp({host}:{port})/{name}?charset={charset}&parseTime={parse_time}",
                user = self.user,
                password = self.password,
                host = self.host,
                port = self.port,
                name = self.name,
                charset = self.charset,
                parse_time = self.parse_time,
            )
        }
    }
}

impl Dsn {
    /// Parses a descriptor in either of the two accepted shapes.
    ///
    /// Components left out of the descriptor fall back to the documented
    /// defaults; only the database name is mandatory. Unrecognized query
    /// parameters are ignored.
    pub fn parse(input: &str) -> Result<Self, SnippetboxError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SnippetboxError::InvalidDsn("empty descriptor".into()));
        }

        let (main, query) = match input.split_once('?') {
            Some((m, q)) => (m, Some(q)),
            None => (input, None),
        };

        let (credentials, address) = match main.rsplit_once('@') {
            Some((c, a)) => (Some(c), a),
            None => (None, main),
        };

        let mut dsn = Dsn::default();

        if let Some(credentials) = credentials {
            match credentials.split_once(':') {
                Some((user, password)) => {
                    dsn.user = user.to_string();
                    dsn.password = password.to_string();
                }
                None => dsn.user = credentials.to_string(),
            }
            if dsn.user.is_empty() {
                return Err(SnippetboxError::InvalidDsn("empty user".into()));
            }
        }

        let name = if let Some(name) = address.strip_prefix('/') {
            name
        } else {
            let Some((endpoint, name)) = address.split_once('/') else {
                return Err(SnippetboxError::InvalidDsn(
                    "missing database name".into(),
                ));
            };
            let endpoint = endpoint
                .strip_prefix("tcp(")
                .and_then(|e| e.strip_suffix(')'))
                .ok_or_else(|| {
                    SnippetboxError::InvalidDsn(format!(
                        "unsupported network segment: {endpoint}"
                    ))
                })?;
            match endpoint.rsplit_once(':') {
                Some((host, port)) => {
                    if host.is_empty() || port.is_empty() {
                        return Err(SnippetboxError::InvalidDsn(format!(
                            "malformed endpoint: {endpoint}"
                        )));
                    }
                    dsn.host = host.to_string();
                    dsn.port = port.to_string();
                }
                None if endpoint.is_empty() => {}
                None => dsn.host = endpoint.to_string(),
            }
            name
        };
        if name.is_empty() {
            return Err(SnippetboxError::InvalidDsn("missing database name".into()));
        }
        dsn.name = name.to_string();

        if let Some(query) = query {
            for pair in query.split('&').filter(|p| !p.is_empty()) {
                let (key, value) = pair.split_once('=').ok_or_else(|| {
                    SnippetboxError::InvalidDsn(format!("malformed parameter: {pair}"))
                })?;
                match key {
                    "charset" => dsn.charset = value.to_string(),
                    "parseTime" => dsn.parse_time = value.to_string(),
                    _ => {}
                }
            }
        }

        Ok(dsn)
    }

    /// Converts the descriptor into driver connect options.
    pub fn connect_options(&self) -> Result<MySqlConnectOptions, SnippetboxError> {
        let port: u16 = self.port.parse().map_err(|_| {
            SnippetboxError::InvalidDsn(format!("invalid port: {}", self.port))
        })?;
        Ok(MySqlConnectOptions::new()
            .host(&self.host)
            .port(port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .charset(&self.charset))
    }
}
