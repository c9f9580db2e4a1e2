use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::dsn::{
    DEFAULT_DB_CHARSET, DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_PARSE_TIME,
    DEFAULT_DB_PASSWORD, DEFAULT_DB_PORT, DEFAULT_DB_USER, Dsn,
};

const DEFAULT_APP_PORT: &str = "4000";
const DEFAULT_LOGLEVEL: &str = "info";

/// Application configuration managed by Figment.
///
/// Every field resolves env var → documented default; a variable that is set
/// but blank behaves as if it were unset.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// HTTP listen port, prefixed with `:` to form the bind address.
    /// Env: `APP_PORT`. Default: `4000`.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub app_port: String,

    /// Database server host.
    /// Env: `DB_HOST`. Default: `localhost`.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub db_host: String,

    /// Database server port. The descriptor omits the `host:port` segment
    /// when this equals the stock `3306`.
    /// Env: `DB_PORT`. Default: `3306`.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub db_port: String,

    /// Database user.
    /// Env: `DB_USER`. Default: `web`.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub db_user: String,

    /// Database password.
    /// Env: `DB_PASSWORD`. Default: `pass`.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub db_password: String,

    /// Database name.
    /// Env: `DB_NAME`. Default: `snippetbox`.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub db_name: String,

    /// Connection character set.
    /// Env: `DB_CHARSET`. Default: `utf8mb4`.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub db_charset: String,

    /// Whether the driver should decode `DATETIME` columns into native
    /// timestamps. Carried in the descriptor for driver compatibility.
    /// Env: `DB_PARSE_TIME`. Default: `true`.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub db_parse_time: String,

    /// Log level for tracing subscriber initialization (e.g., "error",
    /// "warn", "info", "debug", "trace").
    /// Env: `LOGLEVEL`. Default: `info`.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_port: DEFAULT_APP_PORT.to_string(),
            db_host: DEFAULT_DB_HOST.to_string(),
            db_port: DEFAULT_DB_PORT.to_string(),
            db_user: DEFAULT_DB_USER.to_string(),
            db_password: DEFAULT_DB_PASSWORD.to_string(),
            db_name: DEFAULT_DB_NAME.to_string(),
            db_charset: DEFAULT_DB_CHARSET.to_string(),
            db_parse_time: DEFAULT_DB_PARSE_TIME.to_string(),
            loglevel: DEFAULT_LOGLEVEL.to_string(),
        }
    }
}

impl Config {
    /// Builds a Figment that merges defaults and environment variables.
    /// Uses raw env mapping, so field names map to env vars in
    /// UPPER_SNAKE_CASE.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Env::raw())
    }

    /// Loads configuration from the environment and substitutes the
    /// documented default for any blank field.
    pub fn from_env() -> Self {
        let cfg: Self = Self::figment()
            .extract()
            .expect("failed to extract configuration via Figment");
        cfg.normalized()
    }

    fn normalized(self) -> Self {
        Self {
            app_port: non_blank(self.app_port, DEFAULT_APP_PORT),
            db_host: non_blank(self.db_host, DEFAULT_DB_HOST),
            db_port: non_blank(self.db_port, DEFAULT_DB_PORT),
            db_user: non_blank(self.db_user, DEFAULT_DB_USER),
            db_password: non_blank(self.db_password, DEFAULT_DB_PASSWORD),
            db_name: non_blank(self.db_name, DEFAULT_DB_NAME),
            db_charset: non_blank(self.db_charset, DEFAULT_DB_CHARSET),
            db_parse_time: non_blank(self.db_parse_time, DEFAULT_DB_PARSE_TIME),
            loglevel: non_blank(self.loglevel, DEFAULT_LOGLEVEL),
        }
    }

    /// The bind address derived from `app_port`, in `:<port>` form.
    pub fn listen_addr(&self) -> String {
        format!(":{}", self.app_port)
    }

    /// The connection descriptor derived from the `DB_*` fields.
    pub fn dsn(&self) -> String {
        Dsn {
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            host: self.db_host.clone(),
            port: self.db_port.clone(),
            name: self.db_name.clone(),
            charset: self.db_charset.clone(),
            parse_time: self.db_parse_time.clone(),
        }
        .to_string()
    }
}

/// Environment values arrive through Figment as loosely typed data (a port
/// shows up as a number, `DB_PARSE_TIME` as a bool); fold them back into the
/// string form the resolver works with.
fn deserialize_string_lax<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;

    match v {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(serde::de::Error::custom(
            "expected a string, number, or bool",
        )),
    }
}

fn non_blank(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

/// Command-line overrides. Flags beat the environment-derived values.
#[derive(Parser, Debug, Default)]
#[command(name = "snippetbox", version)]
pub struct Cli {
    /// HTTP network address
    #[arg(long, value_name = "ADDR")]
    pub addr: Option<String>,

    /// MariaDB data source name
    #[arg(long, value_name = "DSN")]
    pub dsn: Option<String>,
}

/// Final resolved settings: default < environment < explicit flag.
#[derive(Debug, Clone)]
pub struct Settings {
    pub addr: String,
    pub dsn: String,
    pub loglevel: String,
}

impl Settings {
    pub fn resolve(config: &Config, cli: Cli) -> Self {
        Self {
            addr: cli.addr.unwrap_or_else(|| config.listen_addr()),
            dsn: cli.dsn.unwrap_or_else(|| config.dsn()),
            loglevel: config.loglevel.clone(),
        }
    }

    /// The address handed to the TCP listener. A bare `:<port>` address
    /// binds every interface.
    pub fn bind_target(&self) -> String {
        if self.addr.starts_with(':') {
            format!("0.0.0.0{}", self.addr)
        } else {
            self.addr.clone()
        }
    }
}
