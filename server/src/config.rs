// src/config.rs

use crate::errors::{ApiError, Result};
use dotenvy::dotenv;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

impl FromStr for LogFormat {
  type Err = ApiError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "pretty" | "" => Ok(LogFormat::Pretty),
      "json" => Ok(LogFormat::Json),
      other => Err(ApiError::Config(format!("Invalid LOG_FORMAT '{}': expected 'pretty' or 'json'", other))),
    }
  }
}

#[derive(Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  /// Bearer token for administrative endpoints. Never has a default.
  pub admin_token: String,
  pub tables_file: PathBuf,
  pub uploads_dir: PathBuf,
  pub db_max_connections: u32,
  pub log_format: LogFormat,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|var_name| env::var(var_name).ok())
  }

  /// Builds the configuration from any variable source.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| {
      lookup(var_name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::Config(format!("Missing environment variable '{}'", var_name)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8081".to_string())
      .parse::<u16>()
      .map_err(|e| ApiError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;
    let admin_token = get_env("ADMIN_TOKEN")?;
    let tables_file = PathBuf::from(get_env("TABLES_FILE").unwrap_or_else(|_| "table.json".to_string()));
    let uploads_dir = PathBuf::from(get_env("UPLOADS_DIR").unwrap_or_else(|_| "./uploads".to_string()));
    let db_max_connections = get_env("DB_MAX_CONNECTIONS")
      .unwrap_or_else(|_| "5".to_string())
      .parse::<u32>()
      .ok()
      .filter(|n| *n > 0)
      .ok_or_else(|| ApiError::Config("Invalid DB_MAX_CONNECTIONS: expected a positive integer".to_string()))?;
    let log_format = get_env("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()).parse()?;

    Ok(Self {
      server_host,
      server_port,
      database_url,
      admin_token,
      tables_file,
      uploads_dir,
      db_max_connections,
      log_format,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

impl fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("database_url", &self.database_url)
      .field("admin_token", &"[REDACTED]")
      .field("tables_file", &self.tables_file)
      .field("uploads_dir", &self.uploads_dir)
      .field("db_max_connections", &self.db_max_connections)
      .field("log_format", &self.log_format)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name: &str| vars.get(name).cloned()
  }

  #[test]
  fn defaults_apply_when_only_required_vars_are_set() {
    let cfg = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "sqlite://amur.db"), ("ADMIN_TOKEN", "s3cret")])).unwrap();

    assert_eq!(cfg.bind_address(), "127.0.0.1:8081");
    assert_eq!(cfg.tables_file, PathBuf::from("table.json"));
    assert_eq!(cfg.uploads_dir, PathBuf::from("./uploads"));
    assert_eq!(cfg.db_max_connections, 5);
    assert_eq!(cfg.log_format, LogFormat::Pretty);
  }

  #[test]
  fn admin_token_has_no_default() {
    let err = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "sqlite://amur.db")])).unwrap_err();
    assert!(matches!(err, ApiError::Config(ref m) if m.contains("ADMIN_TOKEN")));

    let blank = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "sqlite://amur.db"), ("ADMIN_TOKEN", "  ")]));
    assert!(blank.is_err());
  }

  #[test]
  fn invalid_values_are_config_errors() {
    let base = [("DATABASE_URL", "sqlite://amur.db"), ("ADMIN_TOKEN", "s3cret")];
    for (name, value) in [("SERVER_PORT", "eighty"), ("DB_MAX_CONNECTIONS", "0"), ("LOG_FORMAT", "xml")] {
      let mut vars = base.to_vec();
      vars.push((name, value));
      assert!(matches!(AppConfig::from_lookup(lookup(&vars)), Err(ApiError::Config(_))), "{}", name);
    }
  }

  #[test]
  fn debug_output_redacts_the_admin_token() {
    let cfg = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "sqlite://amur.db"), ("ADMIN_TOKEN", "s3cret")])).unwrap();
    assert!(!format!("{:?}", cfg).contains("s3cret"));
  }
}
