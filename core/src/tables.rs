// src/tables.rs

//! Static QR-token to table-name lookup for dine-in orders.
//!
//! The backing file maps table names to tokens (`{"Table 1": "a1b2c3"}`), the
//! direction operators edit it in. It is inverted once at load time. A missing
//! or unreadable file never prevents startup: the registry comes up
//! [`TableRegistry::Degraded`] and every dine-in lookup fails with the reason.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub enum TableRegistry {
  /// token -> table name
  Loaded(HashMap<String, String>),
  Degraded(String),
}

impl TableRegistry {
  pub fn load(path: impl AsRef<Path>) -> Self {
    let path = path.as_ref();
    let raw = match std::fs::read_to_string(path) {
      Ok(raw) => raw,
      Err(e) => {
        let reason = format!("cannot read table file '{}': {}", path.display(), e);
        warn!(%reason, "Table registry degraded; dine-in orders will be rejected.");
        return TableRegistry::Degraded(reason);
      }
    };

    let by_name: BTreeMap<String, String> = match serde_json::from_str(&raw) {
      Ok(map) => map,
      Err(e) => {
        let reason = format!("table file '{}' is not a JSON object of strings: {}", path.display(), e);
        warn!(%reason, "Table registry degraded; dine-in orders will be rejected.");
        return TableRegistry::Degraded(reason);
      }
    };

    let registry = Self::from_pairs(by_name);
    if registry.is_empty() {
      warn!(path = %path.display(), "Table file lists no tables; dine-in orders will be rejected.");
    } else {
      info!(path = %path.display(), tables = registry.len(), "Table registry loaded.");
    }
    registry
  }

  /// Builds a loaded registry from `(table name, token)` pairs. Blank tokens are
  /// ignored; when two tables share a token the first one wins.
  pub fn from_pairs<I, N, T>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (N, T)>,
    N: Into<String>,
    T: Into<String>,
  {
    let mut by_token = HashMap::new();
    for (name, token) in pairs {
      let name = name.into();
      let token = token.into().trim().to_string();
      if token.is_empty() {
        warn!(table = %name, "Skipping table with a blank token.");
        continue;
      }
      if let Some(existing) = by_token.get(&token) {
        warn!(table = %name, kept = %existing, "Duplicate table token, keeping the first table.");
        continue;
      }
      by_token.insert(token, name);
    }
    TableRegistry::Loaded(by_token)
  }

  /// Resolves a QR token to its table name.
  ///
  /// Unknown tokens are a client error. A degraded registry is a server-side
  /// fault and reports why it could not be loaded.
  pub fn resolve(&self, token: &str) -> Result<&str> {
    match self {
      TableRegistry::Loaded(by_token) => by_token
        .get(token.trim())
        .map(String::as_str)
        .ok_or_else(|| Error::Validation(format!("Unknown table token '{}'", token))),
      TableRegistry::Degraded(reason) => Err(Error::Internal(format!("Table registry unavailable: {}", reason))),
    }
  }

  pub fn is_degraded(&self) -> bool {
    matches!(self, TableRegistry::Degraded(_))
  }

  pub fn len(&self) -> usize {
    match self {
      TableRegistry::Loaded(by_token) => by_token.len(),
      TableRegistry::Degraded(_) => 0,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  #[test]
  fn inverts_name_to_token_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"Table 1": "qr-001", "Table 2": "qr-002"}}"#).unwrap();

    let registry = TableRegistry::load(file.path());
    assert!(!registry.is_degraded());
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.resolve("qr-002").unwrap(), "Table 2");
  }

  #[test]
  fn missing_file_degrades_instead_of_failing() {
    let dir = tempfile::tempdir().unwrap();
    let registry = TableRegistry::load(dir.path().join("absent.json"));

    assert!(registry.is_degraded());
    match registry.resolve("qr-001") {
      Err(Error::Internal(msg)) => assert!(msg.contains("absent.json")),
      other => panic!("expected Internal, got {:?}", other),
    }
  }

  #[test]
  fn corrupt_file_degrades() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[1, 2, 3]").unwrap();

    assert!(TableRegistry::load(file.path()).is_degraded());
  }

  #[test]
  fn empty_file_loads_with_no_tables() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{}}").unwrap();

    let registry = TableRegistry::load(file.path());
    assert!(!registry.is_degraded());
    assert!(registry.is_empty());
    assert!(matches!(registry.resolve("qr-001"), Err(Error::Validation(_))));
  }

  #[test]
  fn unknown_token_is_a_validation_error() {
    let registry = TableRegistry::from_pairs([("Table 1", "qr-001")]);
    assert!(matches!(registry.resolve("nope"), Err(Error::Validation(_))));
  }

  #[test]
  fn duplicate_and_blank_tokens_are_skipped() {
    let registry = TableRegistry::from_pairs([("A", "same"), ("B", "same"), ("C", "  ")]);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.resolve("same").unwrap(), "A");
  }
}
