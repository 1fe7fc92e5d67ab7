//! [`StoreConfig`] — where the database lives and how to open it.
//!
//! Loaded from an optional TOML file layered under `JOBSEARCH_*` environment
//! variables, e.g. `JOBSEARCH_PATH=~/jobs.db`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
  /// SQLite database file. A leading `~/` expands to `$HOME`.
  pub path:            PathBuf,
  /// How long to wait on a locked database before failing.
  pub busy_timeout_ms: u64,
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self { path: PathBuf::from("jobsearch.db"), busy_timeout_ms: 5_000 }
  }
}

impl StoreConfig {
  /// Read `file` (if given and present), then apply environment overrides.
  pub fn load(file: Option<&Path>) -> Result<Self> {
    let mut builder = config::Config::builder();
    if let Some(file) = file {
      builder = builder.add_source(config::File::from(file).required(false));
    }
    let settings = builder
      .add_source(config::Environment::with_prefix("JOBSEARCH"))
      .build()?;
    Ok(settings.try_deserialize()?)
  }

  /// [`path`](Self::path) with `~` expanded.
  pub fn resolved_path(&self) -> PathBuf { expand_tilde(&self.path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use super::*;

  #[test]
  fn defaults_apply_without_sources() {
    let cfg = StoreConfig::load(None).unwrap();
    assert_eq!(cfg.busy_timeout_ms, 5_000);
    assert!(!cfg.path.as_os_str().is_empty());
  }

  #[test]
  fn missing_file_is_not_an_error() {
    let cfg = StoreConfig::load(Some(Path::new("/nonexistent/jobsearch.toml"))).unwrap();
    assert_eq!(cfg.busy_timeout_ms, 5_000);
  }

  #[test]
  fn file_values_override_defaults() {
    let path = std::env::temp_dir().join(format!("jobsearch-config-{}.toml", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "path = \"/tmp/search.db\"\nbusy_timeout_ms = 250").unwrap();
    drop(file);

    let cfg = StoreConfig::load(Some(&path)).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.busy_timeout_ms, 250);
    assert_eq!(cfg.resolved_path(), PathBuf::from("/tmp/search.db"));
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    let expanded = expand_tilde(Path::new("~/jobs.db"));
    assert_eq!(expanded, PathBuf::from(home).join("jobs.db"));
    assert_eq!(expand_tilde(Path::new("/abs/jobs.db")), PathBuf::from("/abs/jobs.db"));
  }
}
