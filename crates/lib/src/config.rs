//! Global dexpreopt configuration.
//!
//! The configuration is read once per build invocation from a JSON file. Jar
//! lists are written as `"namespace:module"` strings:
//!
//! ```json
//! {
//!   "device_name": "generic_arm64",
//!   "art_apex_jars": ["com.android.art:core-oj", "com.android.art:core-libart"],
//!   "boot_jars": ["com.android.art:core-oj", "com.android.art:core-libart", "platform:framework"],
//!   "updatable_boot_jars": ["com.android.conscrypt:conscrypt"],
//!   "system_server_jars": ["services", "ethernet-service"],
//!   "updatable_system_server_jars": ["com.android.permission:service-permission"],
//!   "targets": [{ "os": "android", "arch": "arm64" }, { "os": "linux_glibc", "arch": "x86_64" }]
//! }
//! ```
//!
//! `OUT_DIR` in the environment overrides `out_dir`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{DEFAULT_OUT_DIR, OUT_DIR_ENV};
use crate::jars::JarList;
use crate::platform::{Os, Target};
use crate::util::hash::{HashError, Hashable};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("invalid config: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("failed to hash config: {0}")]
  Hash(#[source] HashError),

  #[error("host_os must be a host OS, got '{0}'")]
  DeviceHostOs(Os),
}

fn default_out_dir() -> PathBuf {
  PathBuf::from(DEFAULT_OUT_DIR)
}

fn default_host_os() -> Os {
  Os::LinuxGlibc
}

/// Inputs to the boot image derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
  /// Stable device identifier used to namespace output directories.
  pub device_name: String,

  #[serde(default = "default_out_dir")]
  pub out_dir: PathBuf,

  /// Jars of the primary (ART) boot image, in boot classpath order.
  #[serde(default)]
  pub art_apex_jars: JarList,

  /// All non-updatable boot jars, a superset of `art_apex_jars`.
  #[serde(default)]
  pub boot_jars: JarList,

  /// Boot jars compiled independently of the boot image.
  #[serde(default)]
  pub updatable_boot_jars: JarList,

  /// Module names of the non-updatable system server jars.
  #[serde(default)]
  pub system_server_jars: Vec<String>,

  /// System server jars supplied by updatable units.
  #[serde(default)]
  pub updatable_system_server_jars: JarList,

  /// The full target matrix, across device and host OSes.
  #[serde(default)]
  pub targets: Vec<Target>,

  /// OS of the build host.
  #[serde(default = "default_host_os")]
  pub host_os: Os,
}

impl GlobalConfig {
  /// Reads a config file and applies environment overrides.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let mut config = Self::from_json(&content)?;
    config.apply_env_overrides();
    debug!(path = %path.display(), device = %config.device_name, "loaded global config");
    Ok(config)
  }

  /// Parses a config. `host_os` must name a host OS.
  pub fn from_json(content: &str) -> Result<Self, ConfigError> {
    let config: Self = serde_json::from_str(content)?;
    if !config.host_os.is_host() {
      return Err(ConfigError::DeviceHostOs(config.host_os));
    }
    Ok(config)
  }

  pub fn apply_env_overrides(&mut self) {
    if let Some(out_dir) = std::env::var_os(OUT_DIR_ENV).filter(|v| !v.is_empty()) {
      self.out_dir = PathBuf::from(out_dir);
    }
  }

  /// Output directory for everything derived for this device.
  pub fn device_dir(&self) -> PathBuf {
    self.out_dir.join("soong").join(&self.device_name)
  }

  /// Root of the unpacked system image used by host-side runtimes.
  pub fn host_install_root(&self) -> PathBuf {
    self.out_dir.join("host").join(self.host_os.prebuilt_tag())
  }

  /// Targets configured for `os`, in matrix order.
  pub fn targets_for(&self, os: Os) -> impl Iterator<Item = &Target> {
    self.targets.iter().filter(move |t| t.os == os)
  }
}

impl Hashable for GlobalConfig {}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::Arch;
  use serial_test::serial;
  use tempfile::TempDir;

  const MINIMAL: &str = r#"{ "device_name": "generic" }"#;

  #[test]
  fn minimal_config_uses_defaults() {
    let config = GlobalConfig::from_json(MINIMAL).unwrap();
    assert_eq!(config.out_dir, PathBuf::from("out"));
    assert_eq!(config.host_os, Os::LinuxGlibc);
    assert!(config.boot_jars.is_empty());
    assert!(config.targets.is_empty());
  }

  #[test]
  #[serial]
  fn empty_out_dir_env_is_ignored() {
    temp_env::with_var(OUT_DIR_ENV, Some(""), || {
      let mut config = GlobalConfig::from_json(MINIMAL).unwrap();
      config.apply_env_overrides();
      assert_eq!(config.out_dir, PathBuf::from("out"));
    });
  }

  #[test]
  fn device_and_host_roots() {
    let config = GlobalConfig::from_json(MINIMAL).unwrap();
    assert_eq!(config.device_dir(), PathBuf::from("out/soong/generic"));
    assert_eq!(config.host_install_root(), PathBuf::from("out/host/linux-x86"));
  }

  #[test]
  fn targets_for_filters_by_os() {
    let config = GlobalConfig::from_json(
      r#"{
        "device_name": "generic",
        "targets": [
          { "os": "android", "arch": "arm64" },
          { "os": "linux_glibc", "arch": "x86_64" },
          { "os": "android", "arch": "arm" }
        ]
      }"#,
    )
    .unwrap();
    let android: Vec<_> = config.targets_for(Os::Android).map(|t| t.arch).collect();
    assert_eq!(android, vec![Arch::Arm64, Arch::Arm]);
  }

  #[test]
  fn device_host_os_is_rejected() {
    let err = GlobalConfig::from_json(r#"{ "device_name": "generic", "host_os": "android" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::DeviceHostOs(Os::Android)));
    assert_eq!(err.to_string(), "host_os must be a host OS, got 'android'");
  }

  #[test]
  fn malformed_jar_pair_is_a_parse_error() {
    let err = GlobalConfig::from_json(r#"{ "device_name": "generic", "boot_jars": ["framework"] }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().contains("expected format"));
  }

  #[test]
  #[serial]
  fn load_reads_file_and_env_override() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("dexpreopt.json");
    fs::write(&path, MINIMAL).unwrap();

    temp_env::with_var(OUT_DIR_ENV, Some("/custom/out"), || {
      let config = GlobalConfig::load(&path).unwrap();
      assert_eq!(config.out_dir, PathBuf::from("/custom/out"));
      assert_eq!(config.device_dir(), PathBuf::from("/custom/out/soong/generic"));
    });
  }

  #[test]
  fn load_missing_file_names_path() {
    let err = GlobalConfig::load(Path::new("/nonexistent/dexpreopt.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("/nonexistent/dexpreopt.json"));
  }

  #[test]
  fn hash_is_stable_and_content_sensitive() {
    let a = GlobalConfig::from_json(MINIMAL).unwrap();
    let mut b = a.clone();
    assert_eq!(a.compute_hash().unwrap(), b.compute_hash().unwrap());

    b.device_name = "other".to_string();
    assert_ne!(a.compute_hash().unwrap(), b.compute_hash().unwrap());
  }
}
