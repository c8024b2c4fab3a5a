//! Build and install paths of updatable boot jars.
//!
//! Updatable boot jars are on the boot classpath but are never compiled into
//! the boot image. Their build paths are predefined here so that dexpreopt
//! rules can refer to them before the modules that produce them are
//! processed; the jars are copied to these paths later.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::context::{DexpreoptContext, OnceKey};
use crate::config::GlobalConfig;
use crate::consts::UPDATABLE_BOOTJARS_DIR;
use crate::jars::JarList;
use crate::platform::Os;

static UPDATABLE_BOOT_CONFIG_KEY: OnceKey<UpdatableBootConfig> = OnceKey::new("updatableBootConfig");

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatableBootConfig {
  pub modules: JarList,
  /// Predefined build paths, one per module.
  pub dex_paths: Vec<PathBuf>,
  /// On-device classpath locations, one per module.
  pub dex_locations: Vec<String>,
}

impl UpdatableBootConfig {
  pub fn from_config(config: &GlobalConfig) -> Self {
    let modules = config.updatable_boot_jars.clone();
    let dir = config.device_dir().join(UPDATABLE_BOOTJARS_DIR);
    let dex_paths = modules.build_paths(&dir);
    let dex_locations = modules.device_paths(Os::Android, &config.host_install_root());
    Self {
      modules,
      dex_paths,
      dex_locations,
    }
  }
}

/// Memoised updatable boot config for the context's configuration.
pub fn updatable_boot_config(ctx: &DexpreoptContext) -> Arc<UpdatableBootConfig> {
  ctx.once(&UPDATABLE_BOOT_CONFIG_KEY, || {
    let config = UpdatableBootConfig::from_config(ctx.config());
    debug!(modules = config.modules.len(), "derived updatable boot config");
    config
  })
}
