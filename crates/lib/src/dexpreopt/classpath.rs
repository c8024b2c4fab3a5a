//! Runtime and compilation classpaths.
//!
//! Non-updatable jars always come before updatable ones. The runtime resolves
//! a class from the first jar on the classpath that defines it, and the
//! compiler must see the same order to produce code that is valid at runtime.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::bootimage::boot_image_configs;
use super::context::{DexpreoptContext, OnceKey};
use super::updatable::updatable_boot_config;
use crate::config::GlobalConfig;
use crate::consts::SYSTEM_FRAMEWORK_DIR;
use crate::error::DeriveError;
use crate::platform::Os;

static NON_UPDATABLE_SYSTEM_SERVER_JARS_KEY: OnceKey<Vec<String>> = OnceKey::new("nonUpdatableSystemServerJars");
static SYSTEM_SERVER_CLASSPATH_KEY: OnceKey<Result<Arc<Vec<String>>, DeriveError>> =
  OnceKey::new("systemServerClasspath");

/// System server modules that are not supplied by an updatable unit.
pub fn non_updatable_system_server_jars(ctx: &DexpreoptContext) -> Arc<Vec<String>> {
  ctx.once(&NON_UPDATABLE_SYSTEM_SERVER_JARS_KEY, || {
    let config = ctx.config();
    let updatable: HashSet<&str> = config.updatable_system_server_jars.modules().collect();
    config
      .system_server_jars
      .iter()
      .filter(|module| !updatable.contains(module.as_str()))
      .cloned()
      .collect()
  })
}

/// Builds the on-device system server classpath.
///
/// Non-updatable jars are installed in the system partition; updatable ones
/// are wherever their unit mounts them. The result must contain every
/// configured system server jar exactly once.
pub fn build_system_server_classpath(config: &GlobalConfig, non_updatable: &[String]) -> Result<Vec<String>, DeriveError> {
  let mut classpath: Vec<String> = non_updatable
    .iter()
    .map(|module| Path::new(SYSTEM_FRAMEWORK_DIR).join(format!("{module}.jar")).to_string_lossy().into_owned())
    .collect();
  classpath.extend(
    config
      .updatable_system_server_jars
      .device_paths(Os::Android, &config.host_install_root()),
  );

  let expected = config.system_server_jars.len() + config.updatable_system_server_jars.len();
  if classpath.len() != expected {
    return Err(DeriveError::SystemServerJarCount {
      expected,
      actual: classpath.len(),
    });
  }
  Ok(classpath)
}

/// Memoised on-device system server classpath.
pub fn system_server_classpath(ctx: &DexpreoptContext) -> Result<Arc<Vec<String>>, DeriveError> {
  ctx.try_once(&SYSTEM_SERVER_CLASSPATH_KEY, || {
    let non_updatable = non_updatable_system_server_jars(ctx);
    let classpath = build_system_server_classpath(ctx.config(), &non_updatable)?;
    debug!(entries = classpath.len(), "derived system server classpath");
    Ok(classpath)
  })
}

/// Boot classpath handed to the compiler: host build paths of the jars and
/// the matching on-device locations, in the same order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootClasspath {
  pub dex_paths: Vec<PathBuf>,
  pub dex_locations: Vec<String>,
}

/// Returns the boot classpath used when dexpreopting.
///
/// Without `with_updatable` this is exactly the jars of the default boot
/// image and its ancestors. With it, the updatable boot jars follow; they are
/// needed to compile apps but are not part of the image.
pub fn bcp_for_dexpreopt(ctx: &DexpreoptContext, with_updatable: bool) -> Result<BootClasspath, DeriveError> {
  let configs = boot_image_configs(ctx)?;
  let image = configs.default_image();

  let mut dex_paths = image.dex_paths_deps.clone();
  // Device locations do not depend on the architecture, so any device
  // variant will do.
  let mut dex_locations = match image.any_android_variant() {
    Some(variant) => variant.dex_locations_deps.clone(),
    None => configs
      .transitive_modules(image)
      .device_paths(Os::Android, &ctx.config().host_install_root()),
  };

  if with_updatable {
    let updatable = updatable_boot_config(ctx);
    dex_paths.extend(updatable.dex_paths.iter().cloned());
    dex_locations.extend(updatable.dex_locations.iter().cloned());
  }

  Ok(BootClasspath {
    dex_paths,
    dex_locations,
  })
}
