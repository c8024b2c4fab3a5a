mod classpath;
mod images;
mod info;
mod make_vars;
mod system_server;
mod targets;

use std::path::Path;

use anyhow::{Context, Result};
use dexboot_lib::GlobalConfig;
use dexboot_lib::dexpreopt::DexpreoptContext;
use tracing::debug;

pub use classpath::cmd_classpath;
pub use images::cmd_images;
pub use info::cmd_info;
pub use make_vars::cmd_make_vars;
pub use system_server::cmd_system_server;
pub use targets::cmd_targets;

/// Loads the global configuration and wraps it in a fresh derivation context.
pub fn load_context(path: &Path) -> Result<DexpreoptContext> {
  let config = GlobalConfig::load(path).with_context(|| format!("Failed to load config {}", path.display()))?;
  let ctx = DexpreoptContext::new(config).context("Failed to hash config")?;
  debug!(path = %path.display(), hash = %ctx.config_hash(), "loaded config");
  Ok(ctx)
}
