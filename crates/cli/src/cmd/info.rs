//! Info command implementation.
//!
//! Summarises the loaded configuration without deriving any boot images.

use std::path::Path;

use anyhow::Result;
use dexboot_lib::dexpreopt::DexpreoptContext;

use crate::output::{OutputFormat, print_json, print_stat, print_success};

pub fn cmd_info(ctx: &DexpreoptContext, path: &Path, format: OutputFormat) -> Result<()> {
  let config = ctx.config();

  if format.is_json() {
    let json_output = serde_json::json!({
      "config": path,
      "config_hash": ctx.config_hash(),
      "device_name": config.device_name,
      "out_dir": config.out_dir,
      "host_os": config.host_os,
      "art_apex_jars": config.art_apex_jars.len(),
      "boot_jars": config.boot_jars.len(),
      "updatable_boot_jars": config.updatable_boot_jars.len(),
      "system_server_jars": config.system_server_jars.len(),
      "updatable_system_server_jars": config.updatable_system_server_jars.len(),
      "targets": config.targets.len(),
    });
    return print_json(&json_output);
  }

  print_success(&format!("Config: {}", path.display()));
  print_stat("Hash", &ctx.config_hash().to_string());
  print_stat("Device", &config.device_name);
  print_stat("Out dir", &config.out_dir.display().to_string());
  print_stat("Host OS", config.host_os.as_str());
  println!();
  print_stat("ART jars", &config.art_apex_jars.len().to_string());
  print_stat("Boot jars", &config.boot_jars.len().to_string());
  print_stat("Updatable boot jars", &config.updatable_boot_jars.len().to_string());
  print_stat("System server jars", &config.system_server_jars.len().to_string());
  print_stat(
    "Updatable system server jars",
    &config.updatable_system_server_jars.len().to_string(),
  );
  print_stat("Targets", &config.targets.len().to_string());
  Ok(())
}
