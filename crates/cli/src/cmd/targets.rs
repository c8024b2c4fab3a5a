use anyhow::Result;
use dexboot_lib::dexpreopt::{DexpreoptContext, dexpreopt_targets};

use crate::output::{OutputFormat, print_info, print_json, symbols};

pub fn cmd_targets(ctx: &DexpreoptContext, format: OutputFormat) -> Result<()> {
  let targets = dexpreopt_targets(ctx);

  if format.is_json() {
    return print_json(&*targets);
  }

  if targets.is_empty() {
    print_info("No dexpreopt targets configured.");
    return Ok(());
  }
  for target in targets.iter() {
    println!("  {} {}", symbols::INFO, target);
  }
  Ok(())
}
