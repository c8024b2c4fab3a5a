use anyhow::Result;
use dexboot_lib::dexpreopt::{DexpreoptContext, bcp_for_dexpreopt};

use crate::output::{OutputFormat, print_json, symbols};

pub fn cmd_classpath(ctx: &DexpreoptContext, with_updatable: bool, format: OutputFormat) -> Result<()> {
  let bcp = bcp_for_dexpreopt(ctx, with_updatable)?;

  if format.is_json() {
    return print_json(&bcp);
  }

  for (path, location) in bcp.dex_paths.iter().zip(&bcp.dex_locations) {
    println!("{} {} {}", path.display(), symbols::ARROW, location);
  }
  Ok(())
}
