use anyhow::Result;
use dexboot_lib::dexpreopt::{DexpreoptContext, dexpreopt_config_make_vars};

use crate::output::{OutputFormat, print_json};

pub fn cmd_make_vars(ctx: &DexpreoptContext, format: OutputFormat) -> Result<()> {
  let vars = dexpreopt_config_make_vars(ctx)?;

  if format.is_json() {
    let map: serde_json::Map<String, serde_json::Value> = vars
      .iter()
      .map(|var| (var.name.to_string(), serde_json::Value::String(var.value.clone())))
      .collect();
    return print_json(&map);
  }

  for var in &vars {
    println!("{var}");
  }
  Ok(())
}
