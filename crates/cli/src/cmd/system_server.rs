use anyhow::Result;
use dexboot_lib::dexpreopt::{DexpreoptContext, system_server_classpath};

use crate::output::{OutputFormat, print_json};

pub fn cmd_system_server(ctx: &DexpreoptContext, format: OutputFormat) -> Result<()> {
  let classpath = system_server_classpath(ctx)?;

  if format.is_json() {
    return print_json(&*classpath);
  }

  println!("{}", classpath.join(":"));
  Ok(())
}
