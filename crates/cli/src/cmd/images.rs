//! Images command implementation.
//!
//! Prints each boot image layer, its parent, and per-target image paths.

use anyhow::Result;
use dexboot_lib::dexpreopt::{BootImageConfig, BootImageConfigs, DexpreoptContext, boot_image_configs};

use crate::output::{OutputFormat, print_json, print_stat, print_success, symbols};

pub fn cmd_images(ctx: &DexpreoptContext, verbose: bool, format: OutputFormat) -> Result<()> {
  let configs = boot_image_configs(ctx)?;

  if format.is_json() {
    return print_json(&*configs);
  }

  for (i, image) in configs.iter().enumerate() {
    if i > 0 {
      println!();
    }
    print_image(&configs, image, verbose);
  }
  Ok(())
}

fn print_image(configs: &BootImageConfigs, image: &BootImageConfig, verbose: bool) {
  print_success(&format!("{} ({})", image.name, image.image_name()));
  match configs.parent(image) {
    Some(parent) => print_stat("Extends", &parent.name),
    None => print_stat("Extends", "-"),
  }
  print_stat("Modules", &image.modules.pairs().join(", "));
  print_stat("Dir", &image.dir.display().to_string());
  print_stat("Zip", &image.zip.display().to_string());

  for variant in &image.variants {
    println!(
      "  {} {} {} {}",
      symbols::INFO,
      variant.target,
      symbols::ARROW,
      variant.image_path_on_host.display()
    );
    if verbose {
      for location in configs.image_locations(variant) {
        println!("      {location}");
      }
      for dep in &variant.images_deps {
        println!("      {}", dep.display());
      }
    }
  }
}
