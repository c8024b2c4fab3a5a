use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use super::expand::expand_variants;
use super::types::{BootImageConfig, BootImageConfigs, ImageId};
use crate::config::GlobalConfig;
use crate::consts::{
  ART_BOOT_IMAGE_NAME, ART_INSTALL_DIR_ON_HOST, BOOT_IMAGE_STEM, FRAMEWORK_BOOT_IMAGE_NAME,
  FRAMEWORK_INSTALL_DIR_ON_HOST,
};
use crate::dexpreopt::context::{DexpreoptContext, OnceKey};
use crate::dexpreopt::targets::dexpreopt_targets;
use crate::error::DeriveError;
use crate::jars::JarList;
use crate::platform::Target;

static BOOT_IMAGE_CONFIGS_KEY: OnceKey<Result<Arc<BootImageConfigs>, DeriveError>> = OnceKey::new("bootImageConfig");

/// Description of one layer before its paths and variants are derived.
struct Layer<'a> {
  name: &'a str,
  stem: &'a str,
  install_dir_on_host: &'a str,
  modules: JarList,
}

/// Builds the ART image and its framework extension for `targets`.
///
/// The ART image holds the configured ART jars; the extension holds every
/// other boot jar, in boot jar order.
pub fn build_boot_image_configs(config: &GlobalConfig, targets: &[Target]) -> Result<BootImageConfigs, DeriveError> {
  let art_modules = config.art_apex_jars.clone();
  let framework_modules = config.boot_jars.remove_list(&art_modules);

  let expected = config.boot_jars.len();
  let actual = art_modules.len() + framework_modules.len();
  if expected != actual {
    return Err(DeriveError::BootJarCount { expected, actual });
  }

  let layers = [
    Layer {
      name: ART_BOOT_IMAGE_NAME,
      stem: BOOT_IMAGE_STEM,
      install_dir_on_host: ART_INSTALL_DIR_ON_HOST,
      modules: art_modules,
    },
    Layer {
      name: FRAMEWORK_BOOT_IMAGE_NAME,
      stem: BOOT_IMAGE_STEM,
      install_dir_on_host: FRAMEWORK_INSTALL_DIR_ON_HOST,
      modules: framework_modules,
    },
  ];

  let device_dir = config.device_dir();
  let host_root = config.host_install_root();
  let mut configs: Vec<BootImageConfig> = Vec::with_capacity(layers.len());

  // Each layer extends the one before it.
  for layer in layers {
    let id = ImageId(configs.len());
    let extends = configs.len().checked_sub(1).map(ImageId);
    let mut image = new_config(layer, extends, &device_dir);
    image.variants = expand_variants(id, &image, targets, &host_root);
    if let Some(parent) = configs.last() {
      wire_extension(&mut image, parent);
    }
    debug!(
      image = %image.name,
      modules = image.modules.len(),
      variants = image.variants.len(),
      "derived boot image config"
    );
    configs.push(image);
  }

  let configs = BootImageConfigs::new(configs);
  debug_assert_eq!(configs.art().extends, None);
  debug_assert_eq!(configs.default_image().extends, Some(ImageId::ART));
  Ok(configs)
}

fn new_config(layer: Layer<'_>, extends: Option<ImageId>, device_dir: &Path) -> BootImageConfig {
  let dir = device_dir.join(format!("dex_{}jars", layer.name));
  let symbols_dir = device_dir.join(format!("dex_{}jars_unstripped", layer.name));
  let zip = dir.join(format!("{}.zip", layer.name));

  // Build paths of the dex jars must be known before the jars are compiled;
  // the jars are copied to these locations afterwards.
  let input_dir = device_dir.join(format!("dex_{}jars_input", layer.name));
  let dex_paths: Vec<PathBuf> = layer.modules.build_paths(&input_dir);

  BootImageConfig {
    name: layer.name.to_string(),
    stem: layer.stem.to_string(),
    install_dir_on_host: PathBuf::from(layer.install_dir_on_host),
    modules: layer.modules,
    extends,
    dir,
    symbols_dir,
    zip,
    dex_paths_deps: dex_paths.clone(),
    dex_paths,
    variants: Vec::new(),
  }
}

/// Prepends `parent`'s transitive paths and locations to `image`'s and links
/// each variant to the parent's image for the same target.
///
/// Both configs were expanded over the same target list, so variants pair up
/// by index.
fn wire_extension(image: &mut BootImageConfig, parent: &BootImageConfig) {
  image.dex_paths_deps = parent.dex_paths_deps.iter().chain(&image.dex_paths).cloned().collect();

  for (variant, parent_variant) in image.variants.iter_mut().zip(&parent.variants) {
    debug_assert_eq!(variant.target, parent_variant.target);
    variant.primary_images = Some(parent_variant.image_path_on_host.clone());
    variant.dex_locations_deps = parent_variant
      .dex_locations_deps
      .iter()
      .chain(&variant.dex_locations)
      .cloned()
      .collect();
  }
}

/// Memoised boot image configs for the context's configuration.
pub fn boot_image_configs(ctx: &DexpreoptContext) -> Result<Arc<BootImageConfigs>, DeriveError> {
  ctx.try_once(&BOOT_IMAGE_CONFIGS_KEY, || {
    let targets = dexpreopt_targets(ctx);
    let configs = build_boot_image_configs(ctx.config(), &targets)?;
    info!(
      images = configs.len(),
      targets = targets.len(),
      boot_jars = ctx.config().boot_jars.len(),
      "generated boot image configs"
    );
    Ok(configs)
  })
}
