use std::path::Path;

use super::types::{BootImageConfig, BootImageVariant, ImageId};
use crate::consts::IMAGE_EXTENSIONS;
use crate::platform::Target;

/// Creates one variant of `config` per target, in target order.
///
/// Only the config's own modules are considered. Links to a parent layer
/// (`primary_images`, transitive locations) are filled in by the builder.
pub(super) fn expand_variants(
  id: ImageId,
  config: &BootImageConfig,
  targets: &[Target],
  host_root: &Path,
) -> Vec<BootImageVariant> {
  let image_name = config.image_name();

  targets
    .iter()
    .map(|target| {
      let image_dir = config
        .dir
        .join(target.os.as_str())
        .join(&config.install_dir_on_host)
        .join(target.arch.as_str());
      let dex_locations = config.modules.device_paths(target.os, host_root);

      BootImageVariant {
        config: id,
        target: *target,
        image_path_on_host: image_dir.join(&image_name),
        images_deps: config.module_files(&image_dir, &IMAGE_EXTENSIONS),
        dex_locations_deps: dex_locations.clone(),
        dex_locations,
        primary_images: None,
      }
    })
    .collect()
}
