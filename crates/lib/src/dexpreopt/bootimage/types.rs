use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::jars::{ConfiguredJar, JarList};
use crate::platform::{Os, Target};

/// Index of a config in its [`BootImageConfigs`] table.
///
/// Used for the non-owning `extends` and variant-to-config links; ids are only
/// minted by the table that holds the configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ImageId(pub(super) usize);

impl ImageId {
  /// The primary image with the core libraries.
  pub const ART: ImageId = ImageId(0);
  /// The framework extension of the primary image.
  pub const FRAMEWORK: ImageId = ImageId(1);
}

/// One layer of the boot image.
#[derive(Debug, Clone, Serialize)]
pub struct BootImageConfig {
  /// Name of the image, also used in output directory names.
  pub name: String,
  /// Base file name of the image files (`boot.art`, `boot-framework.art`, ...).
  pub stem: String,
  /// Subdirectory of the install location, relative to the partition root.
  pub install_dir_on_host: PathBuf,
  /// Jars compiled into this layer, in boot classpath order.
  pub modules: JarList,
  /// The layer this one is built against.
  pub extends: Option<ImageId>,

  /// Staging directory for the image files.
  pub dir: PathBuf,
  /// Directory for unstripped image files.
  pub symbols_dir: PathBuf,
  /// Archive of all image files, used for distribution.
  pub zip: PathBuf,

  /// Predefined build paths of this layer's dex jars.
  pub dex_paths: Vec<PathBuf>,
  /// `dex_paths` of all ancestor layers followed by this layer's.
  pub dex_paths_deps: Vec<PathBuf>,

  /// One variant per dexpreopt target, in target order.
  pub variants: Vec<BootImageVariant>,
}

impl BootImageConfig {
  pub fn is_extension(&self) -> bool {
    self.extends.is_some()
  }

  /// File name (without extension) of the image files compiled from `jar`.
  ///
  /// The first jar of a primary image is compiled into `<stem>` to match the
  /// legacy assumption that `<stem>.art` exists; every other jar, and every
  /// jar of an extension, into `<stem>-<jar stem>`.
  pub fn module_name(&self, idx: usize, jar: &ConfiguredJar) -> String {
    if idx == 0 && !self.is_extension() {
      self.stem.clone()
    } else {
      format!("{}-{}", self.stem, jar.stem())
    }
  }

  pub fn first_module_name_or_stem(&self) -> String {
    match self.modules.get(0) {
      Some(jar) => self.module_name(0, jar),
      None => self.stem.clone(),
    }
  }

  /// File name of the image, `<stem>.art` for a primary image and
  /// `<stem>-<first jar>.art` for an extension.
  pub fn image_name(&self) -> String {
    format!("{}.art", self.first_module_name_or_stem())
  }

  /// The files produced in `dir` for every module, one per extension.
  pub fn module_files(&self, dir: &Path, exts: &[&str]) -> Vec<PathBuf> {
    self
      .modules
      .iter()
      .enumerate()
      .flat_map(|(idx, jar)| {
        let name = self.module_name(idx, jar);
        exts.iter().map(move |ext| dir.join(format!("{name}{ext}")))
      })
      .collect()
  }

  /// The variant for `target`, if the target was dexpreopted.
  pub fn variant_for(&self, target: &Target) -> Option<&BootImageVariant> {
    self.variants.iter().find(|variant| variant.target == *target)
  }

  /// Any device variant. Device locations do not depend on the architecture,
  /// so all device variants agree on them.
  pub fn any_android_variant(&self) -> Option<&BootImageVariant> {
    self.variants.iter().find(|variant| variant.target.os == Os::Android)
  }
}

/// One target-specific instantiation of a [`BootImageConfig`].
#[derive(Debug, Clone, Serialize)]
pub struct BootImageVariant {
  /// The config this variant belongs to.
  pub config: ImageId,
  pub target: Target,

  /// Path of the image file on the host.
  pub image_path_on_host: PathBuf,
  /// Every file produced alongside the image (`.art`, `.oat`, `.vdex` per module).
  pub images_deps: Vec<PathBuf>,

  /// Classpath locations of this layer's jars.
  pub dex_locations: Vec<String>,
  /// Classpath locations of all ancestor layers' jars followed by this layer's.
  pub dex_locations_deps: Vec<String>,

  /// Image path of the parent layer's variant for the same target.
  pub primary_images: Option<PathBuf>,
}

impl BootImageVariant {
  /// The image location passed to the runtime, which adds the architecture
  /// directory itself: `<dir>/<arch>/<name>.art` becomes `<dir>/<name>.art`.
  pub fn image_location(&self) -> PathBuf {
    let path = &self.image_path_on_host;
    match (path.parent().and_then(Path::parent), path.file_name()) {
      (Some(dir), Some(file)) => dir.join(file),
      _ => path.clone(),
    }
  }
}

/// The layered boot image configs of one derivation.
///
/// The table owns every layer; layers refer to each other by [`ImageId`].
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct BootImageConfigs {
  configs: Vec<BootImageConfig>,
}

impl BootImageConfigs {
  /// `configs[i]` must have id `ImageId(i)`, and every `extends` must point
  /// to an earlier entry.
  pub(super) fn new(configs: Vec<BootImageConfig>) -> Self {
    debug_assert!(
      configs
        .iter()
        .enumerate()
        .all(|(idx, c)| c.extends.is_none_or(|parent| parent.0 < idx))
    );
    Self { configs }
  }

  pub fn get(&self, id: ImageId) -> &BootImageConfig {
    &self.configs[id.0]
  }

  pub fn by_name(&self, name: &str) -> Option<&BootImageConfig> {
    self.configs.iter().find(|config| config.name == name)
  }

  /// The primary image with the core libraries.
  pub fn art(&self) -> &BootImageConfig {
    self.get(ImageId::ART)
  }

  /// The default boot image: the framework extension on top of the ART image.
  pub fn default_image(&self) -> &BootImageConfig {
    self.get(ImageId::FRAMEWORK)
  }

  pub fn parent(&self, config: &BootImageConfig) -> Option<&BootImageConfig> {
    config.extends.map(|id| self.get(id))
  }

  pub fn iter(&self) -> std::slice::Iter<'_, BootImageConfig> {
    self.configs.iter()
  }

  pub fn len(&self) -> usize {
    self.configs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.configs.is_empty()
  }

  /// Modules of `config` and all its ancestors, ancestors first.
  pub fn transitive_modules(&self, config: &BootImageConfig) -> JarList {
    match self.parent(config) {
      Some(parent) => self.transitive_modules(parent).append_list(&config.modules),
      None => config.modules.clone(),
    }
  }

  /// Image locations of `variant` and all its ancestors, ancestors first.
  pub fn image_locations(&self, variant: &BootImageVariant) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = Some(self.get(variant.config));
    while let Some(config) = current {
      chain.push(config);
      current = self.parent(config);
    }
    chain
      .iter()
      .rev()
      .filter_map(|config| config.variant_for(&variant.target))
      .map(|v| v.image_location().to_string_lossy().into_owned())
      .collect()
  }
}
