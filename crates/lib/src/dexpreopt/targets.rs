//! Targets relevant to dexpreopting.

use std::sync::Arc;

use tracing::debug;

use super::context::{DexpreoptContext, OnceKey};
use crate::config::GlobalConfig;
use crate::platform::{Os, Target};

static DEXPREOPT_TARGETS_KEY: OnceKey<Vec<Target>> = OnceKey::new("dexpreoptTargets");

/// Returns the targets boot images are expanded for.
///
/// Device targets come first, in matrix order, skipping architectures that
/// are only supported through native bridge. Host targets follow, since
/// host-side tests need images too. A `host_os` that is not a host OS adds
/// no host targets.
pub fn resolve_targets(config: &GlobalConfig) -> Vec<Target> {
  let device = config
    .targets_for(Os::Android)
    .filter(|target| !target.is_native_bridged());
  let host = config
    .targets_for(config.host_os)
    .filter(|_| config.host_os.is_host());
  device.chain(host).copied().collect()
}

/// Memoised [`resolve_targets`].
pub fn dexpreopt_targets(ctx: &DexpreoptContext) -> Arc<Vec<Target>> {
  ctx.once(&DEXPREOPT_TARGETS_KEY, || {
    let targets = resolve_targets(ctx.config());
    debug!(count = targets.len(), "resolved dexpreopt targets");
    targets
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::Arch;
  use crate::util::testutil::sample_config;

  #[test]
  fn native_bridge_targets_are_excluded() {
    let mut config = sample_config();
    config.targets = vec![
      Target::new(Os::Android, Arch::Arm64),
      Target::native_bridged(Os::Android, Arch::Arm),
      Target::new(Os::Android, Arch::X86_64),
    ];

    let targets = resolve_targets(&config);

    assert_eq!(
      targets,
      vec![Target::new(Os::Android, Arch::Arm64), Target::new(Os::Android, Arch::X86_64)]
    );
  }

  #[test]
  fn host_targets_are_appended_after_device_targets() {
    let mut config = sample_config();
    config.targets = vec![
      Target::new(Os::LinuxGlibc, Arch::X86_64),
      Target::new(Os::Android, Arch::Arm64),
      Target::new(Os::LinuxGlibc, Arch::X86),
      Target::new(Os::Android, Arch::Arm),
    ];

    let targets = resolve_targets(&config);

    assert_eq!(
      targets,
      vec![
        Target::new(Os::Android, Arch::Arm64),
        Target::new(Os::Android, Arch::Arm),
        Target::new(Os::LinuxGlibc, Arch::X86_64),
        Target::new(Os::LinuxGlibc, Arch::X86),
      ]
    );
  }

  #[test]
  fn host_targets_are_kept_even_when_bridged() {
    let mut config = sample_config();
    config.targets = vec![Target::native_bridged(Os::LinuxGlibc, Arch::X86)];
    assert_eq!(resolve_targets(&config).len(), 1);
  }

  #[test]
  fn only_the_build_host_os_is_included() {
    let mut config = sample_config();
    config.targets = vec![
      Target::new(Os::Darwin, Arch::X86_64),
      Target::new(Os::LinuxGlibc, Arch::X86_64),
    ];
    assert_eq!(resolve_targets(&config), vec![Target::new(Os::LinuxGlibc, Arch::X86_64)]);
  }

  #[test]
  fn device_host_os_does_not_repeat_device_targets() {
    let mut config = sample_config();
    config.host_os = Os::Android;
    config.targets = vec![
      Target::new(Os::Android, Arch::Arm64),
      Target::native_bridged(Os::Android, Arch::Arm),
    ];

    assert_eq!(resolve_targets(&config), vec![Target::new(Os::Android, Arch::Arm64)]);

    let ctx = DexpreoptContext::new(config).unwrap();
    let configs = crate::dexpreopt::boot_image_configs(&ctx).unwrap();
    assert_eq!(configs.default_image().variants.len(), 1);
  }

  #[test]
  fn empty_matrix_gives_no_targets() {
    let mut config = sample_config();
    config.targets.clear();
    assert!(resolve_targets(&config).is_empty());
  }

  #[test]
  fn memoised_targets_are_shared() {
    let ctx = DexpreoptContext::new(sample_config()).unwrap();
    assert!(Arc::ptr_eq(&dexpreopt_targets(&ctx), &dexpreopt_targets(&ctx)));
  }
}
