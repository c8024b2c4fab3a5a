//! Test fixtures for dexboot-lib.

use std::path::PathBuf;

use crate::config::GlobalConfig;
use crate::jars::JarList;
use crate::platform::{Arch, Os, Target};

pub fn jars(pairs: &[&str]) -> JarList {
  JarList::from_pairs(pairs).unwrap()
}

/// A small but complete configuration: two core library jars in the ART
/// image, two framework jars in the extension, one updatable boot jar, and a
/// device target plus a host target.
pub fn sample_config() -> GlobalConfig {
  GlobalConfig {
    device_name: "generic_arm64".to_string(),
    out_dir: PathBuf::from("out"),
    art_apex_jars: jars(&["com.android.art:core-oj", "com.android.art:core-libart"]),
    boot_jars: jars(&[
      "com.android.art:core-oj",
      "com.android.art:core-libart",
      "platform:framework",
      "platform:services",
    ]),
    updatable_boot_jars: jars(&["com.android.conscrypt:conscrypt"]),
    system_server_jars: vec!["services".to_string(), "ethernet-service".to_string()],
    updatable_system_server_jars: jars(&["com.android.permission:service-permission"]),
    targets: vec![Target::new(Os::Android, Arch::Arm64), Target::new(Os::LinuxGlibc, Arch::X86_64)],
    host_os: Os::LinuxGlibc,
  }
}
