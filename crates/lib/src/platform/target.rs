use std::fmt;

use serde::{Deserialize, Serialize};

use super::arch::Arch;
use super::os::Os;

/// How a target architecture is reached on the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativeBridge {
  /// The architecture runs natively.
  #[default]
  Disabled,
  /// The architecture is only available through native-bridge emulation.
  Enabled,
}

/// A single entry of the configured target matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
  pub os: Os,
  pub arch: Arch,
  #[serde(default)]
  pub native_bridge: NativeBridge,
}

impl Target {
  pub fn new(os: Os, arch: Arch) -> Self {
    Self {
      os,
      arch,
      native_bridge: NativeBridge::Disabled,
    }
  }

  /// A target reached through native-bridge emulation
  pub fn native_bridged(os: Os, arch: Arch) -> Self {
    Self {
      os,
      arch,
      native_bridge: NativeBridge::Enabled,
    }
  }

  pub fn is_native_bridged(&self) -> bool {
    self.native_bridge == NativeBridge::Enabled
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.os, self.arch)?;
    if self.is_native_bridged() {
      write!(f, " (native bridge)")?;
    }
    Ok(())
  }
}
