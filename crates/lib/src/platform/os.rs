use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether an OS runs on the device or on the build host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsClass {
  Device,
  Host,
}

/// Operating system variants that appear in the target matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Os {
  Android,
  LinuxGlibc,
  LinuxBionic,
  Darwin,
  Windows,
}

impl Os {
  /// Returns the string identifier for this OS, as used in image directories
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Android => "android",
      Self::LinuxGlibc => "linux_glibc",
      Self::LinuxBionic => "linux_bionic",
      Self::Darwin => "darwin",
      Self::Windows => "windows",
    }
  }

  pub fn class(&self) -> OsClass {
    match self {
      Self::Android => OsClass::Device,
      _ => OsClass::Host,
    }
  }

  pub fn is_host(&self) -> bool {
    self.class() == OsClass::Host
  }

  /// Directory tag used for host prebuilts (e.g. "linux-x86")
  pub fn prebuilt_tag(&self) -> &'static str {
    match self {
      Self::Android => "android",
      Self::LinuxGlibc => "linux-x86",
      Self::LinuxBionic => "linux_bionic-x86",
      Self::Darwin => "darwin-x86",
      Self::Windows => "windows-x86",
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_android_is_a_device_os() {
    assert_eq!(Os::Android.class(), OsClass::Device);
    assert!(Os::LinuxGlibc.is_host());
    assert!(Os::LinuxBionic.is_host());
    assert!(Os::Darwin.is_host());
  }

  #[test]
  fn linux_uses_glibc_identifier() {
    // Host images live under a directory named after the libc flavour
    assert_eq!(Os::LinuxGlibc.as_str(), "linux_glibc");
    assert_eq!(serde_json::to_string(&Os::LinuxGlibc).unwrap(), "\"linux_glibc\"");
  }
}
