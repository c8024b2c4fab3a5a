use std::fmt;

use serde::{Deserialize, Serialize};

/// CPU architectures a boot image can be compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
  Arm,
  Arm64,
  X86,
  X86_64,
  Riscv64,
}

impl Arch {
  /// Returns the lowercase string identifier for this architecture
  ///
  /// This is also the name of the per-architecture image directory.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Arm => "arm",
      Self::Arm64 => "arm64",
      Self::X86 => "x86",
      Self::X86_64 => "x86_64",
      Self::Riscv64 => "riscv64",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
