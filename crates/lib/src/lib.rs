//! dexboot-lib: boot image configuration for dexpreopt
//!
//! This crate derives, ahead of compilation, everything later build stages
//! need to know about the boot image:
//! - `JarList`: ordered (namespace, module) jar lists and their paths
//! - `BootImageConfigs`: the ART image and its framework extension, expanded
//!   per architecture and OS
//! - `UpdatableBootConfig`: boot jars kept out of the image
//! - classpath queries for the system server and for dexpreopting
//!
//! All derivations are memoised per configuration in a `DexpreoptContext`.

pub mod config;
pub mod consts;
pub mod dexpreopt;
pub mod error;
pub mod jars;
pub mod platform;
pub mod util;

pub use config::{ConfigError, GlobalConfig};
pub use error::DeriveError;
