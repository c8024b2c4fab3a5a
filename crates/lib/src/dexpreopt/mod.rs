//! Dexpreopt configuration derived from the global configuration.
//!
//! Every derivation takes a [`DexpreoptContext`] and is memoised in the
//! context's cache, so build actions running in parallel can all ask for the
//! same data and share one immutable result.
//!
//! # Submodules
//!
//! - [`targets`] - targets boot images are compiled for
//! - [`bootimage`] - the layered ART and framework boot images
//! - [`updatable`] - updatable boot jars
//! - [`classpath`] - system server and dexpreopt boot classpaths
//! - [`makevars`] - exported build variables

pub mod bootimage;
pub mod classpath;
mod context;
pub mod makevars;
pub mod targets;
pub mod updatable;

pub use bootimage::{BootImageConfig, BootImageConfigs, BootImageVariant, ImageId, boot_image_configs};
pub use classpath::{BootClasspath, bcp_for_dexpreopt, non_updatable_system_server_jars, system_server_classpath};
pub use context::{CacheKey, DerivationCache, DexpreoptContext, OnceKey};
pub use makevars::{MakeVar, dexpreopt_config_make_vars};
pub use targets::{dexpreopt_targets, resolve_targets};
pub use updatable::{UpdatableBootConfig, updatable_boot_config};
