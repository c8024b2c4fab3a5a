//! Layered boot image configuration.
//!
//! The boot image is built in two layers:
//!
//! - `art`: the primary image with the core libraries from the ART module
//! - `boot`: an extension with the framework libraries, compiled against `art`
//!
//! Every layer is expanded into one [`BootImageVariant`] per dexpreopt target.
//! The extension's transitive lists (`dex_paths_deps`, `dex_locations_deps`)
//! hold the primary image's entries first, which is the order the runtime
//! loads them in.
//!
//! # Submodules
//!
//! - [`build`] - derivation of the layer table, memoised per configuration
//! - `expand` - per-target variant expansion of a single layer

pub mod build;
mod expand;
mod types;

pub use build::{boot_image_configs, build_boot_image_configs};
pub use types::*;
