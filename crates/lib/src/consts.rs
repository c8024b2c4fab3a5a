//! Fixed names and locations shared across the derivation.

/// Length of the truncated hex digest used as a configuration identity.
pub const OBJ_HASH_PREFIX_LEN: usize = 20;

/// Name of the primary boot image holding the core libraries.
pub const ART_BOOT_IMAGE_NAME: &str = "art";
/// Name of the boot image extension holding the framework libraries.
pub const FRAMEWORK_BOOT_IMAGE_NAME: &str = "boot";
pub const BOOT_IMAGE_STEM: &str = "boot";

pub const ART_INSTALL_DIR_ON_HOST: &str = "apex/art_boot_images/javalib";
pub const FRAMEWORK_INSTALL_DIR_ON_HOST: &str = "system/framework";

/// On-device directory holding non-updatable platform jars.
pub const SYSTEM_FRAMEWORK_DIR: &str = "/system/framework";

pub const UPDATABLE_BOOTJARS_DIR: &str = "updatable_bootjars";

/// Extensions of the files produced for every module of a boot image.
pub const IMAGE_EXTENSIONS: [&str; 3] = [".art", ".oat", ".vdex"];

pub const DEFAULT_OUT_DIR: &str = "out";
pub const OUT_DIR_ENV: &str = "OUT_DIR";
/// Environment variable naming the config file read by the command line tool.
pub const CONFIG_ENV: &str = "DEXBOOT_CONFIG";

pub const BOOT_JARS_MODULES_VAR: &str = "DEXPREOPT_BOOT_JARS_MODULES";
