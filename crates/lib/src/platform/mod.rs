//! Architecture, OS and target descriptors for boot image expansion.

pub mod arch;
pub mod os;
pub mod target;

pub use arch::Arch;
pub use os::{Os, OsClass};
pub use target::{NativeBridge, Target};
