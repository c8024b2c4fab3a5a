//! Ordered jar lists.
//!
//! A jar is identified by the namespace that supplies it (`platform`,
//! `system_ext`, or the name of an updatable unit such as `com.android.art`)
//! and its module name. Lists are order-significant: the order of a list is
//! the order in which its jars appear on a classpath.

mod list;

pub use list::*;
