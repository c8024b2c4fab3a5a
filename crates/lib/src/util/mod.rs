//! Shared utilities.
//!
//! Content hashing and the per-invocation memoisation cache.

pub mod hash;
pub mod once;

#[cfg(test)]
pub mod testutil;
