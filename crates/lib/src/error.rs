//! Errors raised by the boot image derivation.

use thiserror::Error;

/// A derivation invariant did not hold.
///
/// These are configuration errors with no safe partial result: a classpath
/// with missing or extra entries would silently miscompile everything built
/// against it. Results are memoised, so the error is `Clone` and every caller
/// of a failed derivation receives the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeriveError {
  #[error("wrong number of boot jars, got {actual}, expected {expected}")]
  BootJarCount { expected: usize, actual: usize },

  #[error("wrong number of system server jars, got {actual}, expected {expected}")]
  SystemServerJarCount { expected: usize, actual: usize },
}
