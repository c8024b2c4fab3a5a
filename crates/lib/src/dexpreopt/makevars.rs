//! Build variables exported to legacy build-variable readers.

use serde::Serialize;

use super::bootimage::boot_image_configs;
use super::context::DexpreoptContext;
use crate::consts::BOOT_JARS_MODULES_VAR;
use crate::error::DeriveError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MakeVar {
  pub name: &'static str,
  pub value: String,
}

impl std::fmt::Display for MakeVar {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} := {}", self.name, self.value)
  }
}

/// Variables describing the dexpreopt configuration.
///
/// `DEXPREOPT_BOOT_JARS_MODULES` is the colon-joined list of
/// `namespace:module` pairs of the default boot image.
pub fn dexpreopt_config_make_vars(ctx: &DexpreoptContext) -> Result<Vec<MakeVar>, DeriveError> {
  let configs = boot_image_configs(ctx)?;
  Ok(vec![MakeVar {
    name: BOOT_JARS_MODULES_VAR,
    value: configs.default_image().modules.pairs().join(":"),
  }])
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::util::testutil::sample_config;

  #[test]
  fn boot_jars_modules_lists_default_image_pairs() {
    let ctx = DexpreoptContext::new(sample_config()).unwrap();

    let vars = dexpreopt_config_make_vars(&ctx).unwrap();

    assert_eq!(
      vars,
      vec![MakeVar {
        name: "DEXPREOPT_BOOT_JARS_MODULES",
        value: "platform:framework:platform:services".to_string(),
      }]
    );
    assert_eq!(
      vars[0].to_string(),
      "DEXPREOPT_BOOT_JARS_MODULES := platform:framework:platform:services"
    );
  }
}
