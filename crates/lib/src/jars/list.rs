use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::Os;

/// Namespace of jars installed in the system partition.
pub const PLATFORM_NAMESPACE: &str = "platform";
/// Namespace of jars installed in the system_ext partition.
pub const SYSTEM_EXT_NAMESPACE: &str = "system_ext";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JarPairError {
  #[error("malformed (namespace, module) pair: '{0}', expected format: <namespace>:<module>")]
  Malformed(String),

  #[error("duplicate jar in list: '{0}'")]
  Duplicate(String),
}

/// Returns the file stem of a module's jar.
///
/// `framework-minus-apex` is installed as `framework.jar`; every other module
/// uses its own name.
pub fn module_stem(module: &str) -> &str {
  if module == "framework-minus-apex" {
    "framework"
  } else {
    module
  }
}

/// A single (namespace, module) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConfiguredJar {
  pub namespace: String,
  pub module: String,
}

impl ConfiguredJar {
  pub fn new(namespace: impl Into<String>, module: impl Into<String>) -> Self {
    Self {
      namespace: namespace.into(),
      module: module.into(),
    }
  }

  pub fn stem(&self) -> &str {
    module_stem(&self.module)
  }

  /// Directory of the jar relative to the root of an installed system image.
  fn install_subdir(&self) -> PathBuf {
    match self.namespace.as_str() {
      PLATFORM_NAMESPACE => PathBuf::from("system/framework"),
      SYSTEM_EXT_NAMESPACE => PathBuf::from("system_ext/framework"),
      apex => Path::new("apex").join(apex).join("javalib"),
    }
  }
}

impl fmt::Display for ConfiguredJar {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.namespace, self.module)
  }
}

impl FromStr for ConfiguredJar {
  type Err = JarPairError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.split_once(':') {
      Some((namespace, module)) if !namespace.is_empty() && !module.is_empty() && !module.contains(':') => {
        Ok(Self::new(namespace, module))
      }
      _ => Err(JarPairError::Malformed(s.to_string())),
    }
  }
}

impl TryFrom<String> for ConfiguredJar {
  type Error = JarPairError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<ConfiguredJar> for String {
  fn from(jar: ConfiguredJar) -> Self {
    jar.to_string()
  }
}

/// An ordered, duplicate-free list of jars.
///
/// Serialises as a list of `"namespace:module"` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct JarList {
  jars: Vec<ConfiguredJar>,
}

impl JarList {
  /// Builds a list, rejecting repeated pairs.
  pub fn new(jars: impl IntoIterator<Item = ConfiguredJar>) -> Result<Self, JarPairError> {
    let mut seen = HashSet::new();
    let mut list = Vec::new();
    for jar in jars {
      if !seen.insert(jar.clone()) {
        return Err(JarPairError::Duplicate(jar.to_string()));
      }
      list.push(jar);
    }
    Ok(Self { jars: list })
  }

  /// Parses a list of `"namespace:module"` strings.
  pub fn from_pairs<I, S>(pairs: I) -> Result<Self, JarPairError>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let jars = pairs
      .into_iter()
      .map(|pair| pair.as_ref().parse())
      .collect::<Result<Vec<ConfiguredJar>, _>>()?;
    Self::new(jars)
  }

  pub fn len(&self) -> usize {
    self.jars.len()
  }

  pub fn is_empty(&self) -> bool {
    self.jars.is_empty()
  }

  pub fn get(&self, idx: usize) -> Option<&ConfiguredJar> {
    self.jars.get(idx)
  }

  pub fn iter(&self) -> std::slice::Iter<'_, ConfiguredJar> {
    self.jars.iter()
  }

  /// Module names in list order.
  pub fn modules(&self) -> impl Iterator<Item = &str> {
    self.jars.iter().map(|jar| jar.module.as_str())
  }

  pub fn contains(&self, jar: &ConfiguredJar) -> bool {
    self.jars.contains(jar)
  }

  /// Whether any namespace supplies a module with this name.
  pub fn contains_jar(&self, module: &str) -> bool {
    self.index_of_jar(module).is_some()
  }

  pub fn index_of_jar(&self, module: &str) -> Option<usize> {
    self.jars.iter().position(|jar| jar.module == module)
  }

  /// Returns the jars of `self` that are not in `other`, keeping their order.
  pub fn remove_list(&self, other: &JarList) -> JarList {
    let removed: HashSet<&ConfiguredJar> = other.jars.iter().collect();
    JarList {
      jars: self.jars.iter().filter(|jar| !removed.contains(jar)).cloned().collect(),
    }
  }

  /// Returns `self` followed by the jars of `other` not already in `self`.
  pub fn append_list(&self, other: &JarList) -> JarList {
    let mut jars = self.jars.clone();
    for jar in &other.jars {
      if !self.contains(jar) {
        jars.push(jar.clone());
      }
    }
    JarList { jars }
  }

  /// Host build paths of the jars, one per jar, under `root/<namespace>/`.
  pub fn build_paths(&self, root: &Path) -> Vec<PathBuf> {
    self
      .jars
      .iter()
      .map(|jar| root.join(&jar.namespace).join(format!("{}.jar", jar.stem())))
      .collect()
  }

  /// Classpath locations of the jars as seen by the runtime on `os`.
  ///
  /// Device locations are absolute paths on the device. Host OSes run from
  /// an unpacked system image rooted at `host_root`.
  pub fn device_paths(&self, os: Os, host_root: &Path) -> Vec<String> {
    self
      .jars
      .iter()
      .map(|jar| {
        let rel = jar.install_subdir().join(format!("{}.jar", jar.stem()));
        let path = if os.is_host() {
          host_root.join(rel)
        } else {
          Path::new("/").join(rel)
        };
        path.to_string_lossy().into_owned()
      })
      .collect()
  }

  /// The list as `"namespace:module"` strings.
  pub fn pairs(&self) -> Vec<String> {
    self.jars.iter().map(ToString::to_string).collect()
  }
}

impl TryFrom<Vec<String>> for JarList {
  type Error = JarPairError;

  fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
    Self::from_pairs(value)
  }
}

impl From<JarList> for Vec<String> {
  fn from(list: JarList) -> Self {
    list.pairs()
  }
}

impl<'a> IntoIterator for &'a JarList {
  type Item = &'a ConfiguredJar;
  type IntoIter = std::slice::Iter<'a, ConfiguredJar>;

  fn into_iter(self) -> Self::IntoIter {
    self.jars.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn list(pairs: &[&str]) -> JarList {
    JarList::from_pairs(pairs).unwrap()
  }

  #[test]
  fn parse_pair() {
    let jar: ConfiguredJar = "com.android.art:core-oj".parse().unwrap();
    assert_eq!(jar.namespace, "com.android.art");
    assert_eq!(jar.module, "core-oj");
    assert_eq!(jar.to_string(), "com.android.art:core-oj");
  }

  #[test]
  fn parse_rejects_malformed_pairs() {
    for bad in ["framework", ":framework", "platform:", "a:b:c"] {
      assert_eq!(
        bad.parse::<ConfiguredJar>(),
        Err(JarPairError::Malformed(bad.to_string())),
        "{bad} should be rejected"
      );
    }
  }

  #[test]
  fn duplicates_are_rejected() {
    let err = JarList::from_pairs(["platform:framework", "platform:framework"]).unwrap_err();
    assert_eq!(err, JarPairError::Duplicate("platform:framework".to_string()));
  }

  #[test]
  fn same_module_in_different_namespaces_is_allowed() {
    let jars = list(&["platform:foo", "com.android.foo:foo"]);
    assert_eq!(jars.len(), 2);
  }

  #[test]
  fn remove_list_keeps_relative_order() {
    let full = list(&["art:core-oj", "platform:framework", "art:core-libart", "platform:services"]);
    let base = list(&["art:core-libart", "art:core-oj"]);

    let rest = full.remove_list(&base);

    assert_eq!(rest.pairs(), vec!["platform:framework", "platform:services"]);
  }

  #[test]
  fn remove_list_matches_on_namespace_too() {
    let full = list(&["platform:foo", "com.android.foo:foo"]);
    let rest = full.remove_list(&list(&["platform:foo"]));
    assert_eq!(rest.pairs(), vec!["com.android.foo:foo"]);
  }

  #[test]
  fn append_list_skips_present_jars() {
    let a = list(&["platform:framework", "platform:ext"]);
    let b = list(&["platform:ext", "platform:telephony"]);
    assert_eq!(
      a.append_list(&b).pairs(),
      vec!["platform:framework", "platform:ext", "platform:telephony"]
    );
  }

  #[test]
  fn membership() {
    let jars = list(&["platform:framework", "com.android.art:core-oj"]);
    assert!(jars.contains(&ConfiguredJar::new("platform", "framework")));
    assert!(!jars.contains(&ConfiguredJar::new("system_ext", "framework")));
    assert!(jars.contains_jar("core-oj"));
    assert_eq!(jars.index_of_jar("core-oj"), Some(1));
    assert_eq!(jars.index_of_jar("services"), None);
  }

  #[test]
  fn build_paths_are_namespace_qualified() {
    let jars = list(&["com.android.art:core-oj", "platform:framework-minus-apex"]);
    let paths = jars.build_paths(Path::new("/out/dex_bootjars_input"));
    assert_eq!(
      paths,
      vec![
        PathBuf::from("/out/dex_bootjars_input/com.android.art/core-oj.jar"),
        PathBuf::from("/out/dex_bootjars_input/platform/framework.jar"),
      ]
    );
  }

  #[test]
  fn device_paths_follow_namespace() {
    let jars = list(&[
      "platform:framework-minus-apex",
      "system_ext:oem-services",
      "com.android.art:core-oj",
    ]);
    let paths = jars.device_paths(Os::Android, Path::new("/unused"));
    assert_eq!(
      paths,
      vec![
        "/system/framework/framework.jar",
        "/system_ext/framework/oem-services.jar",
        "/apex/com.android.art/javalib/core-oj.jar",
      ]
    );
  }

  #[test]
  fn device_paths_on_host_are_rooted_in_out_dir() {
    let jars = list(&["com.android.art:core-oj"]);
    let paths = jars.device_paths(Os::LinuxGlibc, Path::new("out/host/linux-x86"));
    assert_eq!(paths, vec!["out/host/linux-x86/apex/com.android.art/javalib/core-oj.jar"]);
  }

  #[test]
  fn empty_list_yields_empty_paths() {
    let jars = JarList::default();
    assert!(jars.is_empty());
    assert!(jars.build_paths(Path::new("/out")).is_empty());
    assert!(jars.device_paths(Os::Android, Path::new("/out")).is_empty());
  }

  #[test]
  fn deserializes_from_pair_strings() {
    let jars: JarList = serde_json::from_str(r#"["platform:framework", "platform:ext"]"#).unwrap();
    assert_eq!(jars.modules().collect::<Vec<_>>(), vec!["framework", "ext"]);

    let err = serde_json::from_str::<JarList>(r#"["framework"]"#).unwrap_err();
    assert!(err.to_string().contains("malformed"));
  }
}
