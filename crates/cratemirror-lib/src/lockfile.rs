use crate::error::CrateMirrorError;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LockfileError {
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("package #{index} has an unusable {field} {value:?}")]
    InvalidPackage {
        index: usize,
        field: &'static str,
        value: String,
    },
}

/// A single `[[package]]` entry of a `Cargo.lock`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PackageRecord {
    /// Crate name
    pub name: String,
    /// Exact pinned version
    pub version: String,
}

impl PackageRecord {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Name and version each become one directory level in the mirror.
fn is_path_component(value: &str) -> bool {
    !value.is_empty() && value != "." && value != ".." && !value.contains(['/', '\\'])
}

/// The parts of a `Cargo.lock` needed to mirror it.
///
/// Everything besides `name` and `version` of each package (sources, checksums,
/// dependency lists, the format version, `[metadata]`) is ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Lockfile {
    /// Packages in lock-file order, duplicates included
    #[serde(rename = "package")]
    pub packages: Vec<PackageRecord>,
}

impl Lockfile {
    pub fn from_toml_str(content: &str) -> Result<Self, LockfileError> {
        let lockfile: Self = toml::from_str(content)?;

        for (index, package) in lockfile.packages.iter().enumerate() {
            for (field, value) in [("name", &package.name), ("version", &package.version)] {
                if !is_path_component(value) {
                    return Err(LockfileError::InvalidPackage {
                        index,
                        field,
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(lockfile)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, CrateMirrorError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CrateMirrorError::LockfileNotFound {
                path: path.to_path_buf(),
            },
            _ => CrateMirrorError::LockfileRead {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

        let lockfile =
            Self::from_toml_str(&content).map_err(|e| CrateMirrorError::LockfileParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        tracing::debug!(
            "Loaded {} packages from {}",
            lockfile.packages.len(),
            path.display()
        );
        Ok(lockfile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARGO_LOCK: &str = r#"
# This file is automatically @generated by Cargo.
# It is not intended for manual editing.
version = 4

[[package]]
name = "autocfg"
version = "1.4.0"
source = "registry+https://github.com/rust-lang/crates.io-index"
checksum = "ace50bade8e6234aa140d9a2f552bbee1db4d353f69b8217bc503490fc1a9f26"

[[package]]
name = "my-app"
version = "0.1.0"
dependencies = [
 "autocfg",
 "serde",
]

[[package]]
name = "serde"
version = "1.0.219"
source = "registry+https://github.com/rust-lang/crates.io-index"
checksum = "5f0e2c6ed6606019b4e29e69dbaba95b11854410e5347d525002456dbbb786b6"
"#;

    #[test]
    fn test_parse_keeps_lockfile_order_and_ignores_extra_fields() {
        let lockfile = Lockfile::from_toml_str(CARGO_LOCK).unwrap();

        assert_eq!(
            lockfile.packages,
            vec![
                PackageRecord::new("autocfg", "1.4.0"),
                PackageRecord::new("my-app", "0.1.0"),
                PackageRecord::new("serde", "1.0.219"),
            ]
        );
    }

    #[test]
    fn test_parse_keeps_duplicates() {
        let content = r#"
[[package]]
name = "foo"
version = "1.0.0"

[[package]]
name = "foo"
version = "1.0.0"
"#;
        let lockfile = Lockfile::from_toml_str(content).unwrap();
        assert_eq!(lockfile.packages.len(), 2);
    }

    #[test]
    fn test_parse_inline_package_array() {
        let content = r#"package = [{ name = "foo", version = "1.0.0" }]"#;
        let lockfile = Lockfile::from_toml_str(content).unwrap();
        assert_eq!(lockfile.packages, vec![PackageRecord::new("foo", "1.0.0")]);
    }

    #[test]
    fn test_parse_rejects_missing_package_table() {
        assert!(Lockfile::from_toml_str("version = 3\n").is_err());
    }

    #[test]
    fn test_parse_rejects_package_without_version() {
        let content = r#"
[[package]]
name = "foo"
"#;
        assert!(Lockfile::from_toml_str(content).is_err());
    }

    #[test]
    fn test_parse_rejects_names_that_escape_the_mirror() {
        let content = r#"
[[package]]
name = "../../etc"
version = "1.0.0"
"#;
        let err = Lockfile::from_toml_str(content).unwrap_err();
        assert!(
            matches!(err, LockfileError::InvalidPackage { index: 0, field: "name", .. }),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn test_parse_rejects_empty_version() {
        let content = r#"package = [{ name = "foo", version = "" }]"#;
        assert!(matches!(
            Lockfile::from_toml_str(content),
            Err(LockfileError::InvalidPackage { field: "version", .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Cargo.lock");

        let err = Lockfile::load_from_file(&path).unwrap_err();
        assert!(
            matches!(err, CrateMirrorError::LockfileNotFound { ref path } if path.ends_with("Cargo.lock")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn test_load_malformed_file_reports_parse_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Cargo.lock");
        std::fs::write(&path, "[[package]\nname = ").unwrap();

        let err = Lockfile::load_from_file(&path).unwrap_err();
        match err {
            CrateMirrorError::LockfileParse { reason, .. } => assert!(!reason.is_empty()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Cargo.lock");
        std::fs::write(&path, CARGO_LOCK).unwrap();

        let lockfile = Lockfile::load_from_file(&path).unwrap();
        assert_eq!(lockfile.packages.len(), 3);
    }
}
