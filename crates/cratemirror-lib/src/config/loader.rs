use super::MirrorConfig;
use crate::error::CrateMirrorError;
use config::Config as ConfigBuilder;

pub fn load_config(config_path: &str) -> Result<MirrorConfig, CrateMirrorError> {
    let config_builder = ConfigBuilder::builder()
        .add_source(config::File::with_name(config_path))
        .build()?;

    config_builder.try_deserialize().map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_load_toml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cratemirror.toml");
        std::fs::write(
            &path,
            r#"
repo = "http://mirror.local"
output = "/srv/crates"
exit_on_error = true
"#,
        )
        .unwrap();

        let config = load_config(path.to_str().unwrap()).unwrap();

        assert_eq!(
            config,
            MirrorConfig {
                repo: Some("http://mirror.local".to_string()),
                output: Some(PathBuf::from("/srv/crates")),
                overwrite: None,
                exit_on_error: Some(true),
                err_log: None,
            }
        );
    }

    #[test]
    fn test_load_yaml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cratemirror.yaml");
        std::fs::write(&path, "overwrite: true\nerr_log: errors.log\n").unwrap();

        let config = load_config(path.to_str().unwrap()).unwrap();

        assert_eq!(config.overwrite, Some(true));
        assert_eq!(config.err_log, Some(PathBuf::from("errors.log")));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cratemirror.toml");
        std::fs::write(&path, "registry = \"http://mirror.local\"\n").unwrap();

        assert!(matches!(
            load_config(path.to_str().unwrap()),
            Err(CrateMirrorError::Config(_))
        ));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(load_config(path.to_str().unwrap()).is_err());
    }
}
