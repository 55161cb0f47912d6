use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings file looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "namechoose.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Defaults applied when the command line leaves an option out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub data_dir: Option<PathBuf>,
    pub default_nationality: Option<String>,
    /// `m`/`f` or the full gender name.
    pub default_gender: Option<String>,
    pub default_count: Option<usize>,
    pub seed: Option<u64>,
    /// `plain`, `csv` or `json`.
    pub format: Option<String>,
}

/// Read `explicit`, else `namechoose.toml` when present, else defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, SettingsError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_SETTINGS_FILE);
            if !fallback.is_file() {
                return Ok(Settings::default());
            }
            fallback
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|source| SettingsError::Io {
        path: path.clone(),
        source,
    })?;
    parse_settings(&content).map_err(|source| SettingsError::Toml { path, source })
}

fn parse_settings(content: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_key() {
        let settings = parse_settings(
            r#"
data_dir = "names"
default_nationality = "is"
default_gender = "f"
default_count = 5
seed = 42
format = "json"
"#,
        )
        .expect("parse settings");

        assert_eq!(settings.data_dir, Some(PathBuf::from("names")));
        assert_eq!(settings.default_nationality.as_deref(), Some("is"));
        assert_eq!(settings.default_gender.as_deref(), Some("f"));
        assert_eq!(settings.default_count, Some(5));
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.format.as_deref(), Some("json"));
    }

    #[test]
    fn empty_file_means_defaults() {
        assert_eq!(parse_settings("").expect("parse"), Settings::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_settings("colour = \"red\"").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("namechoose_{}.toml", uuid::Uuid::new_v4()));
        assert!(matches!(
            load_settings(Some(&path)),
            Err(SettingsError::Io { .. })
        ));
    }
}
