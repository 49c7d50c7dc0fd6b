//! Reference data configuration from TOML (`[data]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use triage_domain::config::validation::{ConfigIssue, ConfigIssueCode};

/// Paths to reference data files.
///
/// Any path left unset falls back to the dataset compiled into the binary.
///
/// # Example
///
/// ```toml
/// [data]
/// knowledge_base = "data/knowledge_base.toml"
/// case_database = "data/cases.json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDataConfig {
    pub knowledge_base: Option<PathBuf>,
    pub case_database: Option<PathBuf>,
}

impl FileDataConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        [
            ("data.knowledge_base", &self.knowledge_base),
            ("data.case_database", &self.case_database),
        ]
        .into_iter()
        .filter_map(|(field, path)| path.as_ref().map(|p| (field, p)))
        .filter(|(_, path)| !path.exists())
        .map(|(field, path)| {
            ConfigIssue::error(
                ConfigIssueCode::MissingDataFile {
                    field: field.to_string(),
                },
                format!("{}: file not found: {}", field, path.display()),
            )
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_config_default_uses_embedded() {
        let config = FileDataConfig::default();
        assert!(config.knowledge_base.is_none());
        assert!(config.case_database.is_none());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_missing_file_is_error() {
        let config = FileDataConfig {
            knowledge_base: Some(PathBuf::from("/nonexistent/knowledge_base.toml")),
            case_database: None,
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(issues[0].message.contains("/nonexistent/knowledge_base.toml"));
    }

    #[test]
    fn test_existing_file_passes() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = FileDataConfig {
            knowledge_base: None,
            case_database: Some(file.path().to_path_buf()),
        };
        assert!(config.validate().is_empty());
    }
}
