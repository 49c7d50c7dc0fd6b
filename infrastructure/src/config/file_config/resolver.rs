//! Resolver configuration from TOML (`[resolver]` section)

use serde::{Deserialize, Serialize};
use triage_domain::{MAX_COMBO_SIZE, ResolverParams};
use triage_domain::config::validation::{ConfigIssue, ConfigIssueCode};

/// Disease resolver configuration from TOML.
///
/// # Example
///
/// ```toml
/// [resolver]
/// max_results = 3
/// max_combo_size = 4
/// partial_discount = 0.7
/// confidence_cap = 0.95
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResolverConfig {
    /// Default number of disease candidates returned
    pub max_results: usize,
    /// Largest symptom subset tried for an exact match
    pub max_combo_size: usize,
    /// Multiplier applied to partial-match confidence
    pub partial_discount: f64,
    /// Upper bound on any candidate's confidence
    pub confidence_cap: f64,
}

impl Default for FileResolverConfig {
    fn default() -> Self {
        let params = ResolverParams::default();
        Self {
            max_results: 3,
            max_combo_size: params.max_combo_size,
            partial_discount: params.partial_discount,
            confidence_cap: params.confidence_cap,
        }
    }
}

impl FileResolverConfig {
    pub fn to_params(&self) -> ResolverParams {
        ResolverParams {
            max_combo_size: self.max_combo_size,
            partial_discount: self.partial_discount,
            confidence_cap: self.confidence_cap,
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.max_results == 0 {
            issues.push(out_of_range("resolver.max_results", "must be at least 1"));
        }
        if !(2..=MAX_COMBO_SIZE).contains(&self.max_combo_size) {
            issues.push(out_of_range(
                "resolver.max_combo_size",
                &format!("must be in 2..={}, got {}", MAX_COMBO_SIZE, self.max_combo_size),
            ));
        }
        if !(self.partial_discount > 0.0 && self.partial_discount <= 1.0) {
            issues.push(out_of_range(
                "resolver.partial_discount",
                &format!("must be in (0, 1], got {}", self.partial_discount),
            ));
        }
        if !(self.confidence_cap > 0.0 && self.confidence_cap <= 1.0) {
            issues.push(out_of_range(
                "resolver.confidence_cap",
                &format!("must be in (0, 1], got {}", self.confidence_cap),
            ));
        }

        issues
    }
}

fn out_of_range(field: &str, detail: &str) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::OutOfRange {
            field: field.to_string(),
        },
        format!("{}: {}", field, detail),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_config_default() {
        let config = FileResolverConfig::default();
        assert_eq!(config.max_results, 3);
        assert_eq!(config.to_params(), ResolverParams::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_resolver_config_deserialize() {
        let toml_str = r#"
[resolver]
max_results = 5
partial_discount = 0.5
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.resolver.max_results, 5);
        assert_eq!(config.resolver.partial_discount, 0.5);
        // Unset fields keep their defaults
        assert_eq!(config.resolver.max_combo_size, 4);
    }

    #[test]
    fn test_resolver_config_out_of_range() {
        let config = FileResolverConfig {
            max_results: 0,
            max_combo_size: 1,
            partial_discount: 0.0,
            confidence_cap: 1.2,
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 4);
        assert!(issues.iter().all(ConfigIssue::is_error));
        assert!(issues.iter().any(|i| i.code
            == ConfigIssueCode::OutOfRange {
                field: "resolver.max_combo_size".to_string()
            }));
    }

    #[test]
    fn test_combo_size_upper_bound() {
        let config = FileResolverConfig {
            max_combo_size: 12,
            ..FileResolverConfig::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(issues[0].message.contains("2..=4"));

        let config = FileResolverConfig {
            max_combo_size: 4,
            ..FileResolverConfig::default()
        };
        assert!(config.validate().is_empty());
    }
}
