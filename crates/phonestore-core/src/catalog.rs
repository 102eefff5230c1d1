use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Catalog-wide naming rules.
///
/// `single_tier_patterns` lists product-line fragments (matched
/// case-insensitively against the base product name) for phones sold without
/// distinct RAM tiers. Those lines are named and keyed by storage alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRules {
    pub single_tier_patterns: Vec<String>,
}

impl Default for CatalogRules {
    fn default() -> Self {
        Self {
            single_tier_patterns: vec!["iphone".to_string()],
        }
    }
}

impl CatalogRules {
    /// Returns `true` if `base_product_name` belongs to a single-RAM-tier line.
    #[must_use]
    pub fn is_single_tier(&self, base_product_name: &str) -> bool {
        let lower = base_product_name.to_lowercase();
        self.single_tier_patterns
            .iter()
            .map(|p| p.trim().to_lowercase())
            .any(|p| !p.is_empty() && lower.contains(p.as_str()))
    }
}

/// Load and validate catalog rules from a YAML file.
///
/// A missing file is not an error: the built-in defaults are returned and a
/// debug line is logged.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read, parsed, or
/// fails validation.
pub fn load_catalog_rules(path: &Path) -> Result<CatalogRules, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                path = %path.display(),
                "catalog rules file not found; using defaults"
            );
            return Ok(CatalogRules::default());
        }
        Err(e) => {
            return Err(ConfigError::CatalogFileIo {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    parse_catalog_rules(&content)
}

fn parse_catalog_rules(content: &str) -> Result<CatalogRules, ConfigError> {
    let mut rules: CatalogRules = serde_yaml::from_str(content)?;
    for pattern in &mut rules.single_tier_patterns {
        *pattern = pattern.trim().to_lowercase();
    }
    validate_rules(&rules)?;
    Ok(rules)
}

fn validate_rules(rules: &CatalogRules) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for pattern in &rules.single_tier_patterns {
        if pattern.is_empty() {
            return Err(ConfigError::Validation(
                "single-tier pattern must be non-empty".to_string(),
            ));
        }
        if !seen.insert(pattern.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate single-tier pattern: '{pattern}'"
            )));
        }
    }
    Ok(())
}
