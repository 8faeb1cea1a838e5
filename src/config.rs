// Rule configuration loading and parsing (rules.toml).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// rules.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[rules]` table in rules.toml.
#[derive(Debug, Clone, Deserialize)]
struct RulesFile {
    rules: RulesConfig,
}

/// Tunable rule parameters. Defaults match the league's standard values;
/// clubs override them in `rules.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    /// Club-name token preceding the team number in display names.
    pub club_token: String,
    /// Standard-championship roster size.
    #[serde(default = "default_roster_cap")]
    pub roster_cap: usize,
    /// Maximum foreign-class players per standard roster.
    #[serde(default = "default_foreign_cap")]
    pub foreign_cap: usize,
    /// Maximum female players on a male-designated roster.
    #[serde(default = "default_female_cap")]
    pub female_cap: usize,
    /// Round on which the mid-season cross-team rule applies.
    #[serde(default = "default_designated_round")]
    pub designated_round: u32,
    #[serde(default)]
    pub alternate: AlternateConfig,
}

/// Alternate-competition structure parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct AlternateConfig {
    /// Players per group; the competition format fixes this at 3.
    #[serde(default = "default_group_size")]
    pub group_size: usize,
    /// Division label -> number of groups (1..=3 for totals 3/6/9).
    #[serde(default)]
    pub divisions: HashMap<String, usize>,
    /// Group count for divisions missing from the table.
    #[serde(default = "default_groups")]
    pub default_groups: usize,
}

fn default_roster_cap() -> usize {
    4
}

fn default_foreign_cap() -> usize {
    1
}

fn default_female_cap() -> usize {
    2
}

fn default_designated_round() -> u32 {
    2
}

fn default_group_size() -> usize {
    3
}

fn default_groups() -> usize {
    3
}

impl Default for AlternateConfig {
    fn default() -> Self {
        AlternateConfig {
            group_size: default_group_size(),
            divisions: HashMap::new(),
            default_groups: default_groups(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            club_token: String::new(),
            roster_cap: default_roster_cap(),
            foreign_cap: default_foreign_cap(),
            female_cap: default_female_cap(),
            designated_round: default_designated_round(),
            alternate: AlternateConfig::default(),
        }
    }
}

impl RulesConfig {
    /// Default rules with the club-name token set.
    pub fn for_club(club_token: impl Into<String>) -> Self {
        RulesConfig {
            club_token: club_token.into(),
            ..RulesConfig::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate rule parameters from a `rules.toml` file.
pub fn load_rules_from(path: &Path) -> Result<RulesConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    let file: RulesFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let rules = file.rules;
    validate(&rules)?;
    Ok(rules)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(rules: &RulesConfig) -> Result<(), ConfigError> {
    if rules.roster_cap == 0 {
        return Err(ConfigError::ValidationError {
            field: "rules.roster_cap".into(),
            message: "must be greater than 0".into(),
        });
    }

    if rules.foreign_cap > rules.roster_cap {
        return Err(ConfigError::ValidationError {
            field: "rules.foreign_cap".into(),
            message: format!(
                "must not exceed roster_cap ({}), got {}",
                rules.roster_cap, rules.foreign_cap
            ),
        });
    }

    if rules.designated_round == 0 {
        return Err(ConfigError::ValidationError {
            field: "rules.designated_round".into(),
            message: "rounds are 1-indexed, must be greater than 0".into(),
        });
    }

    let alt = &rules.alternate;
    if alt.group_size == 0 {
        return Err(ConfigError::ValidationError {
            field: "rules.alternate.group_size".into(),
            message: "must be greater than 0".into(),
        });
    }

    if alt.default_groups == 0 {
        return Err(ConfigError::ValidationError {
            field: "rules.alternate.default_groups".into(),
            message: "must be greater than 0".into(),
        });
    }

    for (division, &groups) in &alt.divisions {
        if groups == 0 {
            return Err(ConfigError::ValidationError {
                field: format!("rules.alternate.divisions.{division}"),
                message: "must be greater than 0".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
