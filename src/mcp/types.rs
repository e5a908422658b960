use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::forms::TranslationForm;
use crate::stats::{FailurePolicy, RefreshReport};

// ============================================================
// Config Types (get_config)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path of the project root
    pub project_root_path: String,
}

/// Configuration DTO for MCP
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub store_path: String,
    pub chars_per_row: usize,
    pub failure_policy: FailurePolicy,
    pub log_level: String,
}

impl From<crate::config::Config> for ConfigValues {
    fn from(c: crate::config::Config) -> Self {
        Self {
            store_path: c.store_path,
            chars_per_row: c.chars_per_row,
            failure_policy: c.failure_policy,
            log_level: c.log_level,
        }
    }
}

// ============================================================
// Statistics Types (update_stats)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatsParams {
    /// Absolute path of the project root
    pub project_root_path: String,
    /// Resources as "<project>.<resource>"; every resource when omitted
    #[serde(default)]
    pub selectors: Option<Vec<String>>,
    /// Abort on the first failing resource instead of reporting it
    #[serde(default)]
    pub fail_fast: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatsResult {
    pub store_path: String,
    pub report: RefreshReport,
}

// ============================================================
// Form Types (build_form)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildFormParams {
    /// Absolute path of a .po catalog
    pub catalog_path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildFormResult {
    pub catalog_path: String,
    pub entry_count: usize,
    /// Field name to field definition, in form order
    pub fields: TranslationForm,
}
