use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tempfile::TempDir;


/// Test fixture for MCP integration tests
///
/// Manages a temporary project root holding a statistics store, catalogs and
/// an optional `.transkitrc.json`.
pub struct McpTestFixture {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl McpTestFixture {
    /// Create an empty test project
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().canonicalize()?;
        fs::create_dir(project_root.join(".git"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_root,
        })
    }

    /// Create a test project with a store at the default location
    pub fn with_store(store: &Value) -> Result<Self> {
        let fixture = Self::new()?;
        fixture.write_store("transkit-store.json", store)?;
        Ok(fixture)
    }

    pub fn write_store(&self, relative_path: &str, store: &Value) -> Result<()> {
        let json_str = serde_json::to_string_pretty(store)?;
        self.write_file(relative_path, &format!("{}\n", json_str))
    }

    pub fn read_store(&self, relative_path: &str) -> Result<Value> {
        let path = self.project_root.join(relative_path);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read store: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from: {}", path.display()))
    }

    pub fn write_file(&self, relative_path: &str, content: &str) -> Result<()> {
        let path = self.project_root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(())
    }

    /// Write a .transkitrc.json config file
    pub fn write_config(&self, content: &Value) -> Result<()> {
        let json_str = serde_json::to_string_pretty(content)?;
        self.write_file(".transkitrc.json", &format!("{}\n", json_str))
    }

    /// Get the project root path as a string (for MCP parameters)
    pub fn root(&self) -> String {
        self.project_root.to_string_lossy().to_string()
    }

    /// Absolute path of a project file as a string
    pub fn path(&self, relative_path: &str) -> String {
        self.root_path()
            .join(relative_path)
            .to_string_lossy()
            .to_string()
    }

    pub fn root_path(&self) -> &Path {
        &self.project_root
    }
}

// ============================================================================
// Fixture Generators
// ============================================================================

/// Two resources in project `proj`: `app` has a French translation, `docs`
/// has none. Both carry a stale Italian record.
pub fn two_resource_store() -> Value {
    json!({
        "languages": [
            {"code": "en", "name": "English"},
            {"code": "fr", "name": "French"},
            {"code": "it", "name": "Italian"}
        ],
        "resources": [
            {"id": 1, "project": "proj", "slug": "app", "name": "App", "sourceLanguage": "en"},
            {"id": 2, "project": "proj", "slug": "docs", "name": "Docs", "sourceLanguage": "en"}
        ],
        "sourceEntities": [
            {"id": 1, "resource": 1, "string": "Save"},
            {"id": 2, "resource": 1, "string": "Cancel"},
            {"id": 3, "resource": 2, "string": "Introduction"}
        ],
        "translations": [
            {"id": 1, "sourceEntity": 1, "language": "fr", "string": "Enregistrer"}
        ],
        "stats": [
            {"id": 1, "resource": 1, "language": "it"},
            {"id": 2, "resource": 2, "language": "it"}
        ]
    })
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Languages of the statistics records of one resource, sorted
pub fn stats_languages(store: &Value, resource: u64) -> Vec<String> {
    let mut languages: Vec<String> = store["stats"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["resource"] == resource)
        .map(|s| s["language"].as_str().unwrap().to_string())
        .collect();
    languages.sort();
    languages
}

/// Extract JSON value from a successful CallToolResult
///
/// Panics if the result indicates an error or cannot be parsed
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    let content_item = &result.content[0];
    let text_content = content_item
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}
