//! Menu files.
//!
//! A menu can be supplied as JSON or YAML instead of the built-in catalog:
//!
//! ```yaml
//! default_leaf: llm_infer
//! groups:
//!   - id: infer
//!     title: Serving
//!     leaves:
//!       - id: llm_infer
//!         label: Inference
//!         subtitle: Chat with a deployed model
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use tuneboard_types::{MenuGroup, MenuLeaf};

use crate::error::ConfigurationError;
use crate::model::MenuModel;

/// Serialized form of a menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDocument {
    #[serde(default)]
    pub default_leaf: Option<String>,
    pub groups: Vec<GroupEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub leaves: Vec<LeafEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafEntry {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub subtitle: String,
}

impl MenuDocument {
    /// Validate and convert into a [`MenuModel`].
    pub fn into_model(self) -> Result<MenuModel, ConfigurationError> {
        let mut groups = Vec::with_capacity(self.groups.len());
        let mut leaves = Vec::new();
        for entry in self.groups {
            let leaf_ids = entry.leaves.iter().map(|leaf| leaf.id.clone()).collect();
            for leaf in entry.leaves {
                leaves.push(MenuLeaf::new(leaf.id, leaf.label, entry.id.clone(), leaf.subtitle));
            }
            groups.push(MenuGroup::new(entry.id, entry.title, leaf_ids));
        }

        let model = MenuModel::new(groups, leaves)?;
        match self.default_leaf {
            Some(leaf_id) => model.with_default_leaf(&leaf_id),
            None => Ok(model),
        }
    }
}

/// On-disk encoding of a menu file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFormat {
    Json,
    Yaml,
}

impl MenuFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Errors raised while loading a menu file.
#[derive(Debug, Error)]
pub enum MenuLoadError {
    #[error("Failed to read menu file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported menu file '{path}': expected .json, .yaml or .yml")]
    UnsupportedFormat { path: String },

    #[error("Invalid JSON menu: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML menu: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid menu: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Parse and validate a menu from a string.
pub fn load_menu_from_str(content: &str, format: MenuFormat) -> Result<MenuModel, MenuLoadError> {
    let document: MenuDocument = match format {
        MenuFormat::Json => serde_json::from_str(content)?,
        MenuFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(document.into_model()?)
}

/// Load and validate a menu file; the format follows the extension.
pub fn load_menu_from_path(path: &Path) -> Result<MenuModel, MenuLoadError> {
    let format = MenuFormat::from_path(path).ok_or_else(|| MenuLoadError::UnsupportedFormat {
        path: path.display().to_string(),
    })?;
    let content = fs::read_to_string(path).map_err(|source| MenuLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), ?format, "Loading menu file");
    load_menu_from_str(&content, format)
}
