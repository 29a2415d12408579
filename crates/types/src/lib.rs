use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A single selectable navigation entry.
///
/// The leaf id doubles as the id of the content panel it controls, so it must
/// be unique across the whole menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLeaf {
    /// Unique leaf id; also the target panel id (e.g., "llm_train")
    pub id: String,
    /// Text shown in the sidebar and used as the breadcrumb title
    pub label: String,
    /// Id of the group that owns this leaf
    pub group_id: String,
    /// Description shown under the breadcrumb while the leaf is active
    #[serde(default)]
    pub subtitle: String,
}

impl MenuLeaf {
    pub fn new(id: impl Into<String>, label: impl Into<String>, group_id: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            group_id: group_id.into(),
            subtitle: subtitle.into(),
        }
    }
}

/// A collapsible cluster of leaves sharing a header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuGroup {
    /// Unique group id (e.g., "train")
    pub id: String,
    /// Header text
    pub title: String,
    /// Leaf ids in display order
    pub leaf_ids: Vec<String>,
}

impl MenuGroup {
    pub fn new(id: impl Into<String>, title: impl Into<String>, leaf_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            leaf_ids,
        }
    }
}

/// Page-level title/subtitle reflecting the active leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub title: String,
    pub subtitle: String,
}

/// Result of interpreting a click delegated to the sidebar root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ClickTarget {
    /// A leaf element carrying the leaf (and panel) id
    Leaf(String),
    /// A group header carrying the group id
    GroupHeader(String),
}

/// UI language for labels and titles.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }

    /// Picks the string matching this language.
    pub fn pick<'a>(&self, zh: &'a str, en: &'a str) -> &'a str {
        match self {
            Self::Zh => zh,
            Self::En => en,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh" => Ok(Self::Zh),
            "en" => Ok(Self::En),
            _ => Err(ParseLanguageError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLanguageError(String);

impl fmt::Display for ParseLanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid language '{}'; expected 'zh' or 'en'", self.0)
    }
}

impl Error for ParseLanguageError {}
