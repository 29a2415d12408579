//! Error types for menu construction and navigation.

use thiserror::Error;

/// A malformed menu. Raised while building a [`crate::MenuModel`]; fatal at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Menu has no groups")]
    EmptyMenu,

    #[error("Group '{group_id}' is defined more than once")]
    DuplicateGroup { group_id: String },

    #[error("Group '{group_id}' has no leaves")]
    EmptyGroup { group_id: String },

    #[error("Leaf '{leaf_id}' is defined more than once")]
    DuplicateLeaf { leaf_id: String },

    #[error("Leaf '{leaf_id}' is referenced by both '{first_group}' and '{second_group}'")]
    LeafInMultipleGroups {
        leaf_id: String,
        first_group: String,
        second_group: String,
    },

    #[error("Group '{group_id}' references undefined leaf '{leaf_id}'")]
    UndefinedLeaf { group_id: String, leaf_id: String },

    #[error("Leaf '{leaf_id}' declares group '{declared}' but is listed by '{listed_by}'")]
    GroupMismatch {
        leaf_id: String,
        declared: String,
        listed_by: String,
    },

    #[error("Leaf '{leaf_id}' is not listed by any group")]
    OrphanLeaf { leaf_id: String },

    #[error("Invalid id '{id}': {reason}")]
    InvalidId { id: String, reason: String },

    #[error("Default leaf '{leaf_id}' is not part of the menu")]
    UnknownDefaultLeaf { leaf_id: String },
}

/// A panel id could not be resolved by the panel host.
///
/// Recoverable: the engine logs and records it, the sidebar still updates and
/// the visible panel is left unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Panel not found: {panel_id}")]
pub struct PanelNotFound {
    pub panel_id: String,
}

impl PanelNotFound {
    pub fn new(panel_id: impl Into<String>) -> Self {
        Self { panel_id: panel_id.into() }
    }
}

/// The sidebar root is absent, so no click listener can be attached.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Cannot attach sidebar listener: {reason}")]
pub struct ListenerAttachError {
    pub reason: String,
}

impl ListenerAttachError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Errors surfaced by navigation transitions and engine initialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("Leaf not found: {leaf_id}")]
    LeafNotFound { leaf_id: String },

    #[error("Group not found: {group_id}")]
    GroupNotFound { group_id: String },

    #[error(transparent)]
    PanelNotFound(#[from] PanelNotFound),

    #[error(transparent)]
    ListenerAttach(#[from] ListenerAttachError),
}

impl NavError {
    pub fn leaf_not_found(leaf_id: impl Into<String>) -> Self {
        Self::LeafNotFound { leaf_id: leaf_id.into() }
    }

    pub fn group_not_found(group_id: impl Into<String>) -> Self {
        Self::GroupNotFound { group_id: group_id.into() }
    }
}
