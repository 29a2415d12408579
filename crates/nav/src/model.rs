//! Immutable navigation tree.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;
use tuneboard_types::{MenuGroup, MenuLeaf};

use crate::error::{ConfigurationError, NavError};

static DOM_ID_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("dom id regex should compile"));

/// Validate that an id can be used verbatim as an element id and data attribute.
pub fn validate_dom_id(id: &str) -> Result<(), ConfigurationError> {
    if id.is_empty() {
        return Err(ConfigurationError::InvalidId {
            id: id.to_string(),
            reason: "id cannot be empty".to_string(),
        });
    }

    if !DOM_ID_REGEX.is_match(id) {
        return Err(ConfigurationError::InvalidId {
            id: id.to_string(),
            reason: "id must contain only letters, numbers, underscores, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Static description of the navigation tree: groups → leaves → panel ids.
///
/// Built once at startup and never mutated. Both maps keep display order.
#[derive(Debug, Clone)]
pub struct MenuModel {
    groups: IndexMap<String, MenuGroup>,
    leaves: IndexMap<String, MenuLeaf>,
    default_leaf_id: String,
}

impl MenuModel {
    /// Build a model from groups and leaf definitions.
    ///
    /// The default leaf is the first leaf of the first group.
    pub fn new(groups: Vec<MenuGroup>, leaves: Vec<MenuLeaf>) -> Result<Self, ConfigurationError> {
        if groups.is_empty() {
            return Err(ConfigurationError::EmptyMenu);
        }

        let mut definitions: HashMap<String, MenuLeaf> = HashMap::with_capacity(leaves.len());
        for leaf in leaves {
            validate_dom_id(&leaf.id)?;
            if definitions.contains_key(&leaf.id) {
                return Err(ConfigurationError::DuplicateLeaf { leaf_id: leaf.id });
            }
            definitions.insert(leaf.id.clone(), leaf);
        }

        let mut ordered_groups: IndexMap<String, MenuGroup> = IndexMap::with_capacity(groups.len());
        let mut owners: HashMap<String, String> = HashMap::new();
        let mut ordered_leaves: IndexMap<String, MenuLeaf> = IndexMap::with_capacity(definitions.len());

        for group in groups {
            validate_dom_id(&group.id)?;
            if ordered_groups.contains_key(&group.id) {
                return Err(ConfigurationError::DuplicateGroup { group_id: group.id });
            }
            if group.leaf_ids.is_empty() {
                return Err(ConfigurationError::EmptyGroup { group_id: group.id });
            }

            for leaf_id in &group.leaf_ids {
                if let Some(first_group) = owners.get(leaf_id) {
                    return Err(ConfigurationError::LeafInMultipleGroups {
                        leaf_id: leaf_id.clone(),
                        first_group: first_group.clone(),
                        second_group: group.id.clone(),
                    });
                }
                let Some(leaf) = definitions.remove(leaf_id) else {
                    return Err(ConfigurationError::UndefinedLeaf {
                        group_id: group.id.clone(),
                        leaf_id: leaf_id.clone(),
                    });
                };
                if leaf.group_id != group.id {
                    return Err(ConfigurationError::GroupMismatch {
                        leaf_id: leaf.id,
                        declared: leaf.group_id,
                        listed_by: group.id.clone(),
                    });
                }
                owners.insert(leaf_id.clone(), group.id.clone());
                ordered_leaves.insert(leaf_id.clone(), leaf);
            }

            ordered_groups.insert(group.id.clone(), group);
        }

        if let Some(leaf_id) = definitions.into_keys().min() {
            return Err(ConfigurationError::OrphanLeaf { leaf_id });
        }

        let default_leaf_id = ordered_groups
            .first()
            .and_then(|(_, group)| group.leaf_ids.first().cloned())
            .ok_or(ConfigurationError::EmptyMenu)?;

        debug!(
            groups = ordered_groups.len(),
            leaves = ordered_leaves.len(),
            default_leaf = %default_leaf_id,
            "Built menu model"
        );

        Ok(Self {
            groups: ordered_groups,
            leaves: ordered_leaves,
            default_leaf_id,
        })
    }

    /// Override the leaf selected on initial load.
    pub fn with_default_leaf(mut self, leaf_id: &str) -> Result<Self, ConfigurationError> {
        if !self.leaves.contains_key(leaf_id) {
            return Err(ConfigurationError::UnknownDefaultLeaf {
                leaf_id: leaf_id.to_string(),
            });
        }
        self.default_leaf_id = leaf_id.to_string();
        Ok(self)
    }

    /// Start a fluent builder.
    pub fn builder() -> MenuBuilder {
        MenuBuilder::default()
    }

    /// Groups in display order.
    pub fn groups(&self) -> impl Iterator<Item = &MenuGroup> {
        self.groups.values()
    }

    /// Leaves in display order (group by group).
    pub fn leaves(&self) -> impl Iterator<Item = &MenuLeaf> {
        self.leaves.values()
    }

    pub fn leaf_by_id(&self, leaf_id: &str) -> Result<&MenuLeaf, NavError> {
        self.leaves.get(leaf_id).ok_or_else(|| NavError::leaf_not_found(leaf_id))
    }

    pub fn group_by_id(&self, group_id: &str) -> Result<&MenuGroup, NavError> {
        self.groups.get(group_id).ok_or_else(|| NavError::group_not_found(group_id))
    }

    /// The group owning `leaf_id`.
    pub fn group_of(&self, leaf_id: &str) -> Result<&MenuGroup, NavError> {
        let leaf = self.leaf_by_id(leaf_id)?;
        self.group_by_id(&leaf.group_id)
    }

    pub fn default_leaf_id(&self) -> &str {
        &self.default_leaf_id
    }
}

/// Fluent construction of a [`MenuModel`]; leaves attach to the last group.
#[derive(Debug, Default)]
pub struct MenuBuilder {
    groups: Vec<MenuGroup>,
    leaves: Vec<MenuLeaf>,
    default_leaf: Option<String>,
}

impl MenuBuilder {
    pub fn group(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        self.groups.push(MenuGroup::new(id, title, Vec::new()));
        self
    }

    /// Add a leaf to the most recently added group. Leaves added before any
    /// group are kept as orphans and rejected by `build`.
    pub fn leaf(mut self, id: impl Into<String>, label: impl Into<String>, subtitle: impl Into<String>) -> Self {
        let id = id.into();
        let group_id = match self.groups.last_mut() {
            Some(group) => {
                group.leaf_ids.push(id.clone());
                group.id.clone()
            }
            None => String::new(),
        };
        self.leaves.push(MenuLeaf::new(id, label, group_id, subtitle));
        self
    }

    pub fn default_leaf(mut self, leaf_id: impl Into<String>) -> Self {
        self.default_leaf = Some(leaf_id.into());
        self
    }

    pub fn build(self) -> Result<MenuModel, ConfigurationError> {
        let model = MenuModel::new(self.groups, self.leaves)?;
        match self.default_leaf {
            Some(leaf_id) => model.with_default_leaf(&leaf_id),
            None => Ok(model),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_model() -> MenuModel {
        MenuModel::builder()
            .group("train", "Train")
            .leaf("llm_train", "Train", "")
            .leaf("llm_rlhf", "RLHF", "")
            .leaf("llm_grpo", "GRPO", "")
            .group("infer", "Infer")
            .leaf("llm_infer", "Infer", "")
            .leaf("llm_export", "Export", "")
            .build()
            .expect("valid model")
    }

    #[test]
    fn groups_and_leaves_keep_display_order() {
        let model = scenario_model();
        let groups: Vec<_> = model.groups().map(|g| g.id.as_str()).collect();
        assert_eq!(groups, vec!["train", "infer"]);
        let leaves: Vec<_> = model.leaves().map(|l| l.id.as_str()).collect();
        assert_eq!(leaves, vec!["llm_train", "llm_rlhf", "llm_grpo", "llm_infer", "llm_export"]);
    }

    #[test]
    fn group_of_returns_owning_group() {
        let model = scenario_model();
        assert_eq!(model.group_of("llm_export").map(|g| g.id.as_str()), Ok("infer"));
        assert_eq!(
            model.group_of("missing").map(|g| g.id.clone()),
            Err(NavError::leaf_not_found("missing"))
        );
    }

    #[test]
    fn default_leaf_is_first_leaf_of_first_group() {
        assert_eq!(scenario_model().default_leaf_id(), "llm_train");
    }

    #[test]
    fn default_leaf_can_be_overridden() {
        let model = scenario_model().with_default_leaf("llm_infer").expect("known leaf");
        assert_eq!(model.default_leaf_id(), "llm_infer");
        assert!(scenario_model().with_default_leaf("nope").is_err());
    }

    #[test]
    fn rejects_empty_group() {
        let err = MenuModel::builder()
            .group("train", "Train")
            .leaf("llm_train", "Train", "")
            .group("empty", "Empty")
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyGroup { group_id: "empty".into() });
    }

    #[test]
    fn rejects_leaf_listed_by_two_groups() {
        let groups = vec![
            MenuGroup::new("a", "A", vec!["shared".into()]),
            MenuGroup::new("b", "B", vec!["shared".into()]),
        ];
        let leaves = vec![MenuLeaf::new("shared", "Shared", "a", "")];
        let err = MenuModel::new(groups, leaves).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::LeafInMultipleGroups {
                leaf_id: "shared".into(),
                first_group: "a".into(),
                second_group: "b".into(),
            }
        );
    }

    #[test]
    fn rejects_duplicate_leaf_definition() {
        let groups = vec![MenuGroup::new("a", "A", vec!["x".into()])];
        let leaves = vec![MenuLeaf::new("x", "X", "a", ""), MenuLeaf::new("x", "X again", "a", "")];
        assert_eq!(
            MenuModel::new(groups, leaves).unwrap_err(),
            ConfigurationError::DuplicateLeaf { leaf_id: "x".into() }
        );
    }

    #[test]
    fn rejects_structural_mistakes() {
        assert_eq!(MenuModel::new(vec![], vec![]).unwrap_err(), ConfigurationError::EmptyMenu);

        let undefined = MenuModel::new(vec![MenuGroup::new("a", "A", vec!["ghost".into()])], vec![]);
        assert!(matches!(undefined, Err(ConfigurationError::UndefinedLeaf { .. })));

        let mismatch = MenuModel::new(
            vec![MenuGroup::new("a", "A", vec!["x".into()])],
            vec![MenuLeaf::new("x", "X", "b", "")],
        );
        assert!(matches!(mismatch, Err(ConfigurationError::GroupMismatch { .. })));

        let orphan = MenuModel::new(
            vec![MenuGroup::new("a", "A", vec!["x".into()])],
            vec![MenuLeaf::new("x", "X", "a", ""), MenuLeaf::new("y", "Y", "a", "")],
        );
        assert_eq!(orphan.unwrap_err(), ConfigurationError::OrphanLeaf { leaf_id: "y".into() });

        let duplicate_group = MenuModel::builder()
            .group("a", "A")
            .leaf("x", "X", "")
            .group("a", "A again")
            .leaf("y", "Y", "")
            .build();
        assert_eq!(duplicate_group.unwrap_err(), ConfigurationError::DuplicateGroup { group_id: "a".into() });
    }

    #[test]
    fn validate_dom_id_rejects_unsafe_tokens() {
        assert!(validate_dom_id("llm_train").is_ok());
        assert!(validate_dom_id("group-1").is_ok());
        assert!(validate_dom_id("").is_err());
        assert!(validate_dom_id("has space").is_err());
        assert!(validate_dom_id("quote'd").is_err());
    }
}
