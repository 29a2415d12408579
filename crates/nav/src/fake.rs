//! In-memory locator and view used by the engine tests.

use std::collections::BTreeMap;

use tuneboard_types::{Breadcrumb, ClickTarget};

use crate::error::{ListenerAttachError, PanelNotFound};
use crate::locator::PanelLocator;
use crate::model::MenuModel;
use crate::view::SidebarView;

/// Groups `train = {llm_train, llm_rlhf, llm_grpo}` and `infer = {llm_infer, llm_export}`.
pub(crate) fn scenario_model() -> MenuModel {
    MenuModel::builder()
        .group("train", "Model Training")
        .leaf("llm_train", "LLM Pretrain/Fine-tune", "Pretraining and supervised fine-tuning")
        .leaf("llm_rlhf", "LLM Human Alignment", "Preference alignment")
        .leaf("llm_grpo", "LLM GRPO", "Group relative policy optimization")
        .group("infer", "Model Serving")
        .leaf("llm_infer", "LLM Inference", "Deploy and chat")
        .leaf("llm_export", "LLM Export", "Merge and quantize")
        .build()
        .expect("scenario model is valid")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FakeNode {
    Root,
    GroupHeader(String),
    Arrow(String),
    Submenu(String),
    Leaf(String),
    LeafLabel(String),
    Outside,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingView {
    leaf_groups: BTreeMap<String, String>,
    root_present: bool,
    pub attached: usize,
    pub leaf_active: BTreeMap<String, bool>,
    pub group_active: BTreeMap<String, bool>,
    pub submenu_expanded: BTreeMap<String, bool>,
    pub indicator_expanded: BTreeMap<String, bool>,
    pub breadcrumb: Option<Breadcrumb>,
}

impl RecordingView {
    pub fn for_model(model: &MenuModel) -> Self {
        Self {
            leaf_groups: model.leaves().map(|leaf| (leaf.id.clone(), leaf.group_id.clone())).collect(),
            root_present: true,
            ..Default::default()
        }
    }

    pub fn with_scenario_tree() -> Self {
        Self::for_model(&scenario_model())
    }

    pub fn without_root(mut self) -> Self {
        self.root_present = false;
        self
    }

    pub fn active_leaves(&self) -> Vec<String> {
        Self::enabled(&self.leaf_active)
    }

    pub fn active_groups(&self) -> Vec<String> {
        Self::enabled(&self.group_active)
    }

    pub fn expanded_submenus(&self) -> Vec<String> {
        Self::enabled(&self.submenu_expanded)
    }

    fn enabled(map: &BTreeMap<String, bool>) -> Vec<String> {
        map.iter().filter(|(_, on)| **on).map(|(id, _)| id.clone()).collect()
    }
}

impl SidebarView for RecordingView {
    type Node = FakeNode;

    fn attach_listener(&mut self) -> Result<(), ListenerAttachError> {
        if !self.root_present {
            return Err(ListenerAttachError::new("sidebar root missing"));
        }
        self.attached += 1;
        Ok(())
    }

    fn is_root(&self, node: &FakeNode) -> bool {
        *node == FakeNode::Root
    }

    fn parent(&self, node: &FakeNode) -> Option<FakeNode> {
        match node {
            FakeNode::Root | FakeNode::Outside => None,
            FakeNode::GroupHeader(_) | FakeNode::Submenu(_) => Some(FakeNode::Root),
            FakeNode::Arrow(group) => Some(FakeNode::GroupHeader(group.clone())),
            FakeNode::Leaf(leaf) => self.leaf_groups.get(leaf).map(|group| FakeNode::Submenu(group.clone())),
            FakeNode::LeafLabel(leaf) => Some(FakeNode::Leaf(leaf.clone())),
        }
    }

    fn classify(&self, node: &FakeNode) -> Option<ClickTarget> {
        match node {
            FakeNode::Leaf(leaf) => Some(ClickTarget::Leaf(leaf.clone())),
            FakeNode::GroupHeader(group) => Some(ClickTarget::GroupHeader(group.clone())),
            _ => None,
        }
    }

    fn set_leaf_active(&mut self, leaf_id: &str, active: bool) {
        self.leaf_active.insert(leaf_id.to_string(), active);
    }

    fn set_group_active(&mut self, group_id: &str, active: bool) {
        self.group_active.insert(group_id.to_string(), active);
    }

    fn set_submenu_expanded(&mut self, group_id: &str, expanded: bool) {
        self.submenu_expanded.insert(group_id.to_string(), expanded);
    }

    fn set_expand_indicator(&mut self, group_id: &str, expanded: bool) {
        self.indicator_expanded.insert(group_id.to_string(), expanded);
    }

    fn set_breadcrumb(&mut self, breadcrumb: &Breadcrumb) {
        self.breadcrumb = Some(breadcrumb.clone());
    }
}

/// All panels share one container. Panels listed in `unmounted` fail to resolve.
#[derive(Debug, Default)]
pub(crate) struct FakeLocator {
    pub visible: BTreeMap<String, bool>,
    pub suppress_calls: usize,
    pub native_controls_hidden: bool,
}

impl FakeLocator {
    pub fn for_model(model: &MenuModel) -> Self {
        Self {
            visible: model.leaves().map(|leaf| (leaf.id.clone(), true)).collect(),
            ..Default::default()
        }
    }

    pub fn unmount(mut self, panel_id: &str) -> Self {
        self.visible.remove(panel_id);
        self
    }

    pub fn visible_panels(&self) -> Vec<String> {
        self.visible.iter().filter(|(_, on)| **on).map(|(id, _)| id.clone()).collect()
    }
}

impl PanelLocator for FakeLocator {
    type Handle = String;

    fn resolve(&self, panel_id: &str) -> Result<String, PanelNotFound> {
        if self.visible.contains_key(panel_id) {
            Ok(panel_id.to_string())
        } else {
            Err(PanelNotFound::new(panel_id))
        }
    }

    fn siblings_of(&self, panel_id: &str) -> Vec<String> {
        if !self.visible.contains_key(panel_id) {
            return Vec::new();
        }
        self.visible.keys().filter(|id| id.as_str() != panel_id).cloned().collect()
    }

    fn show(&mut self, handle: &String) {
        if let Some(visible) = self.visible.get_mut(handle) {
            *visible = true;
        }
    }

    fn hide(&mut self, handle: &String) {
        if let Some(visible) = self.visible.get_mut(handle) {
            *visible = false;
        }
    }

    fn suppress_native_controls(&mut self) {
        self.suppress_calls += 1;
        self.native_controls_hidden = true;
    }
}
