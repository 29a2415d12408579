//! Built-in workspace menu and page locale text.

use tuneboard_types::Language;

use crate::error::ConfigurationError;
use crate::model::MenuModel;

/// Leaf selected on initial load of the built-in menu.
pub const DEFAULT_LEAF_ID: &str = "llm_train";

struct GroupText {
    id: &'static str,
    zh: &'static str,
    en: &'static str,
    leaves: &'static [LeafText],
}

struct LeafText {
    id: &'static str,
    zh: &'static str,
    en: &'static str,
    zh_subtitle: &'static str,
    en_subtitle: &'static str,
}

const WORKSPACES: &[GroupText] = &[
    GroupText {
        id: "train",
        zh: "模型训练",
        en: "Model Training",
        leaves: &[
            LeafText {
                id: "llm_train",
                zh: "LLM预训练/微调",
                en: "LLM Pretrain/Fine-tune",
                zh_subtitle: "配置模型与数据集，启动预训练或微调任务",
                en_subtitle: "Configure model and datasets, then launch pretraining or fine-tuning",
            },
            LeafText {
                id: "llm_rlhf",
                zh: "LLM人类对齐",
                en: "LLM Human Alignment",
                zh_subtitle: "使用DPO、KTO、PPO等方法进行偏好对齐",
                en_subtitle: "Align with human preferences using DPO, KTO, PPO and related methods",
            },
            LeafText {
                id: "llm_grpo",
                zh: "LLM GRPO",
                en: "LLM GRPO",
                zh_subtitle: "基于奖励函数的群组相对策略优化训练",
                en_subtitle: "Group relative policy optimization driven by reward functions",
            },
        ],
    },
    GroupText {
        id: "infer",
        zh: "模型服务",
        en: "Model Serving",
        leaves: &[
            LeafText {
                id: "llm_infer",
                zh: "LLM推理",
                en: "LLM Inference",
                zh_subtitle: "部署模型并在线对话",
                en_subtitle: "Deploy a model and chat with it",
            },
            LeafText {
                id: "llm_export",
                zh: "LLM导出",
                en: "LLM Export",
                zh_subtitle: "合并LoRA权重、量化并导出模型",
                en_subtitle: "Merge LoRA weights, quantize and export models",
            },
        ],
    },
    GroupText {
        id: "eval",
        zh: "评测与演示",
        en: "Evaluation & Demo",
        leaves: &[
            LeafText {
                id: "llm_eval",
                zh: "LLM评测",
                en: "LLM Evaluation",
                zh_subtitle: "在标准评测集上评估模型能力",
                en_subtitle: "Benchmark models on standard evaluation sets",
            },
            LeafText {
                id: "llm_sample",
                zh: "LLM采样",
                en: "LLM Sampling",
                zh_subtitle: "批量采样生成数据",
                en_subtitle: "Sample model outputs in batches to build datasets",
            },
        ],
    },
];

/// The seven task workspaces grouped as training, serving, and evaluation.
pub fn builtin_menu(language: Language) -> Result<MenuModel, ConfigurationError> {
    let mut builder = MenuModel::builder();
    for group in WORKSPACES {
        builder = builder.group(group.id, language.pick(group.zh, group.en));
        for leaf in group.leaves {
            builder = builder.leaf(
                leaf.id,
                language.pick(leaf.zh, leaf.en),
                language.pick(leaf.zh_subtitle, leaf.en_subtitle),
            );
        }
    }
    builder.default_leaf(DEFAULT_LEAF_ID).build()
}

/// Fixed page text outside the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub window_title: &'static str,
    pub title: &'static str,
    pub sidebar_heading: &'static str,
    pub star_prompt: &'static str,
}

pub fn page_text(language: Language) -> PageText {
    PageText {
        window_title: "Tuneboard",
        title: language.pick("轻量级大模型训练推理平台", "Lightweight Large Model Training and Inference Platform"),
        sidebar_heading: language.pick("大模型训练推理平台", "Model Workbench"),
        star_prompt: language.pick(
            "喜欢这个平台就动动手指给我们加个star吧",
            "If you like this platform, please take a few seconds to star us",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_menu_has_three_groups_and_seven_leaves() {
        let model = builtin_menu(Language::En).expect("builtin menu is valid");
        let groups: Vec<_> = model.groups().map(|g| g.id.as_str()).collect();
        assert_eq!(groups, vec!["train", "infer", "eval"]);
        assert_eq!(model.leaves().count(), 7);
        assert_eq!(model.default_leaf_id(), DEFAULT_LEAF_ID);
    }

    #[test]
    fn builtin_menu_follows_language() {
        let zh = builtin_menu(Language::Zh).expect("zh menu");
        let en = builtin_menu(Language::En).expect("en menu");
        assert_eq!(zh.leaf_by_id("llm_infer").map(|l| l.label.as_str()), Ok("LLM推理"));
        assert_eq!(en.leaf_by_id("llm_infer").map(|l| l.label.as_str()), Ok("LLM Inference"));
        assert_eq!(en.group_by_id("eval").map(|g| g.title.as_str()), Ok("Evaluation & Demo"));
    }

    #[test]
    fn page_text_is_localized() {
        assert_eq!(page_text(Language::Zh).title, "轻量级大模型训练推理平台");
        assert!(page_text(Language::En).title.starts_with("Lightweight"));
    }
}
