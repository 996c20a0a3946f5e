use crate::editor::{EditorField, EditorTree, ValidationIssue};
use crate::registry::{hydrate, BlockSpec};
use crate::responsive::Viewport;
use crate::vdom::VNode;
use pagecraft_page::BlockKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaqConfig {
    pub title: String,
    pub subtitle: Option<String>,
    pub searchable: bool,
    pub categories: Vec<String>,
    pub items: Vec<FaqItem>,
    /// When false, opening one entry is expected to close the others;
    /// surfaced as a data attribute for the host to honor.
    pub allow_multiple: bool,
}

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            title: "Frequently Asked Questions".to_string(),
            subtitle: None,
            searchable: false,
            categories: Vec::new(),
            items: vec![FaqItem {
                question: "How do I schedule a visit?".to_string(),
                answer: "Use the contact form below and our team will reach out.".to_string(),
                category: None,
            }],
            allow_multiple: true,
        }
    }
}

pub struct FaqBlock;

impl BlockSpec for FaqBlock {
    fn kind(&self) -> BlockKind {
        BlockKind::Faq
    }

    fn default_config(&self) -> Value {
        serde_json::to_value(FaqConfig::default()).unwrap_or_default()
    }

    fn render(&self, config: &Value, _viewport: Viewport, _editable: bool) -> VNode {
        let config: FaqConfig = hydrate(config);

        let entries = config.items.iter().map(|item| {
            let mut entry = VNode::element("details").with_class("faq-entry");
            if let Some(category) = &item.category {
                entry = entry.with_attr("data-category", category.clone());
            }
            entry
                .with_child(
                    VNode::element("summary")
                        .with_class("faq-question")
                        .with_child(VNode::text(item.question.clone())),
                )
                .with_child(
                    VNode::element("p")
                        .with_class("faq-answer")
                        .with_child(VNode::text(item.answer.clone())),
                )
        });

        let search = config.searchable.then(|| {
            VNode::element("input")
                .with_class("faq-search")
                .with_attr("type", "search")
                .with_attr("placeholder", "Search questions")
        });
        let subtitle = config.subtitle.clone().filter(|s| !s.is_empty()).map(|s| {
            VNode::element("p")
                .with_class("faq-subtitle")
                .with_child(VNode::text(s))
        });

        VNode::element("section")
            .with_class("faq")
            .with_attr("data-allow-multiple", config.allow_multiple.to_string())
            .with_child(
                VNode::element("h2")
                    .with_class("faq-heading")
                    .with_child(VNode::text(config.title)),
            )
            .with_opt_child(subtitle)
            .with_opt_child(search)
            .with_child(VNode::element("div").with_class("faq-entries").with_children(entries))
    }

    fn edit(&self, _config: &Value) -> EditorTree {
        EditorTree::new(vec![
            EditorField::text("title", "Title"),
            EditorField::text("subtitle", "Subtitle"),
            EditorField::toggle("searchable", "Enable search"),
            EditorField::toggle("allowMultiple", "Allow multiple open"),
            EditorField::list(
                "items",
                "Questions",
                vec![
                    EditorField::text("question", "Question"),
                    EditorField::text_area("answer", "Answer"),
                    EditorField::text("category", "Category"),
                ],
            ),
        ])
    }

    fn validate(&self, config: &Value) -> Vec<ValidationIssue> {
        let config: FaqConfig = hydrate(config);
        let mut issues = Vec::new();

        for (i, item) in config.items.iter().enumerate() {
            if item.question.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    format!("items[{i}].question"),
                    "question must not be empty",
                ));
            }
            if item.answer.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    format!("items[{i}].answer"),
                    "answer must not be empty",
                ));
            }
        }

        issues
    }
}
