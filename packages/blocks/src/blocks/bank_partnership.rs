use crate::editor::{EditorField, EditorTree, ValidationIssue};
use crate::registry::{hydrate, BlockSpec};
use crate::responsive::{resolve, Viewport};
use crate::vdom::VNode;
use pagecraft_page::BlockKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Bank {
    pub name: String,
    pub logo: String,
    pub description: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankPartnershipConfig {
    pub title: String,
    pub subtitle: Option<String>,
    pub banks: Vec<Bank>,
    pub background_color: Option<String>,
    pub show_description: bool,
    pub layout: BankLayout,
    pub columns: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankLayout {
    Grid,
    Carousel,
}

impl Default for BankPartnershipConfig {
    fn default() -> Self {
        Self {
            title: "Financing Partners".to_string(),
            subtitle: None,
            banks: Vec::new(),
            background_color: None,
            show_description: false,
            layout: BankLayout::Grid,
            columns: 4,
        }
    }
}

pub struct BankPartnershipBlock;

impl BlockSpec for BankPartnershipBlock {
    fn kind(&self) -> BlockKind {
        BlockKind::BankPartnership
    }

    fn default_config(&self) -> Value {
        serde_json::to_value(BankPartnershipConfig::default()).unwrap_or_default()
    }

    fn render(&self, config: &Value, viewport: Viewport, _editable: bool) -> VNode {
        let config: BankPartnershipConfig = hydrate(config);

        let items = config.banks.iter().map(|bank| {
            let logo = VNode::element("img")
                .with_class("bank-logo")
                .with_attr("src", bank.logo.clone())
                .with_attr("alt", bank.name.clone());

            let mut item = VNode::element("div").with_class("bank-item");
            item = match &bank.website {
                Some(url) => item.with_child(
                    VNode::element("a")
                        .with_attr("href", url.clone())
                        .with_attr("rel", "noopener")
                        .with_child(logo),
                ),
                None => item.with_child(logo),
            };
            if config.show_description {
                if let Some(description) = &bank.description {
                    item = item.with_child(
                        VNode::element("p")
                            .with_class("bank-description")
                            .with_child(VNode::text(description.clone())),
                    );
                }
            }
            item
        });

        let body = match config.layout {
            BankLayout::Carousel => VNode::element("div")
                .with_class("bank-carousel")
                .with_children(items),
            BankLayout::Grid => {
                let grid = resolve(config.columns, viewport);
                VNode::element("div")
                    .with_class("bank-grid")
                    .with_class(grid.class)
                    .with_attr("data-columns", grid.columns.to_string())
                    .with_children(items)
            }
        };

        let subtitle = config.subtitle.clone().filter(|s| !s.is_empty()).map(|s| {
            VNode::element("p")
                .with_class("bank-subtitle")
                .with_child(VNode::text(s))
        });

        VNode::element("section")
            .with_class("bank-partnership")
            .with_opt_style("background-color", &config.background_color)
            .with_child(
                VNode::element("h2")
                    .with_class("bank-heading")
                    .with_child(VNode::text(config.title.clone())),
            )
            .with_opt_child(subtitle)
            .with_child(body)
    }

    fn edit(&self, _config: &Value) -> EditorTree {
        EditorTree::new(vec![
            EditorField::text("title", "Title"),
            EditorField::text("subtitle", "Subtitle"),
            EditorField::select("layout", "Layout", &["grid", "carousel"]),
            EditorField::number("columns", "Columns"),
            EditorField::toggle("showDescription", "Show descriptions"),
            EditorField::color("backgroundColor", "Background color"),
            EditorField::list(
                "banks",
                "Banks",
                vec![
                    EditorField::text("name", "Name"),
                    EditorField::image("logo", "Logo"),
                    EditorField::text("description", "Description"),
                    EditorField::text("website", "Website"),
                ],
            ),
        ])
    }

    fn validate(&self, config: &Value) -> Vec<ValidationIssue> {
        let config: BankPartnershipConfig = hydrate(config);
        let mut issues = Vec::new();

        for (i, bank) in config.banks.iter().enumerate() {
            if bank.logo.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    format!("banks[{i}].logo"),
                    "bank logo is required",
                ));
            }
        }

        issues
    }
}
