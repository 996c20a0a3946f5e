use crate::editor::{EditorField, EditorTree, ValidationIssue};
use crate::registry::{hydrate, BlockSpec};
use crate::responsive::{resolve, Viewport};
use crate::vdom::VNode;
use pagecraft_page::BlockKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingPlan {
    pub name: String,
    pub price: String,
    pub period: Option<String>,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub highlighted: bool,
    pub cta_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingConfig {
    pub title: String,
    pub subtitle: Option<String>,
    pub layout: PricingLayout,
    /// Pricing tables cap at four plans across, tighter than the shared
    /// five-column ceiling.
    pub columns: u8,
    pub show_comparison: bool,
    pub plans: Vec<PricingPlan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingLayout {
    Cards,
    Table,
    Toggle,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            title: "Unit Pricing".to_string(),
            subtitle: None,
            layout: PricingLayout::Cards,
            columns: 3,
            show_comparison: false,
            plans: vec![
                PricingPlan {
                    name: "Studio".to_string(),
                    price: "$120,000".to_string(),
                    period: None,
                    description: Some("Compact city living".to_string()),
                    features: vec!["32 sqm".to_string(), "1 bathroom".to_string()],
                    highlighted: false,
                    cta_text: Some("Reserve".to_string()),
                },
                PricingPlan {
                    name: "Two Bedroom".to_string(),
                    price: "$210,000".to_string(),
                    period: None,
                    description: Some("Most popular layout".to_string()),
                    features: vec!["68 sqm".to_string(), "2 bathrooms".to_string()],
                    highlighted: true,
                    cta_text: Some("Reserve".to_string()),
                },
            ],
        }
    }
}

fn plan_card(plan: &PricingPlan) -> VNode {
    let mut card = VNode::element("div").with_class("pricing-plan");
    if plan.highlighted {
        card = card.with_class("pricing-plan-highlighted");
    }

    let mut header = VNode::element("div")
        .with_class("plan-header")
        .with_child(
            VNode::element("h3")
                .with_class("plan-name")
                .with_child(VNode::text(plan.name.clone())),
        )
        .with_child(
            VNode::element("div")
                .with_class("plan-price")
                .with_child(VNode::text(plan.price.clone())),
        );
    if let Some(period) = &plan.period {
        header = header.with_child(
            VNode::element("span")
                .with_class("plan-period")
                .with_child(VNode::text(period.clone())),
        );
    }

    let features = VNode::element("ul").with_class("plan-features").with_children(
        plan.features.iter().map(|f| {
            VNode::element("li").with_child(VNode::text(f.clone()))
        }),
    );

    card.with_child(header)
        .with_opt_child(plan.description.clone().map(|d| {
            VNode::element("p")
                .with_class("plan-description")
                .with_child(VNode::text(d))
        }))
        .with_child(features)
        .with_opt_child(plan.cta_text.clone().map(|t| {
            VNode::element("a")
                .with_class("plan-cta")
                .with_attr("href", "#contact-form")
                .with_child(VNode::text(t))
        }))
}

pub struct PricingBlock;

impl BlockSpec for PricingBlock {
    fn kind(&self) -> BlockKind {
        BlockKind::Pricing
    }

    fn default_config(&self) -> Value {
        serde_json::to_value(PricingConfig::default()).unwrap_or_default()
    }

    fn render(&self, config: &Value, viewport: Viewport, _editable: bool) -> VNode {
        let config: PricingConfig = hydrate(config);

        let body = match config.layout {
            PricingLayout::Table => {
                // Comparison table: one column per plan, features as rows
                let header = VNode::element("tr").with_children(
                    std::iter::once(VNode::element("th"))
                        .chain(config.plans.iter().map(|p| {
                            VNode::element("th").with_child(VNode::text(p.name.clone()))
                        })),
                );
                let prices = VNode::element("tr").with_children(
                    std::iter::once(
                        VNode::element("td").with_child(VNode::text("Price")),
                    )
                    .chain(config.plans.iter().map(|p| {
                        VNode::element("td").with_child(VNode::text(p.price.clone()))
                    })),
                );
                VNode::element("table")
                    .with_class("pricing-table")
                    .with_child(header)
                    .with_child(prices)
            }
            PricingLayout::Cards | PricingLayout::Toggle => {
                let grid = resolve(config.columns.min(4), viewport);
                VNode::element("div")
                    .with_class("pricing-grid")
                    .with_class(grid.class)
                    .with_attr("data-columns", grid.columns.to_string())
                    .with_children(config.plans.iter().map(plan_card))
            }
        };

        let subtitle = config.subtitle.clone().filter(|s| !s.is_empty()).map(|s| {
            VNode::element("p")
                .with_class("pricing-subtitle")
                .with_child(VNode::text(s))
        });

        VNode::element("section")
            .with_class("pricing")
            .with_child(
                VNode::element("h2")
                    .with_class("pricing-heading")
                    .with_child(VNode::text(config.title.clone())),
            )
            .with_opt_child(subtitle)
            .with_child(body)
    }

    fn edit(&self, _config: &Value) -> EditorTree {
        EditorTree::new(vec![
            EditorField::text("title", "Title"),
            EditorField::text("subtitle", "Subtitle"),
            EditorField::select("layout", "Layout", &["cards", "table", "toggle"]),
            EditorField::number("columns", "Columns"),
            EditorField::toggle("showComparison", "Show comparison"),
            EditorField::list(
                "plans",
                "Plans",
                vec![
                    EditorField::text("name", "Name"),
                    EditorField::text("price", "Price"),
                    EditorField::text("period", "Period"),
                    EditorField::text_area("description", "Description"),
                    EditorField::toggle("highlighted", "Highlighted"),
                    EditorField::text("ctaText", "CTA text"),
                ],
            ),
        ])
    }

    fn validate(&self, config: &Value) -> Vec<ValidationIssue> {
        let config: PricingConfig = hydrate(config);
        let mut issues = Vec::new();

        if !(2..=4).contains(&config.columns) {
            issues.push(ValidationIssue::new("columns", "columns must be between 2 and 4"));
        }
        if config.plans.is_empty() {
            issues.push(ValidationIssue::new("plans", "at least one plan is required"));
        }
        for (i, plan) in config.plans.iter().enumerate() {
            if plan.name.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    format!("plans[{i}].name"),
                    "plan name must not be empty",
                ));
            }
        }

        issues
    }
}
