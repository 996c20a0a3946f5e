//! Statistics block: animated number counters in a responsive grid.
//!
//! Rendering is pure and always emits the final values; the count-up
//! effect is a runtime concern the host drives through one
//! [`Counter`](crate::animation::Counter) per item, built from this
//! config via [`StatisticsConfig::counters`].

use crate::animation::Counter;
use crate::editor::{EditorField, EditorTree, ValidationIssue};
use crate::registry::{hydrate, BlockSpec};
use crate::responsive::{resolve, Viewport};
use crate::vdom::VNode;
use pagecraft_page::BlockKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StatisticItem {
    pub label: String,
    pub value: i64,
    pub suffix: Option<String>,
    pub prefix: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub color: StatColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatColor {
    #[default]
    Blue,
    Green,
    Purple,
    Orange,
    Red,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatisticsConfig {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub layout: StatisticsLayout,
    pub columns: u8,
    pub animate: bool,
    pub animation_duration: u64,
    pub items: Vec<StatisticItem>,
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatisticsLayout {
    Grid,
    Horizontal,
    Cards,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            title: None,
            subtitle: None,
            layout: StatisticsLayout::Grid,
            columns: 3,
            animate: true,
            animation_duration: 2000,
            items: vec![
                StatisticItem {
                    label: "Units Sold".to_string(),
                    value: 450,
                    suffix: Some("+".to_string()),
                    icon: Some("building".to_string()),
                    ..Default::default()
                },
                StatisticItem {
                    label: "Happy Families".to_string(),
                    value: 1200,
                    suffix: Some("+".to_string()),
                    icon: Some("users".to_string()),
                    ..Default::default()
                },
                StatisticItem {
                    label: "Years of Experience".to_string(),
                    value: 20,
                    icon: Some("award".to_string()),
                    ..Default::default()
                },
            ],
            background_color: None,
        }
    }
}

impl StatisticsConfig {
    /// One independent counter per item, all sharing this block's
    /// duration. Items never share a counter.
    pub fn counters(&self) -> Vec<Counter> {
        let duration = Duration::from_millis(self.animation_duration);
        self.items
            .iter()
            .map(|item| Counter::new(item.value, duration))
            .collect()
    }
}

fn stat_item(item: &StatisticItem, config: &StatisticsConfig) -> VNode {
    let color_class = match item.color {
        StatColor::Blue => "stat-blue",
        StatColor::Green => "stat-green",
        StatColor::Purple => "stat-purple",
        StatColor::Orange => "stat-orange",
        StatColor::Red => "stat-red",
    };

    let display = format!(
        "{}{}{}",
        item.prefix.as_deref().unwrap_or(""),
        item.value,
        item.suffix.as_deref().unwrap_or("")
    );

    let mut value_node = VNode::element("div")
        .with_class("stat-value")
        .with_child(VNode::text(display));
    if config.animate {
        value_node = value_node
            .with_attr("data-counter-end", item.value.to_string())
            .with_attr("data-counter-duration", config.animation_duration.to_string());
    }

    let mut node = VNode::element("div")
        .with_class("stat-item")
        .with_class(color_class);
    if let Some(icon) = &item.icon {
        node = node.with_child(
            VNode::element("span")
                .with_class("stat-icon")
                .with_attr("data-icon", icon.clone()),
        );
    }
    node = node.with_child(value_node).with_child(
        VNode::element("div")
            .with_class("stat-label")
            .with_child(VNode::text(item.label.clone())),
    );
    if let Some(description) = &item.description {
        node = node.with_child(
            VNode::element("p")
                .with_class("stat-description")
                .with_child(VNode::text(description.clone())),
        );
    }
    node
}

pub struct StatisticsBlock;

impl BlockSpec for StatisticsBlock {
    fn kind(&self) -> BlockKind {
        BlockKind::Statistics
    }

    fn default_config(&self) -> Value {
        serde_json::to_value(StatisticsConfig::default()).unwrap_or_default()
    }

    fn render(&self, config: &Value, viewport: Viewport, _editable: bool) -> VNode {
        let config: StatisticsConfig = hydrate(config);

        let items = config.items.iter().map(|i| stat_item(i, &config));
        let body = match config.layout {
            StatisticsLayout::Horizontal => VNode::element("div")
                .with_class("statistics-row")
                .with_children(items),
            StatisticsLayout::Grid | StatisticsLayout::Cards => {
                let grid = resolve(config.columns, viewport);
                let class = if config.layout == StatisticsLayout::Cards {
                    "statistics-cards"
                } else {
                    "statistics-grid"
                };
                VNode::element("div")
                    .with_class(class)
                    .with_class(grid.class)
                    .with_attr("data-columns", grid.columns.to_string())
                    .with_children(items)
            }
        };

        let heading = config.title.clone().filter(|t| !t.is_empty()).map(|t| {
            VNode::element("h2")
                .with_class("statistics-heading")
                .with_child(VNode::text(t))
        });
        let subtitle = config.subtitle.clone().filter(|s| !s.is_empty()).map(|s| {
            VNode::element("p")
                .with_class("statistics-subtitle")
                .with_child(VNode::text(s))
        });

        VNode::element("section")
            .with_class("statistics")
            .with_opt_style("background-color", &config.background_color)
            .with_opt_child(heading)
            .with_opt_child(subtitle)
            .with_child(body)
    }

    fn edit(&self, _config: &Value) -> EditorTree {
        EditorTree::new(vec![
            EditorField::text("title", "Title"),
            EditorField::text_area("subtitle", "Subtitle"),
            EditorField::select("layout", "Layout", &["grid", "cards", "horizontal"]),
            EditorField::select("columns", "Columns", &["2", "3", "4", "5"]),
            EditorField::toggle("animate", "Animate counters"),
            EditorField::number("animationDuration", "Animation duration (ms)"),
            EditorField::color("backgroundColor", "Background color"),
            EditorField::list(
                "items",
                "Statistics",
                vec![
                    EditorField::text("label", "Label"),
                    EditorField::number("value", "Value"),
                    EditorField::text("prefix", "Prefix"),
                    EditorField::text("suffix", "Suffix"),
                    EditorField::text("icon", "Icon"),
                    EditorField::text("description", "Description"),
                    EditorField::select("color", "Color", &["blue", "green", "purple", "orange", "red"]),
                ],
            ),
        ])
    }

    fn validate(&self, config: &Value) -> Vec<ValidationIssue> {
        let config: StatisticsConfig = hydrate(config);
        let mut issues = Vec::new();

        if !(2..=5).contains(&config.columns) {
            issues.push(ValidationIssue::new("columns", "columns must be between 2 and 5"));
        }
        for (i, item) in config.items.iter().enumerate() {
            if item.label.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    format!("items[{i}].label"),
                    "label must not be empty",
                ));
            }
            if item.value < 0 {
                issues.push(ValidationIssue::new(
                    format!("items[{i}].value"),
                    "value must not be negative",
                ));
            }
        }

        issues
    }
}
