use crate::editor::{EditorField, EditorTree, ValidationIssue};
use crate::registry::{hydrate, BlockSpec};
use crate::responsive::{resolve, Viewport};
use crate::vdom::VNode;
use pagecraft_page::BlockKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Feature {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeaturesConfig {
    pub title: String,
    pub features: Vec<Feature>,
    pub layout: FeaturesLayout,
    pub columns: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeaturesLayout {
    Grid,
    List,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            title: "Why Choose Us".to_string(),
            features: vec![
                Feature {
                    icon: "home".to_string(),
                    title: "Prime Location".to_string(),
                    description: "Minutes from the city center".to_string(),
                },
                Feature {
                    icon: "star".to_string(),
                    title: "Trusted Developer".to_string(),
                    description: "Two decades of delivered projects".to_string(),
                },
                Feature {
                    icon: "award".to_string(),
                    title: "Award Winning".to_string(),
                    description: "Recognized residential design".to_string(),
                },
            ],
            layout: FeaturesLayout::Grid,
            columns: 3,
        }
    }
}

fn feature_item(feature: &Feature) -> VNode {
    VNode::element("div")
        .with_class("feature-item")
        .with_child(
            VNode::element("span")
                .with_class("feature-icon")
                .with_attr("data-icon", feature.icon.clone()),
        )
        .with_child(
            VNode::element("h3")
                .with_class("feature-title")
                .with_child(VNode::text(feature.title.clone())),
        )
        .with_child(
            VNode::element("p")
                .with_class("feature-description")
                .with_child(VNode::text(feature.description.clone())),
        )
}

pub struct FeaturesBlock;

impl BlockSpec for FeaturesBlock {
    fn kind(&self) -> BlockKind {
        BlockKind::Features
    }

    fn default_config(&self) -> Value {
        serde_json::to_value(FeaturesConfig::default()).unwrap_or_default()
    }

    fn render(&self, config: &Value, viewport: Viewport, _editable: bool) -> VNode {
        let config: FeaturesConfig = hydrate(config);

        let items = config.features.iter().map(feature_item);
        let body = match config.layout {
            FeaturesLayout::Grid => {
                let grid = resolve(config.columns, viewport);
                VNode::element("div")
                    .with_class("features-grid")
                    .with_class(grid.class)
                    .with_attr("data-columns", grid.columns.to_string())
                    .with_children(items)
            }
            FeaturesLayout::List => VNode::element("div")
                .with_class("features-list")
                .with_children(items),
        };

        VNode::element("section")
            .with_class("features")
            .with_child(
                VNode::element("h2")
                    .with_class("features-heading")
                    .with_child(VNode::text(config.title)),
            )
            .with_child(body)
    }

    fn edit(&self, _config: &Value) -> EditorTree {
        EditorTree::new(vec![
            EditorField::text("title", "Title"),
            EditorField::select("layout", "Layout", &["grid", "list"]),
            EditorField::number("columns", "Columns"),
            EditorField::list(
                "features",
                "Features",
                vec![
                    EditorField::text("icon", "Icon"),
                    EditorField::text("title", "Title"),
                    EditorField::text_area("description", "Description"),
                ],
            ),
        ])
    }

    fn validate(&self, config: &Value) -> Vec<ValidationIssue> {
        let config: FeaturesConfig = hydrate(config);
        let mut issues = Vec::new();

        if !(1..=5).contains(&config.columns) {
            issues.push(ValidationIssue::new("columns", "columns must be between 1 and 5"));
        }
        for (i, feature) in config.features.iter().enumerate() {
            if feature.title.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    format!("features[{i}].title"),
                    "feature title must not be empty",
                ));
            }
        }

        issues
    }
}
