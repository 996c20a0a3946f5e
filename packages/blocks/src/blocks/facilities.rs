use crate::editor::{EditorField, EditorTree, ValidationIssue};
use crate::registry::{hydrate, BlockSpec};
use crate::responsive::{resolve, Viewport};
use crate::vdom::VNode;
use pagecraft_page::BlockKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Facility {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FacilitiesConfig {
    pub title: String,
    pub subtitle: Option<String>,
    pub facilities: Vec<Facility>,
    pub layout: FacilitiesLayout,
    pub columns: u8,
    pub show_icons: bool,
    pub show_images: bool,
    pub background_color: Option<String>,
    pub card_style: CardStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilitiesLayout {
    Grid,
    List,
    Cards,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStyle {
    Flat,
    Shadow,
    Border,
}

impl Default for FacilitiesConfig {
    fn default() -> Self {
        Self {
            title: "Facilities".to_string(),
            subtitle: None,
            facilities: vec![
                Facility {
                    name: "Swimming Pool".to_string(),
                    description: "Olympic-size pool with children's area".to_string(),
                    icon: "pool".to_string(),
                    image: None,
                },
                Facility {
                    name: "24/7 Security".to_string(),
                    description: "Gated access with CCTV coverage".to_string(),
                    icon: "security".to_string(),
                    image: None,
                },
                Facility {
                    name: "Fitness Center".to_string(),
                    description: "Fully equipped residents' gym".to_string(),
                    icon: "gym".to_string(),
                    image: None,
                },
            ],
            layout: FacilitiesLayout::Grid,
            columns: 3,
            show_icons: true,
            show_images: false,
            background_color: None,
            card_style: CardStyle::Shadow,
        }
    }
}

pub struct FacilitiesBlock;

impl FacilitiesBlock {
    fn facility_item(facility: &Facility, config: &FacilitiesConfig) -> VNode {
        let card_class = match config.card_style {
            CardStyle::Flat => "card-flat",
            CardStyle::Shadow => "card-shadow",
            CardStyle::Border => "card-border",
        };

        let mut item = VNode::element("div")
            .with_class("facility-item")
            .with_class(card_class);

        if config.show_images {
            if let Some(image) = &facility.image {
                item = item.with_child(
                    VNode::element("img")
                        .with_class("facility-image")
                        .with_attr("src", image.clone())
                        .with_attr("alt", facility.name.clone()),
                );
            }
        }
        if config.show_icons {
            item = item.with_child(
                VNode::element("span")
                    .with_class("facility-icon")
                    .with_attr("data-icon", facility.icon.clone()),
            );
        }

        item.with_child(
            VNode::element("h3")
                .with_class("facility-name")
                .with_child(VNode::text(facility.name.clone())),
        )
        .with_child(
            VNode::element("p")
                .with_class("facility-description")
                .with_child(VNode::text(facility.description.clone())),
        )
    }
}

impl BlockSpec for FacilitiesBlock {
    fn kind(&self) -> BlockKind {
        BlockKind::Facilities
    }

    fn default_config(&self) -> Value {
        serde_json::to_value(FacilitiesConfig::default()).unwrap_or_default()
    }

    fn render(&self, config: &Value, viewport: Viewport, _editable: bool) -> VNode {
        let config: FacilitiesConfig = hydrate(config);

        let items = config
            .facilities
            .iter()
            .map(|f| Self::facility_item(f, &config));

        let body = match config.layout {
            FacilitiesLayout::List => VNode::element("div")
                .with_class("facilities-list")
                .with_children(items),
            FacilitiesLayout::Grid | FacilitiesLayout::Cards => {
                let grid = resolve(config.columns, viewport);
                VNode::element("div")
                    .with_class("facilities-grid")
                    .with_class(grid.class)
                    .with_attr("data-columns", grid.columns.to_string())
                    .with_children(items)
            }
        };

        let subtitle = config.subtitle.clone().filter(|s| !s.is_empty()).map(|s| {
            VNode::element("p")
                .with_class("facilities-subtitle")
                .with_child(VNode::text(s))
        });

        VNode::element("section")
            .with_class("facilities")
            .with_opt_style("background-color", &config.background_color)
            .with_child(
                VNode::element("h2")
                    .with_class("facilities-heading")
                    .with_child(VNode::text(config.title.clone())),
            )
            .with_opt_child(subtitle)
            .with_child(body)
    }

    fn edit(&self, _config: &Value) -> EditorTree {
        EditorTree::new(vec![
            EditorField::text("title", "Title"),
            EditorField::text("subtitle", "Subtitle"),
            EditorField::select("layout", "Layout", &["grid", "list", "cards"]),
            EditorField::number("columns", "Columns"),
            EditorField::toggle("showIcons", "Show icons"),
            EditorField::toggle("showImages", "Show images"),
            EditorField::select("cardStyle", "Card style", &["flat", "shadow", "border"]),
            EditorField::color("backgroundColor", "Background color"),
            EditorField::list(
                "facilities",
                "Facilities",
                vec![
                    EditorField::text("name", "Name"),
                    EditorField::text_area("description", "Description"),
                    EditorField::text("icon", "Icon"),
                    EditorField::image("image", "Image"),
                ],
            ),
        ])
    }

    fn validate(&self, config: &Value) -> Vec<ValidationIssue> {
        let config: FacilitiesConfig = hydrate(config);
        let mut issues = Vec::new();

        if !(1..=5).contains(&config.columns) {
            issues.push(ValidationIssue::new("columns", "columns must be between 1 and 5"));
        }
        for (i, facility) in config.facilities.iter().enumerate() {
            if facility.name.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    format!("facilities[{i}].name"),
                    "facility name must not be empty",
                ));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tablet_caps_grid_at_two() {
        let config = json!({ "columns": 4 });
        let node = FacilitiesBlock.render(&config, Viewport::Tablet, false);
        let grid = node
            .children()
            .iter()
            .find(|c| c.attr("data-columns").is_some())
            .unwrap();
        assert_eq!(grid.attr("data-columns"), Some("2"));
    }

    #[test]
    fn test_icons_can_be_hidden() {
        let config = json!({
            "showIcons": false,
            "facilities": [{ "name": "Pool", "icon": "pool" }]
        });
        let node = FacilitiesBlock.render(&config, Viewport::Desktop, false);
        let json = serde_json::to_string(&node).unwrap();
        assert!(!json.contains("facility-icon"));
    }
}
