use crate::editor::{EditorField, EditorTree, ValidationIssue};
use crate::registry::{hydrate, BlockSpec};
use crate::responsive::Viewport;
use crate::vdom::VNode;
use pagecraft_page::BlockKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::hero::TextAlign;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CopyrightLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CopyrightConfig {
    pub company_name: String,
    /// Display year. Left unset, hosts show their current year; the
    /// renderer stays pure and simply omits it.
    pub year: Option<String>,
    pub additional_text: Option<String>,
    pub show_year: bool,
    pub show_all_rights_reserved: bool,
    pub text_align: TextAlign,
    pub text_size: TextSize,
    pub text_color: Option<String>,
    pub background_color: Option<String>,
    pub show_border: bool,
    pub links: Vec<CopyrightLink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

impl Default for CopyrightConfig {
    fn default() -> Self {
        Self {
            company_name: "Company Name".to_string(),
            year: None,
            additional_text: None,
            show_year: true,
            show_all_rights_reserved: true,
            text_align: TextAlign::Center,
            text_size: TextSize::Small,
            text_color: None,
            background_color: None,
            show_border: false,
            links: Vec::new(),
        }
    }
}

pub struct CopyrightBlock;

impl BlockSpec for CopyrightBlock {
    fn kind(&self) -> BlockKind {
        BlockKind::Copyright
    }

    fn default_config(&self) -> Value {
        serde_json::to_value(CopyrightConfig::default()).unwrap_or_default()
    }

    fn render(&self, config: &Value, _viewport: Viewport, _editable: bool) -> VNode {
        let config: CopyrightConfig = hydrate(config);

        let size_class = match config.text_size {
            TextSize::Small => "text-sm",
            TextSize::Medium => "text-md",
            TextSize::Large => "text-lg",
        };

        let mut line = format!("© {}", config.company_name);
        if config.show_year {
            if let Some(year) = &config.year {
                line = format!("© {} {}", year, config.company_name);
            }
        }
        if config.show_all_rights_reserved {
            line.push_str(". All rights reserved.");
        }

        let links = (!config.links.is_empty()).then(|| {
            VNode::element("nav")
                .with_class("copyright-links")
                .with_children(config.links.iter().map(|link| {
                    VNode::element("a")
                        .with_attr("href", link.url.clone())
                        .with_child(VNode::text(link.label.clone()))
                }))
        });
        let additional = config.additional_text.clone().filter(|t| !t.is_empty()).map(|t| {
            VNode::element("p")
                .with_class("copyright-extra")
                .with_child(VNode::text(t))
        });

        let mut footer = VNode::element("footer")
            .with_class("copyright")
            .with_class(size_class)
            .with_style("text-align", config.text_align.as_css())
            .with_opt_style("color", &config.text_color)
            .with_opt_style("background-color", &config.background_color);
        if config.show_border {
            footer = footer.with_class("copyright-bordered");
        }

        footer
            .with_child(VNode::element("p").with_child(VNode::text(line)))
            .with_opt_child(additional)
            .with_opt_child(links)
    }

    fn edit(&self, _config: &Value) -> EditorTree {
        EditorTree::new(vec![
            EditorField::text("companyName", "Company name"),
            EditorField::text("year", "Year"),
            EditorField::text("additionalText", "Additional text"),
            EditorField::toggle("showYear", "Show year"),
            EditorField::toggle("showAllRightsReserved", "Show \"All rights reserved\""),
            EditorField::select("textAlign", "Text alignment", &["left", "center", "right"]),
            EditorField::select("textSize", "Text size", &["small", "medium", "large"]),
            EditorField::color("textColor", "Text color"),
            EditorField::color("backgroundColor", "Background color"),
            EditorField::toggle("showBorder", "Top border"),
            EditorField::list(
                "links",
                "Links",
                vec![
                    EditorField::text("label", "Label"),
                    EditorField::text("url", "URL"),
                ],
            ),
        ])
    }

    fn validate(&self, config: &Value) -> Vec<ValidationIssue> {
        let config: CopyrightConfig = hydrate(config);
        if config.company_name.trim().is_empty() {
            vec![ValidationIssue::new("companyName", "company name must not be empty")]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_copyright_line() {
        let node = CopyrightBlock.render(
            &json!({ "companyName": "Acme Estates", "year": "2026" }),
            Viewport::Desktop,
            false,
        );
        assert!(node
            .text_content()
            .contains("© 2026 Acme Estates. All rights reserved."));
    }

    #[test]
    fn test_rights_line_can_be_hidden() {
        let node = CopyrightBlock.render(
            &json!({ "companyName": "Acme", "showAllRightsReserved": false }),
            Viewport::Desktop,
            false,
        );
        assert!(!node.text_content().contains("All rights reserved"));
    }
}
