use crate::editor::{EditorField, EditorTree, ValidationIssue};
use crate::registry::{hydrate, BlockSpec};
use crate::responsive::Viewport;
use crate::vdom::VNode;
use pagecraft_page::BlockKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::hero::TextAlign;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TitleDescriptionConfig {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub title_size: TitleSize,
    pub text_align: TextAlign,
    pub title_color: Option<String>,
    pub subtitle_color: Option<String>,
    pub description_color: Option<String>,
    pub background_color: Option<String>,
    pub show_subtitle: bool,
    pub show_description: bool,
    pub title_font: TitleFont,
    pub spacing: Spacing,
    pub max_width: MaxWidth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleSize {
    Small,
    Medium,
    Large,
    Xl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleFont {
    Default,
    Serif,
    Mono,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Compact,
    Normal,
    Relaxed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaxWidth {
    Full,
    Container,
    Narrow,
}

impl Default for TitleDescriptionConfig {
    fn default() -> Self {
        Self {
            title: "Section Title".to_string(),
            subtitle: None,
            description: None,
            title_size: TitleSize::Large,
            text_align: TextAlign::Center,
            title_color: None,
            subtitle_color: None,
            description_color: None,
            background_color: None,
            show_subtitle: true,
            show_description: true,
            title_font: TitleFont::Default,
            spacing: Spacing::Normal,
            max_width: MaxWidth::Container,
        }
    }
}

pub struct TitleDescriptionBlock;

impl BlockSpec for TitleDescriptionBlock {
    fn kind(&self) -> BlockKind {
        BlockKind::TitleDescription
    }

    fn default_config(&self) -> Value {
        serde_json::to_value(TitleDescriptionConfig::default()).unwrap_or_default()
    }

    fn render(&self, config: &Value, _viewport: Viewport, _editable: bool) -> VNode {
        let config: TitleDescriptionConfig = hydrate(config);

        let size_class = match config.title_size {
            TitleSize::Small => "title-sm",
            TitleSize::Medium => "title-md",
            TitleSize::Large => "title-lg",
            TitleSize::Xl => "title-xl",
        };
        let font_class = match config.title_font {
            TitleFont::Default => "font-default",
            TitleFont::Serif => "font-serif",
            TitleFont::Mono => "font-mono",
        };
        let spacing_class = match config.spacing {
            Spacing::Compact => "spacing-compact",
            Spacing::Normal => "spacing-normal",
            Spacing::Relaxed => "spacing-relaxed",
        };
        let width_class = match config.max_width {
            MaxWidth::Full => "width-full",
            MaxWidth::Container => "width-container",
            MaxWidth::Narrow => "width-narrow",
        };

        let subtitle = config
            .subtitle
            .filter(|s| config.show_subtitle && !s.is_empty())
            .map(|s| {
                VNode::element("p")
                    .with_class("section-subtitle")
                    .with_opt_style("color", &config.subtitle_color)
                    .with_child(VNode::text(s))
            });
        let description = config
            .description
            .filter(|d| config.show_description && !d.is_empty())
            .map(|d| {
                VNode::element("p")
                    .with_class("section-description")
                    .with_opt_style("color", &config.description_color)
                    .with_child(VNode::text(d))
            });

        VNode::element("section")
            .with_class("title-description")
            .with_class(spacing_class)
            .with_opt_style("background-color", &config.background_color)
            .with_child(
                VNode::element("div")
                    .with_class(width_class)
                    .with_style("text-align", config.text_align.as_css())
                    .with_child(
                        VNode::element("h2")
                            .with_class(size_class)
                            .with_class(font_class)
                            .with_opt_style("color", &config.title_color)
                            .with_child(VNode::text(config.title)),
                    )
                    .with_opt_child(subtitle)
                    .with_opt_child(description),
            )
    }

    fn edit(&self, _config: &Value) -> EditorTree {
        EditorTree::new(vec![
            EditorField::text("title", "Title"),
            EditorField::text("subtitle", "Subtitle"),
            EditorField::text_area("description", "Description"),
            EditorField::select("titleSize", "Title size", &["small", "medium", "large", "xl"]),
            EditorField::select("textAlign", "Text alignment", &["left", "center", "right"]),
            EditorField::select("titleFont", "Title font", &["default", "serif", "mono"]),
            EditorField::select("spacing", "Spacing", &["compact", "normal", "relaxed"]),
            EditorField::select("maxWidth", "Max width", &["full", "container", "narrow"]),
            EditorField::toggle("showSubtitle", "Show subtitle"),
            EditorField::toggle("showDescription", "Show description"),
            EditorField::color("titleColor", "Title color"),
            EditorField::color("backgroundColor", "Background color"),
        ])
    }

    fn validate(&self, config: &Value) -> Vec<ValidationIssue> {
        let config: TitleDescriptionConfig = hydrate(config);
        if config.title.trim().is_empty() {
            vec![ValidationIssue::new("title", "title must not be empty")]
        } else {
            Vec::new()
        }
    }
}
