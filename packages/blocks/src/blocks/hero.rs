use crate::editor::{EditorField, EditorTree, ValidationIssue};
use crate::registry::{hydrate, BlockSpec};
use crate::responsive::Viewport;
use crate::vdom::VNode;
use pagecraft_page::BlockKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroConfig {
    pub title: String,
    pub subtitle: String,
    pub background_image: Option<String>,
    pub background_color: Option<String>,
    pub cta_text: String,
    /// "scroll" jumps to the page's form block; "link" opens `cta_url`.
    pub cta_action: CtaAction,
    pub cta_url: Option<String>,
    pub overlay: bool,
    pub text_align: TextAlign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaAction {
    Scroll,
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            title: "Welcome".to_string(),
            subtitle: "Discover your next home".to_string(),
            background_image: None,
            background_color: None,
            cta_text: "Contact Us".to_string(),
            cta_action: CtaAction::Scroll,
            cta_url: None,
            overlay: true,
            text_align: TextAlign::Center,
        }
    }
}

pub struct HeroBlock;

impl BlockSpec for HeroBlock {
    fn kind(&self) -> BlockKind {
        BlockKind::Hero
    }

    fn default_config(&self) -> Value {
        serde_json::to_value(HeroConfig::default()).unwrap_or_default()
    }

    fn render(&self, config: &Value, viewport: Viewport, _editable: bool) -> VNode {
        let config: HeroConfig = hydrate(config);

        let href = match config.cta_action {
            CtaAction::Link => config.cta_url.as_deref().unwrap_or("#").to_string(),
            CtaAction::Scroll => "#contact-form".to_string(),
        };

        let mut section = VNode::element("section")
            .with_class("hero")
            .with_opt_style("background-color", &config.background_color);

        if let Some(image) = &config.background_image {
            section = section.with_style("background-image", format!("url({image})"));
        }
        if config.overlay && config.background_image.is_some() {
            section = section.with_child(VNode::element("div").with_class("hero-overlay"));
        }
        if viewport == Viewport::Mobile {
            section = section.with_class("hero-compact");
        }

        section.with_child(
            VNode::element("div")
                .with_class("hero-inner")
                .with_style("text-align", config.text_align.as_css())
                .with_child(
                    VNode::element("h1")
                        .with_class("hero-title")
                        .with_child(VNode::text(config.title)),
                )
                .with_child(
                    VNode::element("p")
                        .with_class("hero-subtitle")
                        .with_child(VNode::text(config.subtitle)),
                )
                .with_child(
                    VNode::element("a")
                        .with_class("hero-cta")
                        .with_attr("href", href)
                        .with_child(VNode::text(config.cta_text)),
                ),
        )
    }

    fn edit(&self, _config: &Value) -> EditorTree {
        EditorTree::new(vec![
            EditorField::text("title", "Title"),
            EditorField::text_area("subtitle", "Subtitle"),
            EditorField::image("backgroundImage", "Background image"),
            EditorField::color("backgroundColor", "Background color"),
            EditorField::text("ctaText", "CTA text"),
            EditorField::select("ctaAction", "CTA action", &["scroll", "link"]),
            EditorField::text("ctaUrl", "CTA URL"),
            EditorField::toggle("overlay", "Darken background"),
            EditorField::select("textAlign", "Text alignment", &["left", "center", "right"]),
        ])
    }

    fn validate(&self, config: &Value) -> Vec<ValidationIssue> {
        let config: HeroConfig = hydrate(config);
        let mut issues = Vec::new();

        if config.title.trim().is_empty() {
            issues.push(ValidationIssue::new("title", "title must not be empty"));
        }
        if config.cta_action == CtaAction::Link
            && config.cta_url.as_deref().unwrap_or("").trim().is_empty()
        {
            issues.push(ValidationIssue::new(
                "ctaUrl",
                "a CTA URL is required when the action is a link",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_is_idempotent() {
        let config = json!({ "title": "Grand Opening", "backgroundImage": "/assets/bg.jpg" });
        let a = HeroBlock.render(&config, Viewport::Desktop, false);
        let b = HeroBlock.render(&config, Viewport::Desktop, false);
        assert_eq!(a, b);
    }

    #[test]
    fn test_overlay_requires_background_image() {
        let without = HeroBlock.render(&json!({ "overlay": true }), Viewport::Desktop, false);
        assert!(without
            .children()
            .iter()
            .all(|c| c.attr("class") != Some("hero-overlay")));

        let with = HeroBlock.render(
            &json!({ "overlay": true, "backgroundImage": "/bg.jpg" }),
            Viewport::Desktop,
            false,
        );
        assert!(with
            .children()
            .iter()
            .any(|c| c.attr("class") == Some("hero-overlay")));
    }

    #[test]
    fn test_link_action_needs_url() {
        let issues = HeroBlock.validate(&json!({ "title": "Hi", "ctaAction": "link" }));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "ctaUrl");

        let ok = HeroBlock.validate(&json!({
            "title": "Hi",
            "ctaAction": "link",
            "ctaUrl": "https://example.com"
        }));
        assert!(ok.is_empty());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = HeroBlock.default_config();
        assert!(HeroBlock.validate(&config).is_empty());
    }
}
