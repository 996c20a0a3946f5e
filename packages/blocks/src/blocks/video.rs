use crate::editor::{EditorField, EditorTree, ValidationIssue};
use crate::registry::{hydrate, BlockSpec};
use crate::responsive::Viewport;
use crate::vdom::VNode;
use pagecraft_page::BlockKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoConfig {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(rename = "type")]
    pub source: VideoSource,
    pub video_id: Option<String>,
    pub video_url: Option<String>,
    pub embed_code: Option<String>,
    pub thumbnail_url: Option<String>,
    pub autoplay: bool,
    pub show_controls: bool,
    pub aspect_ratio: AspectRatio,
    pub max_width: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoSource {
    Youtube,
    Vimeo,
    Direct,
    Embed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "21:9")]
    Cinema,
}

impl AspectRatio {
    fn as_css(&self) -> &'static str {
        match self {
            AspectRatio::Wide => "16 / 9",
            AspectRatio::Standard => "4 / 3",
            AspectRatio::Square => "1 / 1",
            AspectRatio::Cinema => "21 / 9",
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            title: None,
            subtitle: None,
            source: VideoSource::Youtube,
            video_id: None,
            video_url: None,
            embed_code: None,
            thumbnail_url: None,
            autoplay: false,
            show_controls: true,
            aspect_ratio: AspectRatio::Wide,
            max_width: None,
            description: None,
        }
    }
}

pub struct VideoBlock;

impl VideoBlock {
    fn player(config: &VideoConfig) -> VNode {
        let autoplay = if config.autoplay { "1" } else { "0" };

        match config.source {
            VideoSource::Youtube => {
                let id = config.video_id.as_deref().unwrap_or("");
                VNode::element("iframe")
                    .with_class("video-frame")
                    .with_attr(
                        "src",
                        format!("https://www.youtube.com/embed/{id}?autoplay={autoplay}"),
                    )
                    .with_attr("allowfullscreen", "true")
            }
            VideoSource::Vimeo => {
                let id = config.video_id.as_deref().unwrap_or("");
                VNode::element("iframe")
                    .with_class("video-frame")
                    .with_attr(
                        "src",
                        format!("https://player.vimeo.com/video/{id}?autoplay={autoplay}"),
                    )
                    .with_attr("allowfullscreen", "true")
            }
            VideoSource::Direct => {
                let mut video = VNode::element("video")
                    .with_class("video-frame")
                    .with_attr("src", config.video_url.as_deref().unwrap_or("").to_string());
                if config.show_controls {
                    video = video.with_attr("controls", "true");
                }
                if config.autoplay {
                    video = video.with_attr("autoplay", "true");
                }
                if let Some(poster) = &config.thumbnail_url {
                    video = video.with_attr("poster", poster.clone());
                }
                video
            }
            // Raw embed markup is passed through opaquely; sanitizing it
            // is the rendering host's responsibility.
            VideoSource::Embed => VNode::element("div")
                .with_class("video-embed")
                .with_attr("data-embed", config.embed_code.as_deref().unwrap_or("").to_string()),
        }
    }
}

impl BlockSpec for VideoBlock {
    fn kind(&self) -> BlockKind {
        BlockKind::Video
    }

    fn default_config(&self) -> Value {
        serde_json::to_value(VideoConfig::default()).unwrap_or_default()
    }

    fn render(&self, config: &Value, _viewport: Viewport, _editable: bool) -> VNode {
        let config: VideoConfig = hydrate(config);

        let heading = config.title.clone().filter(|t| !t.is_empty()).map(|t| {
            VNode::element("h2")
                .with_class("video-heading")
                .with_child(VNode::text(t))
        });
        let description = config.description.clone().filter(|d| !d.is_empty()).map(|d| {
            VNode::element("p")
                .with_class("video-description")
                .with_child(VNode::text(d))
        });

        VNode::element("section")
            .with_class("video")
            .with_opt_child(heading)
            .with_child(
                VNode::element("div")
                    .with_class("video-wrapper")
                    .with_style("aspect-ratio", config.aspect_ratio.as_css())
                    .with_opt_style("max-width", &config.max_width)
                    .with_child(Self::player(&config)),
            )
            .with_opt_child(description)
    }

    fn edit(&self, _config: &Value) -> EditorTree {
        EditorTree::new(vec![
            EditorField::text("title", "Title"),
            EditorField::select("type", "Source", &["youtube", "vimeo", "direct", "embed"]),
            EditorField::text("videoId", "Video ID"),
            EditorField::text("videoUrl", "Video URL"),
            EditorField::text_area("embedCode", "Embed code"),
            EditorField::image("thumbnailUrl", "Thumbnail"),
            EditorField::toggle("autoplay", "Autoplay"),
            EditorField::toggle("showControls", "Show controls"),
            EditorField::select("aspectRatio", "Aspect ratio", &["16:9", "4:3", "1:1", "21:9"]),
            EditorField::text_area("description", "Description"),
        ])
    }

    fn validate(&self, config: &Value) -> Vec<ValidationIssue> {
        let config: VideoConfig = hydrate(config);

        let missing = |field: &str, message: &str| vec![ValidationIssue::new(field, message)];

        match config.source {
            VideoSource::Youtube | VideoSource::Vimeo
                if config.video_id.as_deref().unwrap_or("").trim().is_empty() =>
            {
                missing("videoId", "a video ID is required for this source")
            }
            VideoSource::Direct
                if config.video_url.as_deref().unwrap_or("").trim().is_empty() =>
            {
                missing("videoUrl", "a video URL is required for direct playback")
            }
            VideoSource::Embed
                if config.embed_code.as_deref().unwrap_or("").trim().is_empty() =>
            {
                missing("embedCode", "embed code is required for embedded players")
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_youtube_embed_url() {
        let node = VideoBlock.render(
            &json!({ "type": "youtube", "videoId": "abc123" }),
            Viewport::Desktop,
            false,
        );
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("youtube.com/embed/abc123?autoplay=0"));
    }

    #[test]
    fn test_aspect_ratio_style() {
        let node = VideoBlock.render(
            &json!({ "type": "youtube", "videoId": "x", "aspectRatio": "21:9" }),
            Viewport::Desktop,
            false,
        );
        assert!(serde_json::to_string(&node).unwrap().contains("21 / 9"));
    }

    #[test]
    fn test_source_specific_validation() {
        assert_eq!(
            VideoBlock.validate(&json!({ "type": "youtube" }))[0].field,
            "videoId"
        );
        assert_eq!(
            VideoBlock.validate(&json!({ "type": "direct" }))[0].field,
            "videoUrl"
        );
        assert!(VideoBlock
            .validate(&json!({ "type": "direct", "videoUrl": "/v.mp4" }))
            .is_empty());
    }
}
