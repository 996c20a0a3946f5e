use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tag set for the block palette.
///
/// The set is closed: adding a block type means adding a variant here and
/// a registry entry, never end-user scripting. `Other` carries any tag we
/// don't recognize so a page authored against a newer palette still
/// deserializes (and re-serializes identically) instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
    Hero,
    TitleDescription,
    Features,
    Facilities,
    Faq,
    Pricing,
    Statistics,
    Video,
    BankPartnership,
    Form,
    Copyright,
    Other(String),
}

impl BlockKind {
    /// All registered kinds, in palette order.
    pub const BUILTIN: [BlockKind; 11] = [
        BlockKind::Hero,
        BlockKind::TitleDescription,
        BlockKind::Features,
        BlockKind::Facilities,
        BlockKind::Faq,
        BlockKind::Pricing,
        BlockKind::Statistics,
        BlockKind::Video,
        BlockKind::BankPartnership,
        BlockKind::Form,
        BlockKind::Copyright,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            BlockKind::Hero => "hero",
            BlockKind::TitleDescription => "title-description",
            BlockKind::Features => "features",
            BlockKind::Facilities => "facilities",
            BlockKind::Faq => "faq",
            BlockKind::Pricing => "pricing",
            BlockKind::Statistics => "statistics",
            BlockKind::Video => "video",
            BlockKind::BankPartnership => "bank-partnership",
            BlockKind::Form => "form",
            BlockKind::Copyright => "copyright",
            BlockKind::Other(tag) => tag,
        }
    }
}

impl From<String> for BlockKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "hero" => BlockKind::Hero,
            "title-description" => BlockKind::TitleDescription,
            "features" => BlockKind::Features,
            "facilities" => BlockKind::Facilities,
            "faq" => BlockKind::Faq,
            "pricing" => BlockKind::Pricing,
            "statistics" => BlockKind::Statistics,
            "video" => BlockKind::Video,
            "bank-partnership" => BlockKind::BankPartnership,
            "form" => BlockKind::Form,
            "copyright" => BlockKind::Copyright,
            _ => BlockKind::Other(tag),
        }
    }
}

impl From<&str> for BlockKind {
    fn from(tag: &str) -> Self {
        BlockKind::from(tag.to_string())
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One content block on a page.
///
/// `id` is unique within the owning page and stable across edits and
/// reorders. `config` stays raw JSON at this layer: the registry hydrates
/// it into the typed per-kind schema when rendering, and unknown keys are
/// preserved, not stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: BlockKind,

    #[serde(default)]
    pub config: Value,
}

impl Block {
    pub fn new(id: impl Into<String>, kind: BlockKind, config: Value) -> Self {
        Self {
            id: id.into(),
            kind,
            config,
        }
    }
}
