//! Editor descriptors.
//!
//! A block's `edit()` returns a tree of typed field controls rather than
//! widgets: the authoring surface renders the controls however it likes,
//! collects a complete new config object, and hands it back through the
//! engine's wholesale config replace. Keeping editors as data keeps
//! `edit` pure and lets the authoring and preview surfaces share one
//! code path.

use serde::{Deserialize, Serialize};

/// Ordered set of controls for editing one block's config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EditorTree {
    pub fields: Vec<EditorField>,
}

impl EditorTree {
    pub fn new(fields: Vec<EditorField>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&EditorField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorField {
    /// Config key this control edits (camelCase, matching the wire shape).
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub control: Control,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "control", rename_all = "kebab-case")]
pub enum Control {
    Text,
    TextArea,
    Number,
    Toggle,
    Select { options: Vec<String> },
    Color,
    /// Value is an opaque asset URL produced by the upload collaborator.
    Image,
    /// Repeated group of sub-fields (statistic items, FAQ entries, ...).
    List { item_fields: Vec<EditorField> },
}

impl EditorField {
    pub fn text(name: &str, label: &str) -> Self {
        Self::with(name, label, Control::Text)
    }

    pub fn text_area(name: &str, label: &str) -> Self {
        Self::with(name, label, Control::TextArea)
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self::with(name, label, Control::Number)
    }

    pub fn toggle(name: &str, label: &str) -> Self {
        Self::with(name, label, Control::Toggle)
    }

    pub fn select(name: &str, label: &str, options: &[&str]) -> Self {
        Self::with(
            name,
            label,
            Control::Select {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        )
    }

    pub fn color(name: &str, label: &str) -> Self {
        Self::with(name, label, Control::Color)
    }

    pub fn image(name: &str, label: &str) -> Self {
        Self::with(name, label, Control::Image)
    }

    pub fn list(name: &str, label: &str, item_fields: Vec<EditorField>) -> Self {
        Self::with(name, label, Control::List { item_fields })
    }

    fn with(name: &str, label: &str, control: Control) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            control,
        }
    }
}

/// Field-local validation failure. Issues block the save of the block
/// they belong to; sibling blocks are unaffected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_wire_tags() {
        let field = EditorField::select("layout", "Layout", &["grid", "cards"]);
        let wire = serde_json::to_value(&field).unwrap();
        assert_eq!(wire["control"], "select");
        assert_eq!(wire["options"][1], "cards");
    }

    #[test]
    fn test_field_lookup() {
        let tree = EditorTree::new(vec![
            EditorField::text("title", "Title"),
            EditorField::toggle("overlay", "Overlay"),
        ]);
        assert!(tree.field("overlay").is_some());
        assert!(tree.field("missing").is_none());
    }
}
