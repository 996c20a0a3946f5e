use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual node produced by block renderers.
///
/// Attribute and style maps are ordered so that rendering the same config
/// twice yields structurally identical output, serialized bytes included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        styles: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<VNode>,
    },

    Text {
        content: String,
    },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    /// Append to the `class` attribute, space-separated.
    pub fn with_class(mut self, class: impl AsRef<str>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes
                .entry("class".to_string())
                .and_modify(|existing| {
                    existing.push(' ');
                    existing.push_str(class.as_ref());
                })
                .or_insert_with(|| class.as_ref().to_string());
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_opt_style(self, key: impl Into<String>, value: &Option<String>) -> Self {
        match value {
            Some(v) => self.with_style(key, v.clone()),
            None => self,
        }
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: impl IntoIterator<Item = VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    /// Append a child only when `child` is Some.
    pub fn with_opt_child(self, child: Option<VNode>) -> Self {
        match child {
            Some(c) => self.with_child(c),
            None => self,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            VNode::Text { .. } => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            VNode::Text { .. } => &[],
        }
    }

    /// Concatenated text content of this subtree.
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text { content } => content.clone(),
            VNode::Element { children, .. } => {
                children.iter().map(VNode::text_content).collect::<Vec<_>>().join("")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let node = VNode::element("section")
            .with_class("hero")
            .with_class("hero-overlay")
            .with_style("background-color", "#fff")
            .with_child(VNode::text("Welcome"));

        assert_eq!(node.attr("class"), Some("hero hero-overlay"));
        assert_eq!(node.text_content(), "Welcome");
    }

    #[test]
    fn test_serialized_output_is_stable() {
        let build = || {
            VNode::element("div")
                .with_attr("data-b", "2")
                .with_attr("data-a", "1")
                .with_style("margin", "0")
                .with_style("color", "red")
        };

        let a = serde_json::to_string(&build()).unwrap();
        let b = serde_json::to_string(&build()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_text_nodes_ignore_element_builders() {
        let node = VNode::text("plain").with_attr("k", "v").with_child(VNode::text("x"));
        assert_eq!(node, VNode::text("plain"));
    }
}
