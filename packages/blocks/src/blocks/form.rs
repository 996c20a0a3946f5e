//! Lead-capture form block.
//!
//! Rendering produces the form structure only. At runtime the public
//! surface wires the submit action to the `FormSink` collaborator; the
//! block itself persists nothing. In editable mode the submit control is
//! disabled so operators cannot file test submissions from the editor.

use crate::editor::{EditorField, EditorTree, ValidationIssue};
use crate::registry::{hydrate, BlockSpec};
use crate::responsive::Viewport;
use crate::vdom::VNode;
use pagecraft_page::BlockKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub required: bool,
    pub options: Vec<String>,
}

impl Default for FormField {
    fn default() -> Self {
        Self {
            name: String::new(),
            field_type: FieldType::Text,
            label: String::new(),
            required: false,
            options: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Tel,
    Textarea,
    Select,
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormConfig {
    pub title: String,
    pub fields: Vec<FormField>,
    pub submit_text: String,
    pub success_message: String,
    pub style: FormStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStyle {
    Modern,
    Classic,
    Minimal,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            title: "Get In Touch".to_string(),
            fields: vec![
                FormField {
                    name: "name".to_string(),
                    field_type: FieldType::Text,
                    label: "Full Name".to_string(),
                    required: true,
                    options: Vec::new(),
                },
                FormField {
                    name: "email".to_string(),
                    field_type: FieldType::Email,
                    label: "Email".to_string(),
                    required: true,
                    options: Vec::new(),
                },
                FormField {
                    name: "phone".to_string(),
                    field_type: FieldType::Tel,
                    label: "Phone".to_string(),
                    required: false,
                    options: Vec::new(),
                },
                FormField {
                    name: "message".to_string(),
                    field_type: FieldType::Textarea,
                    label: "Message".to_string(),
                    required: false,
                    options: Vec::new(),
                },
            ],
            submit_text: "Send Inquiry".to_string(),
            success_message: "Thank you! We will contact you shortly.".to_string(),
            style: FormStyle::Modern,
        }
    }
}

fn field_control(field: &FormField) -> VNode {
    let control = match field.field_type {
        FieldType::Textarea => VNode::element("textarea").with_attr("name", field.name.clone()),
        FieldType::Select => VNode::element("select")
            .with_attr("name", field.name.clone())
            .with_children(field.options.iter().map(|option| {
                VNode::element("option")
                    .with_attr("value", option.clone())
                    .with_child(VNode::text(option.clone()))
            })),
        other => {
            let type_attr = match other {
                FieldType::Email => "email",
                FieldType::Tel => "tel",
                FieldType::Checkbox => "checkbox",
                _ => "text",
            };
            VNode::element("input")
                .with_attr("type", type_attr)
                .with_attr("name", field.name.clone())
        }
    };

    let control = if field.required {
        control.with_attr("required", "true")
    } else {
        control
    };

    VNode::element("label")
        .with_class("form-field")
        .with_child(VNode::element("span").with_child(VNode::text(field.label.clone())))
        .with_child(control)
}

pub struct FormBlock;

impl BlockSpec for FormBlock {
    fn kind(&self) -> BlockKind {
        BlockKind::Form
    }

    fn default_config(&self) -> Value {
        serde_json::to_value(FormConfig::default()).unwrap_or_default()
    }

    fn render(&self, config: &Value, _viewport: Viewport, editable: bool) -> VNode {
        let config: FormConfig = hydrate(config);

        let style_class = match config.style {
            FormStyle::Modern => "form-modern",
            FormStyle::Classic => "form-classic",
            FormStyle::Minimal => "form-minimal",
        };

        let mut submit = VNode::element("button")
            .with_class("form-submit")
            .with_attr("type", "submit")
            .with_child(VNode::text(config.submit_text.clone()));
        if editable {
            submit = submit.with_attr("disabled", "true");
        }

        VNode::element("section")
            .with_class("contact-form")
            .with_attr("id", "contact-form")
            .with_child(
                VNode::element("h2")
                    .with_class("form-heading")
                    .with_child(VNode::text(config.title.clone())),
            )
            .with_child(
                VNode::element("form")
                    .with_class(style_class)
                    .with_attr("data-success-message", config.success_message.clone())
                    .with_children(config.fields.iter().map(field_control))
                    .with_child(submit),
            )
    }

    fn edit(&self, _config: &Value) -> EditorTree {
        EditorTree::new(vec![
            EditorField::text("title", "Title"),
            EditorField::text("submitText", "Submit button text"),
            EditorField::text("successMessage", "Success message"),
            EditorField::select("style", "Style", &["modern", "classic", "minimal"]),
            EditorField::list(
                "fields",
                "Fields",
                vec![
                    EditorField::text("name", "Field name"),
                    EditorField::select(
                        "type",
                        "Type",
                        &["text", "email", "tel", "textarea", "select", "checkbox"],
                    ),
                    EditorField::text("label", "Label"),
                    EditorField::toggle("required", "Required"),
                ],
            ),
        ])
    }

    fn validate(&self, config: &Value) -> Vec<ValidationIssue> {
        let config: FormConfig = hydrate(config);
        let mut issues = Vec::new();

        if config.fields.is_empty() {
            issues.push(ValidationIssue::new("fields", "a form needs at least one field"));
        }

        let mut seen = HashSet::new();
        for (i, field) in config.fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                issues.push(ValidationIssue::new(
                    format!("fields[{i}].name"),
                    "field name must not be empty",
                ));
            } else if !seen.insert(field.name.clone()) {
                issues.push(ValidationIssue::new(
                    format!("fields[{i}].name"),
                    "field names must be unique",
                ));
            }
            if field.field_type == FieldType::Select && field.options.is_empty() {
                issues.push(ValidationIssue::new(
                    format!("fields[{i}].options"),
                    "a select field needs options",
                ));
            }
        }

        issues
    }
}
