//! Structured cards attached to AI messages.
//!
//! `CardPayload` is a closed union: the `cardType` tag written to JSON is
//! derived from the variant, so a card can never disagree with its data.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discriminant of a card, for callers that only need the kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Upload,
    Select,
    Form,
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cardType", content = "cardData", rename_all = "lowercase")]
pub enum CardPayload {
    Upload(UploadCard),
    Select(SelectCard),
    Form(FormCard),
    Confirm(ConfirmCard),
}

impl CardPayload {
    pub fn kind(&self) -> CardKind {
        match self {
            CardPayload::Upload(_) => CardKind::Upload,
            CardPayload::Select(_) => CardKind::Select,
            CardPayload::Form(_) => CardKind::Form,
            CardPayload::Confirm(_) => CardKind::Confirm,
        }
    }
}

/// File picker with accept filter and limits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadCard {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub accept: Option<String>,
    #[serde(default)]
    pub multiple: bool,
    /// Maximum size of a single file, in bytes
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_count: Option<u32>,
}

/// Option value: the renderer sends back whichever shape it was given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    Number(f64),
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub label: String,
    pub value: OptionValue,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub preview: Option<String>,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: None,
            icon: None,
            preview: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Single- or multi-select option picker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectCard {
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub searchable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Input,
    Textarea,
    Select,
    Switch,
    Number,
    Slider,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default_value: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<SelectOption>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max: Option<f64>,
}

impl FormField {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            placeholder: None,
            required: false,
            default_value: None,
            options: Vec::new(),
            min: None,
            max: None,
        }
    }
}

/// A form with a submit button
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormCard {
    pub fields: Vec<FormField>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub submit_text: Option<String>,
}

/// Yes/no confirmation dialog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmCard {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub confirm_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cancel_text: Option<String>,
    #[serde(default)]
    pub danger: bool,
}
