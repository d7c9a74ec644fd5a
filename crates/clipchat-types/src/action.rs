use serde_json::Value;

/// A user interaction with a card, as reported by the renderer.
///
/// The renderer sends `(message_id, kind, payload)`; `from_parts` turns the
/// kind string and the loose JSON payload into this closed set.
#[derive(Debug, Clone, PartialEq)]
pub enum CardAction {
    FileUploaded { file_name: Option<String> },
    OptionSelected { label: Option<String>, value: Option<Value> },
    FormSubmitted { values: Value },
    Confirmed,
    Cancelled,
    /// Any action kind without a dedicated variant (action buttons, etc.)
    Other { kind: String, data: Value },
}

impl CardAction {
    pub fn from_parts(kind: &str, data: Option<Value>) -> Self {
        let data = data.unwrap_or(Value::Null);
        match kind {
            "file-uploaded" => CardAction::FileUploaded {
                file_name: string_field(&data, "fileName"),
            },
            "option-selected" => CardAction::OptionSelected {
                label: string_field(&data, "label"),
                value: data.get("value").cloned(),
            },
            "form-submitted" => CardAction::FormSubmitted { values: data },
            "confirmed" => CardAction::Confirmed,
            "cancelled" => CardAction::Cancelled,
            other => CardAction::Other {
                kind: other.to_string(),
                data,
            },
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            CardAction::FileUploaded { .. } => "file-uploaded",
            CardAction::OptionSelected { .. } => "option-selected",
            CardAction::FormSubmitted { .. } => "form-submitted",
            CardAction::Confirmed => "confirmed",
            CardAction::Cancelled => "cancelled",
            CardAction::Other { kind, .. } => kind,
        }
    }
}

/// Scalar field rendered as text; strings are taken verbatim
fn string_field(data: &Value, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
