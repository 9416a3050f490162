//! Field schema → form controls.

use api::{EditBuffer, FieldKind, FieldSchema, FieldSpec, UserRecord, GENDER_OPTIONS};
use chrono::NaiveDate;
use serde_json::Value;

/// Record key bound to the edit buffer's display name.
pub const DISPLAY_NAME_FIELD: &str = "displayName";

/// A rendered form control, labelled with its record key.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldControl {
    /// `editable` only for [`DISPLAY_NAME_FIELD`]; other text keys show the record value.
    Text {
        label: String,
        value: String,
        editable: bool,
    },
    Date {
        label: String,
        value: Option<NaiveDate>,
    },
    /// Empty `value` means nothing selected.
    Select {
        label: String,
        value: String,
        options: &'static [&'static str],
    },
}

impl FieldControl {
    pub fn label(&self) -> &str {
        match self {
            FieldControl::Text { label, .. }
            | FieldControl::Date { label, .. }
            | FieldControl::Select { label, .. } => label,
        }
    }
}

/// Control for one schema entry; `None` for kinds this client cannot render.
pub fn control_for(
    spec: &FieldSpec,
    buffer: &EditBuffer,
    record: Option<&UserRecord>,
) -> Option<FieldControl> {
    let label = spec.name.clone();
    match spec.kind {
        FieldKind::Text if spec.name == DISPLAY_NAME_FIELD => Some(FieldControl::Text {
            label,
            value: buffer.display_name.clone().unwrap_or_default(),
            editable: true,
        }),
        FieldKind::Text => Some(FieldControl::Text {
            label,
            value: record
                .and_then(|r| r.get(&spec.name))
                .map(display_value)
                .unwrap_or_default(),
            editable: false,
        }),
        FieldKind::Date => Some(FieldControl::Date {
            label,
            value: buffer.birthdate,
        }),
        FieldKind::Boolean => Some(FieldControl::Select {
            label,
            value: buffer.gender.clone(),
            options: GENDER_OPTIONS,
        }),
        FieldKind::Unknown => None,
    }
}

/// Controls for the whole schema, in schema order.
pub fn controls(
    schema: &FieldSchema,
    buffer: &EditBuffer,
    record: Option<&UserRecord>,
) -> Vec<FieldControl> {
    schema
        .iter()
        .filter_map(|spec| control_for(spec, buffer, record))
        .collect()
}

/// `YYYY-MM-DD` for a date input, empty when unset.
pub fn format_date_input(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
