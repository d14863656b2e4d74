//! Record Mapper
//!
//! Turns a JSON array of flat records into the column list, placeholder
//! groups and positional bind values of a single multi-row INSERT.

use super::mapping::FieldMapping;
use crate::core::{BindValue, LoaderError, Result};
use serde_json::Value as JsonValue;

/// Output of [`map_records`].
///
/// Values of record `i` occupy `values[i * width .. (i + 1) * width]`,
/// where `width` is the number of mapped fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedBatch {
    columns: Vec<String>,
    placeholder_groups: Vec<String>,
    values: Vec<BindValue>,
}

impl MappedBatch {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn placeholder_groups(&self) -> &[String] {
        &self.placeholder_groups
    }

    pub fn values(&self) -> &[BindValue] {
        &self.values
    }

    pub fn record_count(&self) -> usize {
        self.placeholder_groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placeholder_groups.is_empty()
    }

    /// Bound values of one record, in column order
    pub fn row(&self, index: usize) -> Option<&[BindValue]> {
        let width = self.columns.len();
        let start = index.checked_mul(width)?;
        self.values.get(start..start + width)
    }
}

/// One parenthesized group of `count` positional placeholders
fn placeholder_group(count: usize) -> String {
    let marks = vec!["?"; count];
    format!("({})", marks.join(", "))
}

/// Parse `bytes` as a JSON array of objects and map each record through
/// `mapping`.
///
/// Fails on the first record missing a mapped field; nothing is returned
/// for the records before it.
pub fn map_records(bytes: &[u8], mapping: &FieldMapping) -> Result<MappedBatch> {
    let parsed: JsonValue = serde_json::from_slice(bytes)?;

    let records = match parsed {
        JsonValue::Array(records) => records,
        other => {
            return Err(LoaderError::Parse(format!(
                "expected a JSON array of objects, found {}",
                json_kind(&other)
            )));
        }
    };

    let width = mapping.len();
    let group = placeholder_group(width);
    let mut values = Vec::with_capacity(records.len() * width);
    let mut placeholder_groups = Vec::with_capacity(records.len());

    for (record_index, record) in records.iter().enumerate() {
        let obj = record.as_object().ok_or_else(|| {
            LoaderError::Parse(format!(
                "record {} is {}, expected an object",
                record_index,
                json_kind(record)
            ))
        })?;

        for entry in mapping.iter() {
            let raw = obj.get(&entry.field).ok_or_else(|| LoaderError::MissingField {
                field: entry.field.clone(),
                record_index,
            })?;

            let value = BindValue::from_json(raw).ok_or_else(|| {
                LoaderError::Parse(format!(
                    "field '{}' in record {} holds nested {}",
                    entry.field,
                    record_index,
                    json_kind(raw)
                ))
            })?;

            values.push(value);
        }

        placeholder_groups.push(group.clone());
    }

    Ok(MappedBatch {
        columns: mapping.columns(),
        placeholder_groups,
        values,
    })
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
