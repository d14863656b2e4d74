//! Field Mapping
//!
//! Ordered association of JSON field names to destination column names.
//! Declaration order is the iteration order, which fixes the column order
//! of the INSERT statement and the order values are bound in.

use crate::core::{LoaderError, Result};
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldColumn {
    pub field: String,
    pub column: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    entries: Vec<FieldColumn>,
}

impl FieldMapping {
    /// Build a mapping from `(field, column)` pairs, in the given order.
    ///
    /// Rejects empty mappings, empty names, and duplicated fields or columns.
    pub fn new<I, F, C>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (F, C)>,
        F: Into<String>,
        C: Into<String>,
    {
        let mut entries = Vec::new();
        let mut seen_fields = HashSet::new();
        let mut seen_columns = HashSet::new();

        for (field, column) in pairs {
            let field = field.into();
            let column = column.into();

            if field.is_empty() || column.is_empty() {
                return Err(LoaderError::Config(format!(
                    "Mapping entry '{}={}' has an empty side",
                    field, column
                )));
            }
            if !seen_fields.insert(field.clone()) {
                return Err(LoaderError::Config(format!(
                    "Field '{}' is mapped more than once",
                    field
                )));
            }
            if !seen_columns.insert(column.clone()) {
                return Err(LoaderError::Config(format!(
                    "Column '{}' is targeted by more than one field",
                    column
                )));
            }

            entries.push(FieldColumn { field, column });
        }

        if entries.is_empty() {
            return Err(LoaderError::Config("Field mapping is empty".into()));
        }

        Ok(Self { entries })
    }

    /// Parse `field=column` entries, e.g. from repeated `--map` flags.
    /// An entry without `=` maps the field to a column of the same name.
    pub fn parse_entries<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let pairs = entries.iter().map(|entry| {
            let entry = entry.as_ref().trim();
            match entry.split_once('=') {
                Some((field, column)) => (field.trim().to_string(), column.trim().to_string()),
                None => (entry.to_string(), entry.to_string()),
            }
        });
        Self::new(pairs)
    }

    /// Parse a JSON object of `"field": "column"` entries, keeping
    /// declaration order.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let parsed: JsonValue = serde_json::from_slice(bytes)
            .map_err(|e| LoaderError::Config(format!("Invalid mapping file: {}", e)))?;

        let obj = parsed
            .as_object()
            .ok_or_else(|| LoaderError::Config("Mapping file must be a JSON object".into()))?;

        let mut pairs = Vec::with_capacity(obj.len());
        for (field, column) in obj {
            let column = column.as_str().ok_or_else(|| {
                LoaderError::Config(format!("Column for field '{}' must be a string", field))
            })?;
            pairs.push((field.clone(), column.to_string()));
        }

        Self::new(pairs)
    }

    /// Number of mapped fields, never zero
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldColumn> {
        self.entries.iter()
    }

    /// Destination columns in mapping order
    pub fn columns(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.column.clone()).collect()
    }
}

impl fmt::Display for FieldMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("{}={}", e.field, e.column))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
