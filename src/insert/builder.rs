//! Builder for parameterized multi-row INSERT statements.
//!
//! Table and column names are interpolated verbatim. They come from trusted
//! configuration, never from the input file.

use crate::core::{LoaderError, Result};

pub struct InsertStatementBuilder {
    table_name: String,
    columns: Vec<String>,
    placeholder_groups: Vec<String>,
}

impl InsertStatementBuilder {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: Vec::new(),
            placeholder_groups: Vec::new(),
        }
    }

    pub fn columns(mut self, columns: &[String]) -> Self {
        self.columns = columns.to_vec();
        self
    }

    pub fn placeholder_groups(mut self, groups: &[String]) -> Self {
        self.placeholder_groups = groups.to_vec();
        self
    }

    /// `INSERT INTO <table> (<c1>, ...) VALUES (<g1>), ...`
    ///
    /// With no placeholder groups the VALUES clause is empty; callers skip
    /// execution in that case.
    pub fn build(self) -> Result<String> {
        if self.table_name.trim().is_empty() {
            return Err(LoaderError::Config("Table name cannot be empty".into()));
        }
        if self.columns.is_empty() {
            return Err(LoaderError::Config(format!(
                "No columns to insert into '{}'",
                self.table_name
            )));
        }

        Ok(format!(
            "INSERT INTO {} ({}) VALUES {}",
            self.table_name,
            join(&self.columns, ", "),
            join(&self.placeholder_groups, ", ")
        ))
    }
}

/// `a + sep + b + sep + c ...`
fn join(parts: &[String], sep: &str) -> String {
    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(part);
    }
    out
}
