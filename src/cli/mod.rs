use anyhow::{Context, Result};
use clap::Parser;
use jsonload::json::FieldMapping;
use jsonload::pipeline::ImportJob;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jsonload")]
#[command(about = "Bulk-insert a JSON array of records into a database table")]
pub struct Cli {
    /// JSON file holding an array of flat objects
    #[arg(long, default_value = "assets/example.json")]
    pub file: PathBuf,

    /// Destination table
    #[arg(long, default_value = "tb_agama")]
    pub table: String,

    /// Field to column mapping as `field=column`, in column order
    #[arg(
        long = "map",
        value_name = "FIELD=COLUMN",
        default_values = ["id=id", "nama_agama=name"],
        conflicts_with = "mapping_file"
    )]
    pub mappings: Vec<String>,

    /// JSON object of `"field": "column"` entries, used instead of --map
    #[arg(long)]
    pub mapping_file: Option<PathBuf>,

    /// Map the file and print the statement without connecting
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    pub fn job(&self) -> Result<ImportJob> {
        let mapping = match &self.mapping_file {
            Some(path) => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("failed to read mapping file {}", path.display()))?;
                FieldMapping::from_json_slice(&bytes)?
            }
            None => FieldMapping::parse_entries(self.mappings.as_slice())?,
        };

        Ok(ImportJob::new(self.file.clone(), self.table.clone(), mapping))
    }
}
