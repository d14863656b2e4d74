//! JSON input handling
//!
//! - `loader.rs` - reads the input file
//! - `mapping.rs` - ordered field to column mapping
//! - `mapper.rs` - records to columns, placeholder groups and bind values

mod loader;
mod mapper;
mod mapping;

pub use loader::read_file;
pub use mapper::{MappedBatch, map_records};
pub use mapping::{FieldColumn, FieldMapping};
