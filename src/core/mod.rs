pub mod error;
pub mod value;

pub use error::{LoaderError, Result};
pub use value::BindValue;
