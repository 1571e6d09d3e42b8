//! Loading datasets from delimited text and writing them back.

mod export;
mod parser;
mod source;

pub use export::{ExportFormat, Exporter};
pub use parser::{is_na_value, Parser, ParserConfig};
pub use source::SourceMetadata;
