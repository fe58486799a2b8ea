//! Report ingestion and data source handling.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig, format_name, ingest};
pub use source::{Dataset, Row, RowId, SourceMetadata};
