pub mod document;
pub mod parser;
pub mod tokens;

pub use crate::types::identifiers::DocumentVersion;
pub use document::{Document, DocumentError, DocumentReadError};
pub use parser::{DocumentParser, NgramParser, ParseError};
pub use tokens::TokenCounts;
