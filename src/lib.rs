//! Field extraction for chemical Safety Data Sheets.
//!
//! PDF bytes go through an ordered text-acquisition chain, the text is split
//! into the sixteen numbered SDS sections, and a set of independent
//! extractors fills in a flat [`ParsedDocument`].
//!
//! ```no_run
//! use sds_parser::{ParserConfig, SdsParser};
//!
//! let parser = SdsParser::new(ParserConfig::default());
//! let doc = parser.parse_path("sheet.pdf".as_ref(), 42)?;
//! println!("{}", doc.to_json()?);
//! # Ok::<(), sds_parser::SdsError>(())
//! ```

pub mod config;
pub mod document;
pub mod fetch;
pub mod fields;
pub mod parser;
pub mod pdf_extraction;
pub mod scoring;
pub mod sections;
pub mod types;

pub use config::ParserConfig;
pub use document::ParsedDocument;
pub use parser::SdsParser;
pub use sections::{segment, Sections};
pub use types::{Result, SdsError};
