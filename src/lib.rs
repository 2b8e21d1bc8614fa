#![cfg_attr(docsrs, feature(doc_cfg))]
//! CoMPASS settings facade that re-exports the workspace crates.
//!
//! ```rust,no_run
//! use compass_rs::tables::{Extractor, Variant};
//!
//! # fn run() -> Result<(), compass_rs::tables::CoreError> {
//! let doc = compass_rs::xml::load("settings.xml")?;
//! let extractor = Extractor::for_variant(Variant::EnabledChannels, None);
//! let boards = extractor.extract(&doc);
//! if boards.is_empty() {
//!     println!("{}", extractor.empty_notice());
//! }
//! for board in &boards {
//!     println!("{} -> {:?}", board.info.label, board.table.columns());
//! }
//! # Ok(())
//! # }
//! ```

pub use compass_core as tables;
pub use compass_xml as xml;

pub use compass_core::{BoardTable, CoreError, Extractor, Variant};
pub use compass_xml::{Document, XmlError};

/// Load `path` and extract the tables of the given report with its built-in rows.
pub fn extract_file(
    path: impl AsRef<std::path::Path>,
    variant: Variant,
) -> Result<Vec<BoardTable>, CoreError> {
    let tables = Extractor::for_variant(variant, None).extract_path(path)?;
    tracing::debug!(?variant, boards = tables.len(), "extracted settings file");
    Ok(tables)
}
