//! Per-channel parameter tables for CoMPASS settings exports.
//!
//! The [`Extractor`] walks the boards of a [`Document`], keeps the ones
//! accepted by a [`BoardFilter`], resolves every tracked parameter of the
//! [`ParameterTable`] into a board-wide value plus channel overrides, formats
//! the values through a [`FormatterRegistry`] and assembles one
//! [`ChannelTable`] per board.
//!
//! ```rust,no_run
//! use compass_core::{Extractor, Variant};
//!
//! # fn run() -> Result<(), compass_core::CoreError> {
//! let extractor = Extractor::for_variant(Variant::FullTelemetry, None);
//! for board in extractor.extract_path("settings.xml")? {
//!     println!("{}: {} channels", board.info.label, board.table.columns().len());
//! }
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use compass_xml::{Document, XmlError};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub mod format;
pub mod keys;
pub mod params;
pub mod resolve;
pub mod select;
pub mod table;

pub use format::{CoarseGain, EnergyCoarseGain, FormatterRegistry, ValueFormatter};
pub use params::{ParameterKey, ParameterTable};
pub use resolve::{resolve, ResolvedParameter};
pub use select::{
    select_boards, BoardFilter, BoardInfo, EnabledChannels, EnabledSet, FullTelemetry,
    SelectedBoard,
};
pub use table::{assemble, channel_name, ChannelTable, TableRow};

/// Error type produced by the extraction pipeline.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The settings document could not be loaded.
    #[error(transparent)]
    Xml(#[from] XmlError),
    /// A user supplied configuration is unusable.
    #[error("config: {0}")]
    Config(String),
}

/// The two reports over a settings export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Connected and active boards, all their channels.
    FullTelemetry,
    /// Boards with enabled channels, enabled channels only.
    EnabledChannels,
}

impl Variant {
    /// Built-in rows tracked by this report.
    pub fn default_parameters(self) -> ParameterTable {
        match self {
            Variant::FullTelemetry => ParameterTable::full_telemetry(),
            Variant::EnabledChannels => ParameterTable::enabled_channels(),
        }
    }

    fn filter(self) -> Box<dyn BoardFilter> {
        match self {
            Variant::FullTelemetry => Box::new(FullTelemetry),
            Variant::EnabledChannels => Box::new(EnabledChannels),
        }
    }
}

/// Assembled table of one selected board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardTable {
    pub info: BoardInfo,
    pub table: ChannelTable,
}

/// Board table pipeline parameterized by board filter, tracked parameters and
/// value formatters.
#[derive(Debug)]
pub struct Extractor {
    parameters: ParameterTable,
    filter: Box<dyn BoardFilter>,
    formatters: FormatterRegistry,
}

impl Extractor {
    pub fn new(
        parameters: ParameterTable,
        filter: Box<dyn BoardFilter>,
        formatters: FormatterRegistry,
    ) -> Self {
        Extractor {
            parameters,
            filter,
            formatters,
        }
    }

    /// Extractor for a built-in report. `parameters` replaces the default rows.
    pub fn for_variant(variant: Variant, parameters: Option<ParameterTable>) -> Self {
        Self::new(
            parameters.unwrap_or_else(|| variant.default_parameters()),
            variant.filter(),
            FormatterRegistry::with_builtin(),
        )
    }

    pub fn parameters(&self) -> &ParameterTable {
        &self.parameters
    }

    /// Notice to print when the report has no boards.
    pub fn empty_notice(&self) -> &'static str {
        self.filter.empty_notice()
    }

    /// Load the settings file at `path` and extract its board tables.
    pub fn extract_path(&self, path: impl AsRef<Path>) -> Result<Vec<BoardTable>, CoreError> {
        let doc = compass_xml::load(path)?;
        Ok(self.extract(&doc))
    }

    /// Board tables in document order. Boards whose table has no columns are
    /// left out.
    pub fn extract(&self, doc: &Document) -> Vec<BoardTable> {
        select_boards(doc, self.filter.as_ref())
            .into_iter()
            .filter_map(|board| self.board_table(board))
            .collect()
    }

    fn board_table(&self, board: SelectedBoard<'_>) -> Option<BoardTable> {
        let rows: Vec<(String, ResolvedParameter)> = self
            .parameters
            .iter()
            .map(|param| {
                let resolved = resolve(board.element, &param.key)
                    .formatted(&self.formatters, &param.key);
                (param.label.clone(), resolved)
            })
            .collect();
        let table = assemble(&rows, board.info.channel_count, board.enabled.as_ref());
        if table.is_empty() {
            debug!(index = board.info.index, "board table has no channels, omitted");
            return None;
        }
        Some(BoardTable {
            info: board.info,
            table,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_filter_and_formatter_plug_in() {
        #[derive(Debug)]
        struct EveryBoard;

        impl BoardFilter for EveryBoard {
            fn select<'a>(
                &self,
                index: usize,
                board: &'a compass_xml::Element,
            ) -> Option<SelectedBoard<'a>> {
                Some(SelectedBoard {
                    info: BoardInfo {
                        index,
                        id: index.to_string(),
                        model: "any".into(),
                        channel_count: 2,
                        label: format!("#{index}"),
                    },
                    element: board,
                    enabled: None,
                })
            }

            fn empty_notice(&self) -> &'static str {
                "nothing"
            }
        }

        #[derive(Debug)]
        struct Upper;

        impl ValueFormatter for Upper {
            fn format(&self, value: &str) -> String {
                value.to_uppercase()
            }
        }

        let doc = compass_xml::parse(
            r#"<r><board><parameters>
                <entry><key>SRV_PARAM_CH_POLARITY</key><value><value>pos</value></value></entry>
            </parameters></board></r>"#,
        )
        .expect("parse");
        let params = ParameterTable::from_json(
            r#"[{"key": "SRV_PARAM_CH_POLARITY", "label": "Polarity"}]"#,
        )
        .expect("params");
        let mut formatters = FormatterRegistry::new();
        formatters.register(keys::CH_POLARITY, Upper);

        let extractor = Extractor::new(params, Box::new(EveryBoard), formatters);
        assert_eq!(extractor.empty_notice(), "nothing");
        let boards = extractor.extract(&doc);
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].info.label, "#0");
        assert_eq!(boards[0].table.cell("Polarity", "CH1"), Some("POS"));
    }

    #[test]
    fn zero_channel_board_is_omitted() {
        let doc = compass_xml::parse(
            "<r><board><connected>true</connected><active>true</active>\
             <channelCount>0</channelCount></board></r>",
        )
        .expect("parse");
        let extractor = Extractor::for_variant(Variant::FullTelemetry, None);
        assert!(extractor.extract(&doc).is_empty());
    }

    #[test]
    fn extract_path_surfaces_load_errors() {
        let extractor = Extractor::for_variant(Variant::EnabledChannels, None);
        let err = extractor
            .extract_path("/nonexistent/settings.xml")
            .unwrap_err();
        assert!(matches!(err, CoreError::Xml(XmlError::Io { .. })));
    }
}
