//! Board selection strategies.

use std::collections::BTreeSet;

use compass_xml::{Document, Element};
use serde::Serialize;
use tracing::{debug, warn};

use crate::keys;
use crate::resolve::resolve;
use crate::table::channel_name;

/// Channel count assumed when a board does not report one.
pub const DEFAULT_CHANNEL_COUNT: usize = 16;
/// Largest `channelCount` accepted from a settings file.
pub const MAX_CHANNEL_COUNT: usize = 64;
/// Channels scanned by the enabled-channels report.
pub const ENABLED_SCAN_CHANNELS: usize = 8;

/// Channel names (`CH<n>`) whose enable flag is `true`.
pub type EnabledSet = BTreeSet<String>;

/// Identification of a selected board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardInfo {
    /// Position among all boards of the document, skipped ones included.
    pub index: usize,
    pub id: String,
    pub model: String,
    pub channel_count: usize,
    /// Section header used when printing the board.
    pub label: String,
}

/// A board that passed the filter.
#[derive(Debug, Clone)]
pub struct SelectedBoard<'a> {
    pub info: BoardInfo,
    pub element: &'a Element,
    /// Channels to keep. `None` keeps every channel.
    pub enabled: Option<EnabledSet>,
}

/// Decides which boards are reported and how they are labelled.
pub trait BoardFilter: std::fmt::Debug {
    /// Return the selection for `board`, or `None` to skip it.
    fn select<'a>(&self, index: usize, board: &'a Element) -> Option<SelectedBoard<'a>>;

    /// Notice printed when no board is selected.
    fn empty_notice(&self) -> &'static str;
}

/// Boards flagged both connected and active, labelled `<model> (<id>)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullTelemetry;

impl BoardFilter for FullTelemetry {
    fn select<'a>(&self, index: usize, board: &'a Element) -> Option<SelectedBoard<'a>> {
        let connected = board.child_text("connected");
        let active = board.child_text("active");
        if connected != Some("true") || active != Some("true") {
            debug!(index, ?connected, ?active, "board not connected and active, skipped");
            return None;
        }
        let id = board_id(index, board);
        let model = board_model(board);
        let label = format!("{model} ({id})");
        Some(SelectedBoard {
            info: BoardInfo {
                index,
                channel_count: channel_count(index, board),
                id,
                model,
                label,
            },
            element: board,
            enabled: None,
        })
    }

    fn empty_notice(&self) -> &'static str {
        "No active boards found."
    }
}

/// Boards with at least one enabled channel among the first eight,
/// labelled `Board_<index>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnabledChannels;

impl BoardFilter for EnabledChannels {
    fn select<'a>(&self, index: usize, board: &'a Element) -> Option<SelectedBoard<'a>> {
        let enabled = enabled_channels(board);
        if enabled.is_empty() {
            debug!(index, "board has no enabled channels, skipped");
            return None;
        }
        Some(SelectedBoard {
            info: BoardInfo {
                index,
                id: board_id(index, board),
                model: board_model(board),
                channel_count: ENABLED_SCAN_CHANNELS,
                label: synthetic_id(index),
            },
            element: board,
            enabled: Some(enabled),
        })
    }

    fn empty_notice(&self) -> &'static str {
        "No boards with enabled channels found."
    }
}

/// Walk the `board` children of the root in document order and keep the
/// ones accepted by `filter`. Indices count every board.
pub fn select_boards<'a>(doc: &'a Document, filter: &dyn BoardFilter) -> Vec<SelectedBoard<'a>> {
    let selected: Vec<_> = doc
        .root()
        .children_named("board")
        .enumerate()
        .filter_map(|(index, board)| filter.select(index, board))
        .collect();
    debug!(selected = selected.len(), ?filter, "board selection done");
    selected
}

/// Channel names whose per-channel `SRV_PARAM_CH_ENABLED` override is `true`.
pub fn enabled_channels(board: &Element) -> EnabledSet {
    resolve(board, keys::CH_ENABLED)
        .overrides
        .into_iter()
        .filter(|(_, value)| value == "true")
        .map(|(channel, _)| channel_name(&channel))
        .collect()
}

fn synthetic_id(index: usize) -> String {
    format!("Board_{index}")
}

fn board_id(index: usize, board: &Element) -> String {
    board
        .child_text("id")
        .map(str::to_string)
        .unwrap_or_else(|| synthetic_id(index))
}

fn board_model(board: &Element) -> String {
    board.child_text("modelName").unwrap_or("Unknown").to_string()
}

fn channel_count(index: usize, board: &Element) -> usize {
    let Some(text) = board.child_text("channelCount") else {
        return DEFAULT_CHANNEL_COUNT;
    };
    match text.parse::<usize>() {
        Ok(count) if count <= MAX_CHANNEL_COUNT => count,
        Ok(count) => {
            warn!(index, count, max = MAX_CHANNEL_COUNT, "channelCount too large, using default");
            DEFAULT_CHANNEL_COUNT
        }
        Err(err) => {
            warn!(index, value = text, %err, "invalid channelCount, using default");
            DEFAULT_CHANNEL_COUNT
        }
    }
}
