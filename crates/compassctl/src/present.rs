//! Text rendering of board tables with optional board and channel filters.

use std::io::{self, Write};
use std::iter;

use compass_core::{channel_name, BoardTable, ChannelTable};
use tracing::warn;

const ABSENT: &str = "-";

/// Board and channel selection requested on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    /// Board index among all boards of the document.
    pub board: Option<usize>,
    /// Channel numbers; `None` shows every channel.
    pub channels: Option<Vec<u32>>,
}

impl Filters {
    fn matches_board(&self, index: usize) -> bool {
        self.board.map_or(true, |wanted| wanted == index)
    }

    fn channel_names(&self) -> Option<Vec<String>> {
        self.channels
            .as_ref()
            .map(|channels| channels.iter().map(channel_name).collect())
    }

    /// Table of `board` restricted to the requested channels. `None` when a
    /// channel filter is set and none of its channels exist on the board.
    fn view(&self, board: &BoardTable) -> Option<ChannelTable> {
        match self.channel_names() {
            None => Some(board.table.clone()),
            Some(names) => {
                let table = board.table.select_columns(names.as_slice());
                (!table.is_empty()).then_some(table)
            }
        }
    }
}

/// Print every board matching `filters` as a labelled table.
pub fn present<W: Write>(
    out: &mut W,
    boards: &[BoardTable],
    filters: &Filters,
    empty_notice: &str,
) -> io::Result<()> {
    if boards.is_empty() {
        writeln!(out, "\n{empty_notice}")?;
        return Ok(());
    }

    let mut shown = 0usize;
    for board in boards.iter().filter(|b| filters.matches_board(b.info.index)) {
        shown += 1;
        writeln!(out, "\n{}:", board.info.label)?;
        match filters.view(board) {
            Some(table) => write!(out, "{}", render_table(&table))?,
            None => writeln!(
                out,
                "  Warning: Requested channels {:?} not found in this board.",
                filters.channels.as_deref().unwrap_or_default()
            )?,
        }
    }

    if shown == 0 {
        if let Some(index) = filters.board {
            writeln!(out, "\nNo board with index {index} found.")?;
        }
    }
    Ok(())
}

/// Boards matching `filters` with their tables restricted to the requested
/// channels. Boards without any requested channel are dropped.
pub fn filter_tables(boards: &[BoardTable], filters: &Filters) -> Vec<BoardTable> {
    boards
        .iter()
        .filter(|b| filters.matches_board(b.info.index))
        .filter_map(|board| match filters.view(board) {
            Some(table) => Some(BoardTable {
                info: board.info.clone(),
                table,
            }),
            None => {
                warn!(
                    board = %board.info.label,
                    channels = ?filters.channels,
                    "requested channels not found"
                );
                None
            }
        })
        .collect()
}

/// Render `table` with left-aligned row labels and right-aligned cells.
/// Absent cells show as `-`.
pub fn render_table(table: &ChannelTable) -> String {
    let label_width = table
        .rows()
        .iter()
        .map(|row| row.label.chars().count())
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(col, name)| {
            table
                .rows()
                .iter()
                .map(|row| cell_text(&row.cells[col]).chars().count())
                .chain(iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut text = format!("{:<label_width$}", "");
    for (name, width) in table.columns().iter().zip(&widths) {
        text.push_str(&format!("  {name:>width$}"));
    }
    text.push('\n');
    for row in table.rows() {
        text.push_str(&format!("{:<label_width$}", row.label));
        for (cell, width) in row.cells.iter().zip(&widths) {
            text.push_str(&format!("  {:>width$}", cell_text(cell)));
        }
        text.push('\n');
    }
    text
}

fn cell_text(cell: &Option<String>) -> &str {
    cell.as_deref().unwrap_or(ABSENT)
}
