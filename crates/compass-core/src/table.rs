//! Per-board channel tables.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::resolve::ResolvedParameter;
use crate::select::EnabledSet;

/// Column name for channel `index`.
pub fn channel_name(index: impl fmt::Display) -> String {
    format!("CH{index}")
}

/// One parameter row; `cells` line up with the table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub label: String,
    pub cells: Vec<Option<String>>,
}

/// Rows are parameter labels, columns are channel names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelTable {
    columns: Vec<String>,
    rows: Vec<TableRow>,
}

impl ChannelTable {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// A table without columns carries no data and is not reported.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Cell at (`label`, `column`); `None` when absent or out of the table.
    pub fn cell(&self, label: &str, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows
            .iter()
            .find(|row| row.label == label)
            .and_then(|row| row.cells[col].as_deref())
    }

    /// Copy of the table restricted to `columns`, in the given order.
    /// Unknown and repeated names are dropped.
    pub fn select_columns<S: AsRef<str>>(&self, columns: &[S]) -> ChannelTable {
        let mut picked: Vec<usize> = Vec::new();
        for name in columns {
            if let Some(idx) = self.column_index(name.as_ref()) {
                if !picked.contains(&idx) {
                    picked.push(idx);
                }
            }
        }
        ChannelTable {
            columns: picked.iter().map(|&idx| self.columns[idx].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| TableRow {
                    label: row.label.clone(),
                    cells: picked.iter().map(|&idx| row.cells[idx].clone()).collect(),
                })
                .collect(),
        }
    }

    fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }
}

/// Build a board table from already formatted parameter values.
///
/// Each cell starts as the row's global value and is then overwritten by the
/// channel overrides in order, so a later override for the same channel wins.
/// Overrides for channels outside `CH0..CH<channel_count>` are ignored. With
/// an `enabled` set, only enabled channels become columns.
pub fn assemble(
    rows: &[(String, ResolvedParameter)],
    channel_count: usize,
    enabled: Option<&EnabledSet>,
) -> ChannelTable {
    let columns: Vec<String> = (0..channel_count)
        .map(channel_name)
        .filter(|name| enabled.map_or(true, |set| set.contains(name)))
        .collect();
    let positions: HashMap<&str, usize> = columns
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.as_str(), idx))
        .collect();

    let rows = rows
        .iter()
        .map(|(label, resolved)| {
            let global = resolved.global().map(str::to_string);
            let mut cells = vec![global; columns.len()];
            for (channel, value) in &resolved.overrides {
                if let Some(&col) = positions.get(channel_name(channel).as_str()) {
                    cells[col] = Some(value.clone());
                }
            }
            TableRow {
                label: label.clone(),
                cells,
            }
        })
        .collect();

    ChannelTable { columns, rows }
}
