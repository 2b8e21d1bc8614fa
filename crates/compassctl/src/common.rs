use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use compass_core::{BoardTable, Extractor, ParameterTable, Variant};
use serde::Serialize;
use tracing::info;

/// Load a parameter table override from a JSON file.
pub fn load_parameters(path: &Path) -> Result<ParameterTable> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    ParameterTable::from_json(&text)
        .with_context(|| format!("parse parameter table {}", path.display()))
}

/// Build the extractor for `variant` and run it over `xml_file`.
pub fn extract(
    variant: Variant,
    xml_file: &Path,
    params: Option<&Path>,
) -> Result<(Extractor, Vec<BoardTable>)> {
    let parameters = params.map(load_parameters).transpose()?;
    let extractor = Extractor::for_variant(variant, parameters);
    let boards = extractor
        .extract_path(xml_file)
        .with_context(|| format!("load {}", xml_file.display()))?;
    info!(
        ?variant,
        boards = boards.len(),
        rows = extractor.parameters().len(),
        "extracted board tables"
    );
    Ok((extractor, boards))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialise JSON output")?;
    println!("{text}");
    Ok(())
}
