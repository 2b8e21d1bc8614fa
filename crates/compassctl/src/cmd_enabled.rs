use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use compass_core::Variant;

use crate::common;
use crate::present::{self, Filters};

/// Enabled-channels report: boards with enabled channels, enabled channels only.
pub fn run(xml_file: &Path, params: Option<&Path>, json: bool) -> Result<()> {
    if !json {
        println!("Filename: {}", xml_file.display());
    }
    let (extractor, boards) = common::extract(Variant::EnabledChannels, xml_file, params)?;

    if json {
        return common::print_json(&boards);
    }
    let mut out = io::stdout().lock();
    present::present(&mut out, &boards, &Filters::default(), extractor.empty_notice())
        .context("write report")
}
