use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use compass_core::Variant;

use crate::common;
use crate::present::{self, Filters};

#[derive(Debug, Clone)]
pub struct ShowArgs {
    pub xml_file: PathBuf,
    pub board: Option<usize>,
    pub channels: Option<Vec<u32>>,
    pub params: Option<PathBuf>,
}

/// Full telemetry report: connected and active boards, all channels.
pub fn run(args: ShowArgs, json: bool) -> Result<()> {
    if !json {
        println!("Filename: {}", args.xml_file.display());
    }
    let (extractor, boards) =
        common::extract(Variant::FullTelemetry, &args.xml_file, args.params.as_deref())?;
    let filters = Filters {
        board: args.board,
        channels: args.channels,
    };

    if json {
        return common::print_json(&present::filter_tables(&boards, &filters));
    }
    let mut out = io::stdout().lock();
    present::present(&mut out, &boards, &filters, extractor.empty_notice())
        .context("write report")
}
