use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use compassctl::cmd_enabled;
use compassctl::cmd_show::{self, ShowArgs};

#[derive(Parser, Debug)]
#[command(name = "compassctl", version, about = "CoMPASS settings tables")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Output JSON instead of text tables
    #[arg(long, global = true)]
    json: bool,
    /// JSON file replacing the built-in parameter rows
    #[arg(long, global = true)]
    params: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Connected and active boards, every channel
    Show {
        /// Path to CoMPASS settings.xml file
        xml_file: PathBuf,
        /// Board index to display (0-based)
        #[arg(short, long)]
        board: Option<usize>,
        /// Channel number(s) to display
        #[arg(short, long, num_args = 1..)]
        channels: Option<Vec<u32>>,
    },
    /// Boards with enabled channels, enabled channels only
    Enabled {
        /// Path to CoMPASS settings.xml file
        xml_file: PathBuf,
    },
}

fn main() -> Result<()> {
    let Cli {
        verbose,
        json,
        params,
        cmd,
    } = Cli::parse();

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| level.into()),
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cmd {
        Cmd::Show {
            xml_file,
            board,
            channels,
        } => {
            let args = ShowArgs {
                xml_file,
                board,
                channels,
                params,
            };
            cmd_show::run(args, json)?
        }
        Cmd::Enabled { xml_file } => cmd_enabled::run(&xml_file, params.as_deref(), json)?,
    };

    Ok(())
}
