//! CLI entry point for wave function collapse over sample tiles

use clap::Parser;
use tilecollapse::io::cli::{Cli, FileProcessor};
use tilecollapse::io::logging;

fn main() -> tilecollapse::Result<()> {
    let cli = Cli::parse();
    if !logging::init(logging::level_for(cli.quiet, cli.verbose)) {
        log::warn!("a logger was already installed, keeping it");
    }
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
