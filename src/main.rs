//! CLI entry point for the microscopy tile stitcher

use clap::Parser;
use tilestitch::io::cli::{Cli, CommandProcessor, print_report};

fn main() -> tilestitch::Result<()> {
    let cli = Cli::parse();
    tilestitch::io::logging::init(cli.verbose, cli.quiet);
    let processor = CommandProcessor::new(cli);
    let messages = processor.process()?;
    print_report(&messages);
    Ok(())
}
