use std::process::ExitCode;

use clap::Parser;
use uisync_setup::{CheckCli, PrintMessage};

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    let cli = CheckCli::parse();
    uisync_log::init(cli.layout.verbose);

    cli.run(&mut PrintMessage::stdout())
}
