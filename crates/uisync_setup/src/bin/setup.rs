use std::process::ExitCode;

use clap::Parser;
use uisync_setup::{PrintMessage, SetupCli};

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    let cli = SetupCli::parse();
    uisync_log::init(cli.layout.verbose);

    cli.run(&mut PrintMessage::stdout())
}
