use crate::cli;
use crate::plot;

pub fn cmd(args: cli::Arguments) -> Result<(), anyhow::Error> {
    match args.cmd {
        cli::SubCommand::Plot(options) => plot::plot(&options),
    }
}
