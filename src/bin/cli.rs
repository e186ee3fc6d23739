// src/bin/cli.rs
use color_eyre::eyre::eyre;
use trade_aggregator::cli::{self, CliAction};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    match cli::parse_args(std::env::args().skip(1)).map_err(|e| eyre!("{e}"))? {
        CliAction::Help => {
            eprintln!("{}", cli::HELP);
            Ok(())
        }
        CliAction::Run(opts) => cli::run(&opts).map_err(|e| eyre!("{e}")),
    }
}
