use clap::Parser;
use log::LevelFilter;

mod audio;
mod clock;
mod config;
mod engine;
mod runtime;
mod ui;

fn main() -> anyhow::Result<()> {
    let mut logger = colog::default_builder();
    logger.filter(None, LevelFilter::Warn);
    logger.parse_default_env();
    logger.init();
    runtime::install_panic_hook();

    let cli = runtime::Cli::parse();
    runtime::run(cli)
}
