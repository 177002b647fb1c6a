//! CLI entry point for the cyclic dungeon generator

use clap::Parser;
use cyclegrid::io::cli::{Cli, DungeonProcessor};

fn main() -> cyclegrid::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut processor = DungeonProcessor::new(cli);
    processor.process()
}
