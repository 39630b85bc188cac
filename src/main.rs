//! CLI entry point for the Wang tile generator

use clap::Parser;
use wangtiles::io::cli::{Cli, FrontEnd};

fn main() -> wangtiles::Result<()> {
    let front_end = FrontEnd::new(Cli::parse());
    env_logger::Builder::new()
        .filter_level(front_end.log_filter())
        .parse_default_env()
        .init();
    front_end.process()
}
