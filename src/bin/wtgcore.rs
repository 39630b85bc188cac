//! Synthesis engine executable speaking the raw buffer protocol
//!
//! Exits with status 0 after writing every output buffer and 1 on any
//! failure, printing usage when the command line does not parse.

use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use wangtiles::WangError;
use wangtiles::engine::SynthesisEngine;
use wangtiles::engine::invocation::WireArgs;
use wangtiles::engine::native::NativeEngine;
use wangtiles::io::configuration::ENGINE_FAILURE_EXIT_CODE;
use wangtiles::synthesis::SynthesisConfig;

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let wire = match WireArgs::try_parse() {
        Ok(wire) => wire,
        Err(e) => {
            if let Err(print_error) = e.print() {
                log::error!("failed to print usage: {print_error}");
            }
            return if e.use_stderr() {
                ExitCode::from(ENGINE_FAILURE_EXIT_CODE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let invocation = match wire.into_invocation() {
        Ok(invocation) => invocation,
        Err(e) => {
            report(&e);
            return ExitCode::from(ENGINE_FAILURE_EXIT_CODE);
        }
    };

    let engine = NativeEngine::new(SynthesisConfig {
        show_progress: std::io::stderr().is_terminal(),
        ..SynthesisConfig::default()
    });

    match engine.run(&invocation) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::from(ENGINE_FAILURE_EXIT_CODE)
        }
    }
}

fn report(error: &WangError) {
    log::error!("{error}");
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        log::error!("caused by: {cause}");
        source = cause.source();
    }
}
