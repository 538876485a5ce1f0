//! snpmrk-worker: builds the SNP-to-marker proximity association table for
//! a mouse genome release.

pub mod classify;
pub mod common;
pub mod config;
pub mod err;
pub mod join;
pub mod marker;
pub mod output;
pub mod overlay;
pub mod pipeline;
pub mod snp;
pub mod vocab;

use clap::Parser;
use console::Term;

use config::Config;

fn main() -> Result<(), anyhow::Error> {
    let mut config = Config::parse();

    let collector = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(match config.common.verbose.log_level() {
            Some(level) => match level {
                log::Level::Error => tracing::Level::ERROR,
                log::Level::Warn => tracing::Level::WARN,
                log::Level::Info => tracing::Level::INFO,
                log::Level::Debug => tracing::Level::DEBUG,
                log::Level::Trace => tracing::Level::TRACE,
            },
            None => tracing::Level::INFO,
        })
        .compact()
        .finish();

    let term = Term::stderr();
    tracing::subscriber::with_default(collector, || {
        config.resolve_paths()?;
        pipeline::run(&config)?;
        Ok::<(), anyhow::Error>(())
    })?;
    term.write_line("All done.")?;

    Ok(())
}
