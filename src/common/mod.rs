//! Common functionality shared across the worker's components.

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

pub mod io;

/// Commonly used command line arguments, flattened into every subcommand.
#[derive(Parser, Debug, Clone)]
pub struct Args {
    /// Verbosity of the program.
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            verbose: Verbosity::new(0, 0),
        }
    }
}

/// Definition of the canonical mouse chromosome names, in processing order.
///
/// 19 autosomes plus X, Y, MT -- 22 entries total.
pub const CHROMS: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "X", "Y", "MT",
];

/// Helper to print the current memory resident set size via `tracing`.
///
/// Called once per chromosome boundary so the memory bound documented for
/// the SNP stream (dominated by the largest chromosome's record count) is
/// directly observable in the logs of a production run.
pub fn trace_rss_now() {
    match procfs::process::Process::myself() {
        Ok(me) => {
            let page_size = procfs::page_size();
            match me.stat() {
                Ok(stat) => {
                    let bytes = (stat.rss as u64).saturating_mul(page_size);
                    tracing::debug!(
                        "RSS now: {}",
                        byte_unit::Byte::from_u64(bytes).get_appropriate_unit(byte_unit::UnitType::Binary)
                    );
                }
                Err(e) => tracing::trace!("could not read process stat: {}", e),
            }
        }
        Err(e) => tracing::trace!("could not open /proc/self: {}", e),
    }
}

/// The version of the `snpmrk-worker` crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
