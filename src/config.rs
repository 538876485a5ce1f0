//! Typed configuration surface: one `clap::Parser` struct binding every
//! recognized option to a `--kebab-case` flag with an environment-variable
//! fallback, matching the teacher's CLI/config idiom.

use std::path::PathBuf;

use clap::Parser;

use crate::common::CHROMS;
use crate::err::AppError;

/// Default padding window, in bp, applied on both sides of a marker interval.
pub const DEFAULT_PAD: i64 = 2000;

#[derive(Parser, Debug, Clone)]
#[command(name = "snpmrk-worker", about = "Build the SNP-to-marker proximity association table")]
pub struct Config {
    /// Half-width of the proximity window, in bp.
    #[clap(long, env = "PAD", default_value_t = DEFAULT_PAD)]
    pub pad: i64,

    /// Directory holding per-chromosome overlay TSVs.
    #[clap(long, env = "OVERLAY_DIR")]
    pub overlay_dir: PathBuf,

    /// Filename prefix for overlay TSVs (suffix is `.<chr>.tsv`).
    #[clap(long, env = "OVERLAY_PREFIX", default_value = "snpoverlay")]
    pub overlay_prefix: String,

    /// Directory to write per-chromosome output files into.
    #[clap(long, env = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Filename prefix for output files (suffix is `.<chr>`).
    #[clap(long, env = "OUTPUT_PREFIX", default_value = "snpmrkwithin")]
    pub output_prefix: String,

    /// Comma-separated ordered list of chromosome labels to process.
    /// Empty/unset defaults to the full 22-entry mouse chromosome list.
    #[clap(long, env = "CHROMOSOMES", default_value = "")]
    pub chromosomes: String,

    /// Path to the flattened vocabulary TSV.
    #[clap(long, env = "VOCAB_FILE")]
    pub vocab_file: PathBuf,

    /// Directory holding per-chromosome flattened SNP-coordinate TSVs.
    #[clap(long, env = "SNP_DIR")]
    pub snp_dir: PathBuf,

    /// Filename prefix for SNP-coordinate TSVs (suffix is `.<chr>.tsv`).
    #[clap(long, env = "SNP_PREFIX", default_value = "snpcoord")]
    pub snp_prefix: String,

    /// Directory holding per-chromosome flattened marker-location TSVs.
    #[clap(long, env = "MARKER_DIR")]
    pub marker_dir: PathBuf,

    /// Filename prefix for marker-location TSVs (suffix is `.<chr>.tsv`).
    #[clap(long, env = "MARKER_PREFIX", default_value = "mrklocation")]
    pub marker_prefix: String,

    /// Process chromosomes concurrently using the two-pass pk-rebase strategy
    /// instead of the sequential default.
    #[clap(long, env = "PARALLEL")]
    pub parallel: bool,

    #[clap(flatten)]
    pub common: crate::common::Args,
}

impl Config {
    /// The ordered chromosome list to process, resolving the default when
    /// `chromosomes` is empty.
    pub fn chromosome_list(&self) -> Vec<String> {
        let trimmed = self.chromosomes.trim();
        if trimmed.is_empty() {
            CHROMS.iter().map(|s| s.to_string()).collect()
        } else {
            trimmed.split(',').map(|s| s.trim().to_string()).collect()
        }
    }

    /// Expand `~` in every path-like field and validate that the output
    /// directory exists or can be created.
    pub fn resolve_paths(&mut self) -> Result<(), AppError> {
        self.overlay_dir = expand(&self.overlay_dir);
        self.output_dir = expand(&self.output_dir);
        self.vocab_file = expand(&self.vocab_file);
        self.snp_dir = expand(&self.snp_dir);
        self.marker_dir = expand(&self.marker_dir);

        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            AppError::Config(format!(
                "cannot create output directory {:?}: {}",
                self.output_dir, e
            ))
        })?;

        if !self.vocab_file.is_file() {
            return Err(AppError::Config(format!(
                "vocabulary file {:?} does not exist",
                self.vocab_file
            )));
        }

        Ok(())
    }

    /// Path to the overlay TSV for one chromosome.
    pub fn overlay_path(&self, chrom: &str) -> PathBuf {
        self.overlay_dir.join(format!("{}.{}.tsv", self.overlay_prefix, chrom))
    }

    /// Path to the flattened SNP-coordinate TSV for one chromosome.
    pub fn snp_path(&self, chrom: &str) -> PathBuf {
        self.snp_dir.join(format!("{}.{}.tsv", self.snp_prefix, chrom))
    }

    /// Path to the flattened marker-location TSV for one chromosome.
    pub fn marker_path(&self, chrom: &str) -> PathBuf {
        self.marker_dir.join(format!("{}.{}.tsv", self.marker_prefix, chrom))
    }

    /// Path to the output file for one chromosome.
    pub fn output_path(&self, chrom: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", self.output_prefix, chrom))
    }
}

fn expand(path: &std::path::Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
