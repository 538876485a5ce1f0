//! Pipeline orchestration: drives the per-chromosome control flow, either
//! sequentially (the default) or with the two-pass parallel pk-rebase
//! strategy grounded in the teacher's `rayon`-based per-file parallelism.

use itertools::Itertools;
use rayon::prelude::*;

use crate::common::io::open_write;
use crate::common::trace_rss_now;
use crate::config::Config;
use crate::err::AppError;
use crate::join::join_chromosome;
use crate::marker::{MarkerLocationSource, TsvMarkerSource};
use crate::output::{write_row, PkGenerator};
use crate::overlay::Overlay;
use crate::snp::{SnpCoordinateSource, TsvSnpSource};
use crate::vocab::Vocabulary;

/// Run the full pipeline: load the vocabulary once, then process every
/// configured chromosome either sequentially or in parallel.
pub fn run(config: &Config) -> Result<(), AppError> {
    let vocab = Vocabulary::load(&config.vocab_file)?;
    let chromosomes = config.chromosome_list();

    if config.parallel {
        run_parallel(config, &vocab, &chromosomes)
    } else {
        run_sequential(config, &vocab, &chromosomes)
    }
}

fn run_sequential(config: &Config, vocab: &Vocabulary, chromosomes: &[String]) -> Result<(), AppError> {
    let snp_source = TsvSnpSource::new(&config.snp_dir, &config.snp_prefix);
    let marker_source = TsvMarkerSource::new(&config.marker_dir, &config.marker_prefix);

    let mut pks = PkGenerator::starting_at(1);
    for chrom in chromosomes {
        let started = std::time::Instant::now();
        let row_count = process_chromosome(config, vocab, &snp_source, &marker_source, chrom, &mut pks)?;
        tracing::info!(
            "chromosome {} done: {} rows in {:.2}s",
            chrom,
            row_count,
            started.elapsed().as_secs_f64()
        );
        trace_rss_now();
    }

    Ok(())
}

fn process_chromosome(
    config: &Config,
    vocab: &Vocabulary,
    snp_source: &TsvSnpSource,
    marker_source: &TsvMarkerSource,
    chrom: &str,
    pks: &mut PkGenerator,
) -> Result<usize, AppError> {
    let overlay = Overlay::load(config.overlay_path(chrom))?;
    tracing::debug!("chromosome {}: overlay has {} pairs", chrom, overlay.len());

    let snps = snp_source.snps(chrom)?;
    let markers = marker_source.markers(chrom)?;
    tracing::debug!(
        "chromosome {}: {} snps, {} markers",
        chrom,
        snps.len(),
        markers.len()
    );

    let output_path = config.output_path(chrom);
    let mut out = open_write(&output_path).map_err(|e| AppError::Io {
        path: output_path.clone(),
        source: e,
    })?;

    let mut row_count = 0usize;
    let mut io_err = None;
    join_chromosome(chrom, &snps, &markers, config.pad, &overlay, vocab, |assoc| {
        if io_err.is_some() {
            return;
        }
        if let Err(e) = write_row(&mut out, pks, &assoc) {
            io_err = Some(e);
        } else {
            row_count += 1;
        }
    });

    if let Some(e) = io_err {
        return Err(AppError::Io {
            path: output_path,
            source: e,
        });
    }

    Ok(row_count)
}

/// Count the rows that `chrom` would produce, without writing or
/// allocating any pk.
fn count_chromosome(
    config: &Config,
    vocab: &Vocabulary,
    snp_source: &TsvSnpSource,
    marker_source: &TsvMarkerSource,
    chrom: &str,
) -> Result<usize, AppError> {
    let overlay = Overlay::load(config.overlay_path(chrom))?;
    let snps = snp_source.snps(chrom)?;
    let markers = marker_source.markers(chrom)?;

    let mut row_count = 0usize;
    join_chromosome(chrom, &snps, &markers, config.pad, &overlay, vocab, |_| {
        row_count += 1;
    });

    Ok(row_count)
}

fn run_parallel(config: &Config, vocab: &Vocabulary, chromosomes: &[String]) -> Result<(), AppError> {
    let snp_source = TsvSnpSource::new(&config.snp_dir, &config.snp_prefix);
    let marker_source = TsvMarkerSource::new(&config.marker_dir, &config.marker_prefix);

    tracing::info!("counting rows per chromosome ({} chromosomes)", chromosomes.len());
    let counts: Vec<usize> = chromosomes
        .par_iter()
        .map(|chrom| count_chromosome(config, vocab, &snp_source, &marker_source, chrom))
        .collect::<Result<Vec<_>, _>>()?;

    // Running starting pk per chromosome: chromosome i starts where the
    // cumulative row count of chromosomes before it leaves off.
    let starts: Vec<i64> = counts
        .iter()
        .scan(1i64, |next_pk, count| {
            let start = *next_pk;
            *next_pk += *count as i64;
            Some(start)
        })
        .collect();

    let total_rows: i64 = counts.iter().map(|c| *c as i64).sum1().unwrap_or(0);
    tracing::info!(
        "pk ranges computed, {} total rows across {} chromosomes",
        thousands::Separable::separate_with_commas(total_rows as isize),
        chromosomes.len()
    );

    chromosomes
        .par_iter()
        .zip(starts.par_iter())
        .try_for_each(|(chrom, &start)| -> Result<(), AppError> {
            let mut pks = PkGenerator::starting_at(start);
            let row_count = process_chromosome(config, vocab, &snp_source, &marker_source, chrom, &mut pks)?;
            tracing::info!("chromosome {} done: {} rows (parallel)", chrom, row_count);
            Ok(())
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_vocab(dir: &temp_testdir::TempDir) -> PathBuf {
        let path = dir.join("vocab.tsv");
        std::fs::write(
            &path,
            "term\tterm_key\tvocab_name\nwithin coordinates of\t100\tSNP Function Class\nwithin distance of\t101\tSNP Function Class\n",
        )
        .unwrap();
        path
    }

    fn write_snp_file(dir: &std::path::Path, prefix: &str, chrom: &str, rows: &[(i64, i64, &str, i64)]) {
        let mut contents = String::from("snp_key\tcoord_cache_key\taccession\tchromosome\tcoordinate\n");
        for (snp_key, cc_key, acc, coord) in rows {
            contents.push_str(&format!("{}\t{}\t{}\t{}\t{}\n", snp_key, cc_key, acc, chrom, coord));
        }
        std::fs::write(dir.join(format!("{}.{}.tsv", prefix, chrom)), contents).unwrap();
    }

    fn write_marker_file(dir: &std::path::Path, prefix: &str, chrom: &str, rows: &[(i64, &str, i64, i64, &str)]) {
        let mut contents = String::from("marker_key\taccession\tchromosome\tstart\tend\tstrand\n");
        for (key, acc, start, end, strand) in rows {
            contents.push_str(&format!("{}\t{}\t{}\t{}\t{}\t{}\n", key, acc, chrom, start, end, strand));
        }
        std::fs::write(dir.join(format!("{}.{}.tsv", prefix, chrom)), contents).unwrap();
    }

    fn base_config(dir: &temp_testdir::TempDir) -> Config {
        let snp_dir = dir.join("snp");
        let marker_dir = dir.join("marker");
        let overlay_dir = dir.join("overlay");
        let output_dir = dir.join("out");
        std::fs::create_dir_all(&snp_dir).unwrap();
        std::fs::create_dir_all(&marker_dir).unwrap();
        std::fs::create_dir_all(&overlay_dir).unwrap();
        std::fs::create_dir_all(&output_dir).unwrap();

        Config {
            pad: 2000,
            overlay_dir,
            overlay_prefix: "snpoverlay".into(),
            output_dir,
            output_prefix: "snpmrkwithin".into(),
            chromosomes: "1,2".into(),
            vocab_file: write_vocab(dir),
            snp_dir,
            snp_prefix: "snpcoord".into(),
            marker_dir,
            marker_prefix: "mrklocation".into(),
            parallel: false,
            common: crate::common::Args::default(),
        }
    }

    #[test]
    fn sequential_run_allocates_pks_across_chromosomes_in_order() {
        let dir = temp_testdir::TempDir::default();
        let config = base_config(&dir);

        write_snp_file(&config.snp_dir, &config.snp_prefix, "1", &[(1, 100, "rs1", 1500)]);
        write_marker_file(&config.marker_dir, &config.marker_prefix, "1", &[(10, "MGI:10", 1000, 2000, "+")]);
        write_snp_file(&config.snp_dir, &config.snp_prefix, "2", &[(2, 200, "rs2", 1500)]);
        write_marker_file(&config.marker_dir, &config.marker_prefix, "2", &[(20, "MGI:20", 1000, 2000, "+")]);

        run(&config).unwrap();

        let chr1 = std::fs::read_to_string(config.output_path("1")).unwrap();
        let chr2 = std::fs::read_to_string(config.output_path("2")).unwrap();
        pretty_assertions::assert_eq!("1|1|10|100|100|||||0|not applicable|\n", chr1);
        pretty_assertions::assert_eq!("2|2|20|100|200|||||0|not applicable|\n", chr2);
    }

    #[test]
    fn sequential_and_parallel_modes_produce_the_same_output() {
        let dir_seq = temp_testdir::TempDir::default();
        let config_seq = base_config(&dir_seq);
        write_snp_file(&config_seq.snp_dir, &config_seq.snp_prefix, "1", &[(1, 100, "rs1", 1500), (2, 200, "rs2", 990)]);
        write_marker_file(&config_seq.marker_dir, &config_seq.marker_prefix, "1", &[(10, "MGI:10", 1000, 2000, "+")]);
        write_snp_file(&config_seq.snp_dir, &config_seq.snp_prefix, "2", &[(3, 300, "rs3", 1500)]);
        write_marker_file(&config_seq.marker_dir, &config_seq.marker_prefix, "2", &[(20, "MGI:20", 1000, 2000, "+")]);
        run(&config_seq).unwrap();
        let seq_chr1 = std::fs::read_to_string(config_seq.output_path("1")).unwrap();
        let seq_chr2 = std::fs::read_to_string(config_seq.output_path("2")).unwrap();

        let dir_par = temp_testdir::TempDir::default();
        let mut config_par = base_config(&dir_par);
        config_par.parallel = true;
        write_snp_file(&config_par.snp_dir, &config_par.snp_prefix, "1", &[(1, 100, "rs1", 1500), (2, 200, "rs2", 990)]);
        write_marker_file(&config_par.marker_dir, &config_par.marker_prefix, "1", &[(10, "MGI:10", 1000, 2000, "+")]);
        write_snp_file(&config_par.snp_dir, &config_par.snp_prefix, "2", &[(3, 300, "rs3", 1500)]);
        write_marker_file(&config_par.marker_dir, &config_par.marker_prefix, "2", &[(20, "MGI:20", 1000, 2000, "+")]);
        run(&config_par).unwrap();
        let par_chr1 = std::fs::read_to_string(config_par.output_path("1")).unwrap();
        let par_chr2 = std::fs::read_to_string(config_par.output_path("2")).unwrap();

        assert_eq!(seq_chr1, par_chr1);
        assert_eq!(seq_chr2, par_chr2);
    }

    #[test]
    fn missing_snp_and_marker_files_yield_empty_output() {
        let dir = temp_testdir::TempDir::default();
        let mut config = base_config(&dir);
        config.chromosomes = "1".into();
        run(&config).unwrap();
        let contents = std::fs::read_to_string(config.output_path("1")).unwrap();
        assert!(contents.is_empty());
    }
}
