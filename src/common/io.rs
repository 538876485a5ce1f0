//! Common, IO-related code.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter},
    path::Path,
};

/// Open a plain-text file for buffered reading.
pub fn open_read<P>(path: P) -> std::io::Result<BufReader<File>>
where
    P: AsRef<Path>,
{
    tracing::trace!("opening {:?} for reading", path.as_ref());
    File::open(path).map(BufReader::new)
}

/// Create (truncating) a plain-text file for buffered writing.
pub fn open_write<P>(path: P) -> std::io::Result<BufWriter<File>>
where
    P: AsRef<Path>,
{
    tracing::trace!("opening {:?} for writing", path.as_ref());
    File::create(path).map(BufWriter::new)
}

/// Return an iterator over the lines of a file.
pub fn read_lines<P: AsRef<Path>>(
    filename: P,
) -> std::io::Result<std::io::Lines<std::io::BufReader<File>>> {
    let file = File::open(filename)?;
    Ok(std::io::BufReader::new(file).lines())
}
