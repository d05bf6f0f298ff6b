use crate::{error::VcfCleanError, utils::util::Result};
use flate2::read::MultiGzDecoder;
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read as ioRead},
    path::Path,
};

pub type TextReader = BufReader<Box<dyn ioRead>>;

fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".gzip") || path_str.ends_with(".bgz")
}

/// Opens a plain or gzip/bgzip compressed text file, chosen by extension.
pub fn open_text_reader(path: &Path) -> Result<TextReader> {
    let file = File::open(path).map_err(|error| {
        crate::vcfclean_error!("Failed to open file {}: {error}", path.display())
    })?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(VcfCleanError::InvalidGzipHeader {
                path: path.to_path_buf(),
            })
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

/// Opens the VCF input, falling back to standard input when no path is given.
pub fn open_vcf_input(path: Option<&Path>) -> Result<TextReader> {
    match path {
        Some(path) => open_text_reader(path),
        None => {
            log::debug!("Reading VCF from standard input");
            Ok(BufReader::new(Box::new(io::stdin())))
        }
    }
}

/// Iterates over the lines of a reader, keeping each line's terminator.
pub struct LineReader<R> {
    reader: R,
    line_number: u64,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                Some(Ok(line))
            }
            Err(source) => Some(Err(VcfCleanError::LineRead {
                line: self.line_number + 1,
                source,
            })),
        }
    }
}
