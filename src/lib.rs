pub mod cli;
pub mod commands;
pub mod error;

pub mod core {
    pub mod dna;
    pub mod engine;
    pub mod record;
    pub mod reference;
    pub mod report;
}

pub mod io {
    pub mod fasta_reader;
    pub mod readers;
    pub mod vcf_writer;
}

pub mod utils {
    pub mod util;
}

pub mod constants;

pub use constants::*;
