use crate::{
    constants::*,
    core::engine::CorrectionPolicy,
    io::vcf_writer::{OutputType, VcfWriter},
};
use anyhow::anyhow;
use chrono::Datelike;
use clap::{ArgAction, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

/// Full version string including the crate version and git description.
///
/// # Examples
/// * `0.1.0-1ba958a-dirty` - while on a dirty branch
/// * `0.1.0-1ba958a` - with a fresh commit
pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    let git_describe = env!("VERGEN_GIT_DESCRIBE");
    if git_describe.is_empty() {
        env!("CARGO_PKG_VERSION").to_string()
    } else {
        format!("{}-{}", env!("CARGO_PKG_VERSION"), git_describe)
    }
});

#[derive(Parser, Debug)]
#[command(name="vcfclean",
          author="Tom Mokveld <tmokveld@pacificbiosciences.com>",
          version=&**FULL_VERSION,
          about="VCF reference allele checker and strand-flip corrector",
          long_about = None,
          after_help = format!("Copyright (C) 2004-{}     Pacific Biosciences of California, Inc.
          This program comes with ABSOLUTELY NO WARRANTY; it is intended for
          Research Use Only and not for use in diagnostic procedures.", chrono::Utc::now().year()),
          help_template = "{name} {version}\n{author}{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true
    )]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Clean(CleanArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Clean(_) => "clean",
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(arg_required_else_help(true))]
pub struct CleanArgs {
    /// FASTA file holding exactly one reference sequence (may be gzipped)
    #[arg(
        short = 'r',
        long = "reference",
        value_name = "FASTA",
        value_parser = check_file_exists
    )]
    pub reference: PathBuf,

    /// VCF file to check [default: standard input]
    #[arg(long = "vcf", value_name = "VCF", value_parser = check_file_exists)]
    pub vcf: Option<PathBuf>,

    /// Write output to a file [default: standard output]
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        value_parser = check_prefix_path
    )]
    pub output: Option<String>,

    /// How to handle records whose REF does not match the reference
    #[arg(long = "policy", value_name = "POLICY", value_enum, default_value_t = DEFAULT_POLICY)]
    pub policy: CorrectionPolicy,

    /// Output type: v|z, v: uncompressed VCF, z: BGZF-compressed VCF
    #[arg(
        short = 'O',
        long = "output-type",
        value_name = "OUTPUT_TYPE",
        value_parser = clean_validate_output_type,
        help_heading = "Advanced"
    )]
    pub output_type: Option<OutputType>,

    /// Build a tabix index for BGZF-compressed file output
    #[arg(
        long = "write-index",
        help_heading = "Advanced",
        default_value_t = DEFAULT_WRITE_INDEX
    )]
    pub write_index: bool,
}

impl CleanArgs {
    pub fn validate(&self) -> crate::utils::util::Result<()> {
        if self.write_index
            && VcfWriter::output_index_spec_for_target(self.output_type, self.output.as_deref())
                .is_none()
        {
            return Err(crate::vcfclean_error!(
                "--write-index requires BGZF-compressed file output (-o FILE.vcf.gz or -O z)"
            ));
        }
        Ok(())
    }
}

/// Initializes the verbosity level for logging based on the command-line arguments.
///
/// # Arguments
///
/// * `args` - A reference to the parsed command-line arguments.
pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.module_path().unwrap_or("unknown_module"),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

/// Checks if the provided file path exists.
///
/// # Arguments
///
/// * `s` - A string slice representing the file path to check.
///
/// # Returns
///
/// Returns a `Result<PathBuf>` which is Ok if the file exists, or an Err with a descriptive message if not.
fn check_file_exists(s: &str) -> anyhow::Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        return Err(anyhow!("File does not exist: {}", path.display()));
    }
    Ok(path.to_path_buf())
}

fn check_prefix_path(s: &str) -> anyhow::Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(anyhow!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(s.to_string())
}

fn clean_validate_output_type(s: &str) -> anyhow::Result<OutputType> {
    match s {
        "v" => Ok(OutputType::Vcf),
        "z" => Ok(OutputType::BgzfVcf),
        _ => Err(anyhow!("Invalid output type: {}. Must be one of v, z.", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn parse_clean_args(args: &[&str]) -> CleanArgs {
        let parsed = Cli::try_parse_from(args).expect("CLI parse should succeed");
        let Command::Clean(args) = parsed.command;
        args
    }

    #[test]
    fn test_clean_defaults() {
        let fasta = NamedTempFile::new().unwrap();
        let fasta_path = fasta.path().to_str().unwrap();
        let args = parse_clean_args(&["vcfclean", "clean", "-r", fasta_path]);
        assert_eq!(args.reference, fasta.path());
        assert!(args.vcf.is_none());
        assert!(args.output.is_none());
        assert!(args.output_type.is_none());
        assert_eq!(args.policy, CorrectionPolicy::FlipThenSkip);
        assert!(!args.write_index);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_clean_policy_and_output_type() {
        let fasta = NamedTempFile::new().unwrap();
        let vcf = NamedTempFile::new().unwrap();
        let args = parse_clean_args(&[
            "vcfclean",
            "clean",
            "--reference",
            fasta.path().to_str().unwrap(),
            "--vcf",
            vcf.path().to_str().unwrap(),
            "--policy",
            "skip-only",
            "-O",
            "z",
        ]);
        assert_eq!(args.policy, CorrectionPolicy::SkipOnly);
        assert_eq!(args.output_type, Some(OutputType::BgzfVcf));
        assert_eq!(args.vcf.as_deref(), Some(vcf.path()));
    }

    #[test]
    fn test_verbosity_is_global() {
        let fasta = NamedTempFile::new().unwrap();
        let parsed = Cli::try_parse_from([
            "vcfclean",
            "clean",
            "-r",
            fasta.path().to_str().unwrap(),
            "-vv",
        ])
        .unwrap();
        assert_eq!(parsed.verbosity, 2);
        assert_eq!(parsed.command.name(), "clean");
    }

    #[test]
    fn test_missing_reference_is_rejected() {
        assert!(Cli::try_parse_from(["vcfclean", "clean", "-r", "/nonexistent/ref.fa"]).is_err());
        assert!(Cli::try_parse_from(["vcfclean", "clean", "--vcf", "in.vcf"]).is_err());
    }

    #[test]
    fn test_invalid_policy_and_output_type_are_rejected() {
        let fasta = NamedTempFile::new().unwrap();
        let fasta_path = fasta.path().to_str().unwrap();
        assert!(
            Cli::try_parse_from(["vcfclean", "clean", "-r", fasta_path, "--policy", "flip"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["vcfclean", "clean", "-r", fasta_path, "-O", "b"]).is_err());
    }

    #[test]
    fn test_write_index_requires_bgzf_file_output() {
        let fasta = NamedTempFile::new().unwrap();
        let fasta_path = fasta.path().to_str().unwrap();

        let args = parse_clean_args(&["vcfclean", "clean", "-r", fasta_path, "--write-index"]);
        assert!(args.validate().is_err());

        let args = parse_clean_args(&[
            "vcfclean",
            "clean",
            "-r",
            fasta_path,
            "-o",
            "out.vcf",
            "--write-index",
        ]);
        assert!(args.validate().is_err());

        let args = parse_clean_args(&[
            "vcfclean",
            "clean",
            "-r",
            fasta_path,
            "-o",
            "out.vcf.gz",
            "--write-index",
        ]);
        assert!(args.validate().is_ok());
    }
}
