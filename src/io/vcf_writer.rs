use crate::utils::util::Result;
use rust_htslib::{bcf, bgzf};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    Vcf,
    BgzfVcf,
}

type OutputIndexSpec = (&'static str, bcf::index::Type);

impl OutputType {
    fn output_index_spec(&self) -> Option<OutputIndexSpec> {
        match self {
            Self::Vcf => None,
            Self::BgzfVcf => Some(("tabix", bcf::index::Type::Tbx)),
        }
    }
}

/// Line-oriented VCF text sink writing to a file or standard output, optionally BGZF compressed.
pub struct VcfWriter {
    writer: BufWriter<Box<dyn Write>>,
    pub output_type: OutputType,
    pub lines_written: u64,
}

impl VcfWriter {
    fn resolve_output_type(output_type: Option<OutputType>, output: Option<&str>) -> OutputType {
        match (output_type, output) {
            (Some(output_type), _) => output_type,
            (None, Some(path)) => Self::infer_output_type_from_extension(path),
            (None, None) => OutputType::Vcf,
        }
    }

    fn infer_output_type_from_extension(path: &str) -> OutputType {
        let path_lower = path.to_lowercase();
        match path_lower.as_str() {
            s if s.ends_with(".vcf.gz") || s.ends_with(".vcf.bgz") => OutputType::BgzfVcf,
            _ => OutputType::Vcf,
        }
    }

    pub fn output_index_spec_for_target(
        output_type: Option<OutputType>,
        output: Option<&str>,
    ) -> Option<OutputIndexSpec> {
        if output.is_none() {
            return None;
        }
        Self::resolve_output_type(output_type, output).output_index_spec()
    }

    pub fn build_output_index(output_type: Option<OutputType>, output: Option<&str>) -> Result<()> {
        let Some(path) = output else {
            return Ok(());
        };
        let Some((index_name, index_type)) =
            Self::output_index_spec_for_target(output_type, output)
        else {
            return Ok(());
        };

        log::debug!("Writer: Building {} index for output {}", index_name, path);
        bcf::index::build(path, None, 1, index_type).map_err(|error| {
            crate::vcfclean_error!(
                "Failed to build {} index for output {}: {}",
                index_name,
                path,
                error
            )
        })?;
        Ok(())
    }

    pub fn new(output_type: Option<OutputType>, output: Option<&str>) -> Result<Self> {
        let output_type = Self::resolve_output_type(output_type, output);
        log::trace!("{:?}", &output_type);

        let inner: Box<dyn Write> = match (output, output_type) {
            (Some(path), OutputType::Vcf) => Box::new(File::create(path).map_err(|e| {
                crate::vcfclean_error!("Failed to create output file {}: {}", path, e)
            })?),
            (Some(path), OutputType::BgzfVcf) => {
                Box::new(bgzf::Writer::from_path(path).map_err(|e| {
                    crate::vcfclean_error!("Failed to create BGZF writer for {}: {}", path, e)
                })?)
            }
            (None, OutputType::Vcf) => Box::new(io::stdout()),
            (None, OutputType::BgzfVcf) => Box::new(bgzf::Writer::from_stdout().map_err(|e| {
                crate::vcfclean_error!("Failed to create BGZF writer for standard output: {}", e)
            })?),
        };

        Ok(VcfWriter {
            writer: BufWriter::new(inner),
            output_type,
            lines_written: 0,
        })
    }

    /// Writes one line verbatim; the line carries its own terminator.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.lines_written += 1;
        Ok(())
    }

    /// Flushes buffered output and closes the underlying stream.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        log::trace!("Writer: wrote {} lines", self.lines_written);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::MultiGzDecoder;
    use std::{fs, io::Read};

    fn create_temp_path(ext: &str) -> String {
        let (_, path) = tempfile::Builder::new()
            .prefix("vcfclean_test_vcf_writer_")
            .suffix(&format!(".{ext}"))
            .tempfile()
            .expect("temp file should be creatable")
            .keep()
            .expect("temp file should be persistable");
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn output_type_is_inferred_from_extension() {
        assert_eq!(
            VcfWriter::resolve_output_type(None, Some("out.vcf.gz")),
            OutputType::BgzfVcf
        );
        assert_eq!(
            VcfWriter::resolve_output_type(None, Some("OUT.VCF.BGZ")),
            OutputType::BgzfVcf
        );
        assert_eq!(
            VcfWriter::resolve_output_type(None, Some("out.vcf")),
            OutputType::Vcf
        );
        assert_eq!(VcfWriter::resolve_output_type(None, None), OutputType::Vcf);
        assert_eq!(
            VcfWriter::resolve_output_type(Some(OutputType::Vcf), Some("out.vcf.gz")),
            OutputType::Vcf
        );
    }

    #[test]
    fn output_index_spec_is_generated_for_compressed_file_output() {
        let index_spec = VcfWriter::output_index_spec_for_target(None, Some("out.vcf.gz"));
        assert!(matches!(index_spec, Some(("tabix", bcf::index::Type::Tbx))));
    }

    #[test]
    fn output_index_spec_is_none_for_uncompressed_or_stdout_output() {
        assert!(VcfWriter::output_index_spec_for_target(None, Some("out.vcf")).is_none());
        assert!(VcfWriter::output_index_spec_for_target(None, None).is_none());
        assert!(VcfWriter::output_index_spec_for_target(Some(OutputType::BgzfVcf), None).is_none());
    }

    #[test]
    fn uncompressed_writer_writes_lines_verbatim() -> Result<()> {
        let out_path = create_temp_path("vcf");
        let mut writer = VcfWriter::new(None, Some(out_path.as_str()))?;
        writer.write_line("##fileformat=VCFv4.2\n")?;
        writer.write_line("chr1\t1\t.\tA\tC\r\n")?;
        assert_eq!(writer.lines_written, 2);
        writer.finish()?;

        assert_eq!(
            fs::read_to_string(&out_path)?,
            "##fileformat=VCFv4.2\nchr1\t1\t.\tA\tC\r\n"
        );
        fs::remove_file(out_path)?;
        Ok(())
    }

    #[test]
    fn bgzf_writer_output_decompresses_to_same_text() -> Result<()> {
        let out_path = create_temp_path("vcf.gz");
        let mut writer = VcfWriter::new(None, Some(out_path.as_str()))?;
        assert_eq!(writer.output_type, OutputType::BgzfVcf);
        writer.write_line("##fileformat=VCFv4.2\n")?;
        writer.write_line("chr1\t1\t.\tA\tC\n")?;
        writer.finish()?;

        let mut contents = String::new();
        MultiGzDecoder::new(File::open(&out_path)?).read_to_string(&mut contents)?;
        assert_eq!(contents, "##fileformat=VCFv4.2\nchr1\t1\t.\tA\tC\n");
        fs::remove_file(out_path)?;
        Ok(())
    }
}
