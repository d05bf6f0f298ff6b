use crate::{
    cli::CleanArgs,
    core::{engine::ConsistencyEngine, report::ProcessingReport},
    io::{
        fasta_reader::load_reference,
        readers::{open_vcf_input, LineReader},
        vcf_writer::VcfWriter,
    },
    utils::util::Result,
};


pub fn clean(args: CleanArgs) -> Result<ProcessingReport> {
    args.validate()?;

    let reference = load_reference(&args.reference)?;
    log::info!(
        "Loaded reference sequence {} ({} bp) from {}",
        reference.name(),
        reference.len(),
        args.reference.display()
    );

    let input = open_vcf_input(args.vcf.as_deref())?;
    let mut writer = VcfWriter::new(args.output_type, args.output.as_deref())?;

    let engine = ConsistencyEngine::new(&reference, args.policy);
    log::debug!("Correction policy: {:?}", engine.policy());
    let mut output = engine.process(LineReader::new(input));
    for line in output.by_ref() {
        writer.write_line(&line?)?;
    }
    let report = output.into_report();
    writer.finish()?;

    if args.write_index {
        VcfWriter::build_output_index(args.output_type, args.output.as_deref())?;
    }

    log::info!("{}", report);
    Ok(report)
}
