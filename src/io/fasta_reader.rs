use super::readers::open_text_reader;
use crate::{core::reference::ReferenceSequence, utils::util::Result};
use std::path::Path;

pub fn load_reference(path: &Path) -> Result<ReferenceSequence> {
    log::trace!("Start loading reference {:?}", path);
    let reader = open_text_reader(path)?;
    let reference = ReferenceSequence::from_fasta_reader(reader)?;
    log::trace!("Finished loading reference {:?}", path);
    Ok(reference)
}
