use std::fs::File;
use std::path::Path;

use bio::io::fasta;

use crate::types::CharmError;

/// Identifier, optional description and raw bases of one FASTA record
pub type FastaRecord = (String, Option<String>, Vec<u8>);

/// Reads every record of a FASTA file using rust-bio.
///
/// Bases are returned as found in the file; normalization happens when a
/// record is harmonized.
pub fn read_fasta_sequences<P: AsRef<Path>>(path: P) -> Result<Vec<FastaRecord>, CharmError> {
    let file = File::open(path)?;
    let reader = fasta::Reader::new(file);

    reader
        .records()
        .map(|result| {
            let record = result.map_err(|e| CharmError::ParseError(e.to_string()))?;
            Ok((
                record.id().to_string(),
                record.desc().map(String::from),
                record.seq().to_vec(),
            ))
        })
        .collect()
}
