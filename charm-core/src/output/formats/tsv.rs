use std::io::Write;

use crate::{results::HarmonizationResult, types::CharmError};

const HEADER: &str = "position\toriginal\treplacement\tamino_acid\torigin_usage\ttarget_usage\tinitial_diff\tfinal_diff\treason";

/// Write one row per codon
pub fn write_tsv_format<W: Write>(
    writer: &mut W,
    result: &HarmonizationResult,
) -> Result<(), CharmError> {
    writeln!(writer, "{}", HEADER)?;
    for record in &result.codons {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{:.4}\t{:.4}\t{:.4}\t{:.4}\t{}",
            record.position,
            record.original,
            record.replacement(),
            record.amino_acid,
            record.origin_usage(),
            record.target_usage(),
            record.initial_diff(),
            record.final_diff(),
            record.reason()
        )?;
    }
    Ok(())
}
