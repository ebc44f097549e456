//! Translation equivalence between an original and a harmonized sequence.

use log::debug;

use crate::genetic_code::TranslationTable;
use crate::record::CodonRecord;
use crate::sequence::translate_codons;

/// Whether `harmonized` under `host_table` encodes exactly what `original`
/// encodes under `origin_table`, codon by codon, stops included.
///
/// Sequences of different length, or that fail to translate, are not
/// equivalent.
///
/// # Examples
///
/// ```rust
/// use charm_core::genetic_code::GeneticCode;
/// use charm_core::verification::verify_equivalence;
///
/// let standard = GeneticCode::standard();
/// let mito = GeneticCode::from_ncbi_id(2)?;
///
/// assert!(verify_equivalence(b"CTTTAA", &standard, b"CTCTAG", &standard));
/// // TGA is a stop codon in the standard code but tryptophan in table 2
/// assert!(!verify_equivalence(b"TGGTGA", &standard, b"TGGTGA", &mito));
/// # Ok::<(), charm_core::types::CharmError>(())
/// ```
#[must_use]
pub fn verify_equivalence<O, H>(
    original: &[u8],
    origin_table: &O,
    harmonized: &[u8],
    host_table: &H,
) -> bool
where
    O: TranslationTable + ?Sized,
    H: TranslationTable + ?Sized,
{
    if original.len() != harmonized.len() {
        debug!(
            "Length changed during harmonization: {} -> {}",
            original.len(),
            harmonized.len()
        );
        return false;
    }

    match (
        translate_codons(original, origin_table),
        translate_codons(harmonized, host_table),
    ) {
        (Ok(expected), Ok(actual)) => {
            let mismatch = expected
                .iter()
                .zip(&actual)
                .position(|(expected, actual)| expected != actual);
            if let Some(index) = mismatch {
                debug!(
                    "Codon {} translates to {} instead of {}",
                    index + 1,
                    actual[index],
                    expected[index]
                );
            }
            mismatch.is_none()
        }
        _ => false,
    }
}

/// Checks the per-record invariant: every replacement translates under the
/// host table to the amino acid of its original codon.
#[must_use]
pub fn verify_records<H: TranslationTable + ?Sized>(records: &[CodonRecord], host_table: &H) -> bool {
    records
        .iter()
        .all(|record| host_table.translate(record.replacement()) == record.amino_acid)
}
