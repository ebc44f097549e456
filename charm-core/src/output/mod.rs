//! Report writers for harmonization results.
//!
//! ## Supported Formats
//!
//! - **FASTA**: the harmonized sequence as a single record
//! - **TSV**: one row per codon with usage values and the selection reason
//! - **JSON**: the complete [`HarmonizationResult`], codon records included
//!
//! ## Examples
//!
//! ```rust,no_run
//! use charm_core::Harmonizer;
//! use charm_core::config::{HarmonizationConfig, OutputFormat, UsageUnit};
//! use charm_core::output::write_results;
//! use charm_core::usage::UsageProfile;
//! use std::io::stdout;
//!
//! let origin = UsageProfile::from_kazusa("origin", &std::fs::read_to_string("origin.txt")?, UsageUnit::Fraction)?;
//! let host = UsageProfile::from_kazusa("host", &std::fs::read_to_string("host.txt")?, UsageUnit::Fraction)?;
//! let harmonizer = Harmonizer::new(HarmonizationConfig::default(), origin, host)?;
//!
//! for result in harmonizer.harmonize_fasta_file("genes.fasta")? {
//!     write_results(&mut stdout(), &result, OutputFormat::Fasta)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::Write;

use crate::{config::OutputFormat, results::HarmonizationResult, types::CharmError};

mod formats {
    pub mod fasta;
    pub mod json;
    pub mod tsv;
}

use formats::{fasta::write_fasta_format, json::write_json_format, tsv::write_tsv_format};

/// Writes a harmonization result in the specified format.
///
/// # Errors
///
/// Returns [`CharmError`] if writing or serialization fails.
pub fn write_results<W: Write>(
    writer: &mut W,
    result: &HarmonizationResult,
    format: OutputFormat,
) -> Result<(), CharmError> {
    match format {
        OutputFormat::Fasta => write_fasta_format(writer, result),
        OutputFormat::Tsv => write_tsv_format(writer, result),
        OutputFormat::Json => write_json_format(writer, result),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::record::{CodonRecord, PendingCodon, SelectionReason, Substitution};
    use crate::results::{HarmonizationResult, SequenceInfo};
    use crate::types::AminoAcid;

    fn record(
        position: usize,
        original: &str,
        amino_acid: u8,
        replacement: &str,
        usage: (f64, f64, f64, f64),
        reason: SelectionReason,
    ) -> CodonRecord {
        PendingCodon::new(position, original.parse().unwrap(), AminoAcid::new(amino_acid)).resolve(
            Substitution {
                replacement: replacement.parse().unwrap(),
                origin_usage: usage.0,
                target_usage: usage.1,
                initial_diff: usage.2,
                final_diff: usage.3,
                reason,
            },
        )
    }

    pub fn create_test_result() -> HarmonizationResult {
        HarmonizationResult {
            sequence_info: SequenceInfo {
                header: "test_cds".to_string(),
                description: Some("Test sequence".to_string()),
                length: 12,
                num_codons: 4,
            },
            codons: vec![
                record(1, "ATG", b'M', "ATG", (1.0, 1.0, 0.0, 0.0), SelectionReason::Retained),
                record(2, "CTT", b'L', "CTC", (0.9, 0.9, 0.85, 0.0), SelectionReason::Harmonized),
                record(3, "GTT", b'V', "GTT", (0.5, 0.9, 0.4, 0.4), SelectionReason::Retained),
                record(4, "TAA", b'*', "TGA", (0.6, 0.9, 0.5, 0.3), SelectionReason::StrongStop),
            ],
            harmonized_sequence: "ATGCTCGTTTGA".to_string(),
            original_protein: "MLV".to_string(),
            harmonized_protein: "MLV".to_string(),
            translation_recovered: false,
            verified: true,
        }
    }
}
