use std::collections::HashSet;

use serde::Serialize;

use crate::record::CodonRecord;

/// Outcome of harmonizing one coding sequence.
///
/// # Fields
///
/// - `sequence_info`: identifiers and size of the input sequence
/// - `codons`: every codon with its substitution, in sequence order
/// - `harmonized_sequence`: the rewritten nucleotide sequence
/// - `original_protein` / `harmonized_protein`: translations used to verify
///   the result
///
/// # Examples
///
/// ```rust,no_run
/// use charm_core::Harmonizer;
/// use charm_core::config::{HarmonizationConfig, OutputFormat, UsageUnit};
/// use charm_core::output::write_results;
/// use charm_core::usage::UsageProfile;
///
/// let origin = UsageProfile::from_kazusa("E. coli", &std::fs::read_to_string("ecoli.txt")?, UsageUnit::Fraction)?;
/// let host = UsageProfile::from_kazusa("B. subtilis", &std::fs::read_to_string("bsub.txt")?, UsageUnit::Fraction)?;
/// let harmonizer = Harmonizer::new(HarmonizationConfig::default(), origin, host)?;
///
/// let result = harmonizer.harmonize("ATGCTTAAATAA", None)?;
/// let summary = result.summary();
/// println!("{}: {} of {} codons changed", result.sequence_info.header, summary.changed_codons, summary.total_codons);
///
/// let mut output = std::fs::File::create("harmonized.tsv")?;
/// write_results(&mut output, &result, OutputFormat::Tsv)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct HarmonizationResult {
    pub sequence_info: SequenceInfo,

    /// Resolved codon records in position order.
    pub codons: Vec<CodonRecord>,

    /// Concatenated replacement codons, same length as the input.
    pub harmonized_sequence: String,

    /// Translation of the input under the origin genetic code.
    pub original_protein: String,

    /// Translation of the harmonized sequence under the host genetic code.
    pub harmonized_protein: String,

    /// The strict coding-sequence translation failed and the
    /// read-to-first-stop fallback was used.
    pub translation_recovered: bool,

    /// Result of the equivalence check. Always `true` for a returned result.
    pub verified: bool,
}

/// Information about a harmonized sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceInfo {
    /// Sequence identifier, the first word of a FASTA header.
    pub header: String,

    /// Rest of the FASTA header line.
    pub description: Option<String>,

    /// Length in nucleotides after normalization.
    pub length: usize,

    pub num_codons: usize,
}

/// Aggregate statistics over the codons of a [`HarmonizationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HarmonizationSummary {
    pub total_codons: usize,
    /// Number of distinct original triplets
    pub distinct_codons: usize,
    pub changed_codons: usize,
    pub mean_initial_diff: f64,
    pub mean_final_diff: f64,
}

impl HarmonizationResult {
    /// Records whose replacement differs from the original codon.
    pub fn changed_codons(&self) -> impl Iterator<Item = &CodonRecord> + '_ {
        self.codons.iter().filter(|record| record.is_changed())
    }

    #[must_use]
    pub fn summary(&self) -> HarmonizationSummary {
        let total_codons = self.codons.len();
        let distinct_codons = self
            .codons
            .iter()
            .map(|record| record.original)
            .collect::<HashSet<_>>()
            .len();
        let mean = |values: f64| {
            if total_codons == 0 {
                0.0
            } else {
                values / total_codons as f64
            }
        };

        HarmonizationSummary {
            total_codons,
            distinct_codons,
            changed_codons: self.changed_codons().count(),
            mean_initial_diff: mean(self.codons.iter().map(CodonRecord::initial_diff).sum()),
            mean_final_diff: mean(self.codons.iter().map(CodonRecord::final_diff).sum()),
        }
    }
}
