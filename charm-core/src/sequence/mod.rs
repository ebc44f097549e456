//! Splitting, reassembly and translation of coding sequences.
//!
//! - [`normalize_sequence`] cleans raw input (whitespace, case, RNA bases)
//! - [`split_into_codons`] cuts a sequence into pending codon records
//! - [`reconstruct_sequence`] concatenates resolved replacements
//! - [`translate_with_recovery`] translates a coding sequence, falling back
//!   once to a read-to-first-stop translation

use log::warn;

use crate::constants::CODON_LENGTH;
use crate::genetic_code::TranslationTable;
use crate::record::{CodonRecord, PendingCodon};
use crate::types::{is_dna_base, AminoAcid, CharmError, Codon};

pub mod io;

pub use io::{read_fasta_sequences, FastaRecord};

/// Removes whitespace, uppercases, and maps RNA `U` to `T`.
///
/// # Errors
///
/// Returns [`CharmError::InvalidSequence`] with the 1-based nucleotide
/// position of the first symbol outside A/C/G/T.
pub fn normalize_sequence(raw: &[u8]) -> Result<Vec<u8>, CharmError> {
    let mut sequence = Vec::with_capacity(raw.len());

    for base in raw.iter().filter(|base| !base.is_ascii_whitespace()) {
        let base = match base.to_ascii_uppercase() {
            b'U' => b'T',
            upper => upper,
        };
        if !is_dna_base(base) {
            return Err(CharmError::InvalidSequence {
                position: sequence.len() + 1,
                reason: format!(
                    "unrecognized nucleotide '{}'",
                    char::from(base).escape_default()
                ),
            });
        }
        sequence.push(base);
    }

    Ok(sequence)
}

/// Cuts a nucleotide sequence into ordered codon records.
///
/// Each record carries its 1-based codon position, the triplet, and its
/// translation under `table`.
///
/// # Errors
///
/// - [`CharmError::InvalidSequence`] for an empty sequence or a triplet
///   containing a symbol outside A/C/G/T (position is the nucleotide offset)
/// - [`CharmError::InvalidSequenceLength`] if the length is not a multiple of 3
///
/// # Examples
///
/// ```rust
/// use charm_core::genetic_code::GeneticCode;
/// use charm_core::sequence::split_into_codons;
///
/// let codons = split_into_codons(b"ATGCTTTAA", &GeneticCode::standard())?;
/// assert_eq!(codons.len(), 3);
/// assert_eq!(codons[1].position, 2);
/// assert_eq!(codons[1].amino_acid.to_string(), "L");
/// # Ok::<(), charm_core::types::CharmError>(())
/// ```
pub fn split_into_codons<T: TranslationTable + ?Sized>(
    sequence: &[u8],
    table: &T,
) -> Result<Vec<PendingCodon>, CharmError> {
    if sequence.is_empty() {
        return Err(CharmError::InvalidSequence {
            position: 0,
            reason: "sequence is empty".to_string(),
        });
    }
    if sequence.len() % CODON_LENGTH != 0 {
        return Err(CharmError::InvalidSequenceLength(sequence.len()));
    }

    sequence
        .chunks_exact(CODON_LENGTH)
        .enumerate()
        .map(|(index, triplet)| {
            let codon = parse_triplet(triplet, index)?;
            Ok(PendingCodon::new(index + 1, codon, table.translate(codon)))
        })
        .collect()
}

fn parse_triplet(triplet: &[u8], index: usize) -> Result<Codon, CharmError> {
    Codon::from_slice(triplet).map_err(|_| {
        let offset = triplet
            .iter()
            .position(|base| !is_dna_base(*base))
            .unwrap_or_default();
        CharmError::InvalidSequence {
            position: index * CODON_LENGTH + offset + 1,
            reason: format!(
                "unrecognized symbol in codon {} ({})",
                index + 1,
                String::from_utf8_lossy(triplet)
            ),
        }
    })
}

/// Concatenates the replacement codons in position order.
///
/// The output is exactly three bases per record.
#[must_use]
pub fn reconstruct_sequence(records: &[CodonRecord]) -> String {
    let mut sequence = String::with_capacity(records.len() * CODON_LENGTH);
    for record in records {
        sequence.extend(record.replacement().as_bytes().iter().map(|b| char::from(*b)));
    }
    sequence
}

/// Translates every codon, stops included.
///
/// # Errors
///
/// Returns [`CharmError::InvalidSequenceLength`] for a trailing partial codon
/// and [`CharmError::Translation`] for an unrecognized codon.
pub fn translate_codons<T: TranslationTable + ?Sized>(
    sequence: &[u8],
    table: &T,
) -> Result<Vec<AminoAcid>, CharmError> {
    if sequence.len() % CODON_LENGTH != 0 {
        return Err(CharmError::InvalidSequenceLength(sequence.len()));
    }
    sequence
        .chunks_exact(CODON_LENGTH)
        .enumerate()
        .map(|(index, triplet)| translate_triplet(triplet, index, table))
        .collect()
}

fn translate_triplet<T: TranslationTable + ?Sized>(
    triplet: &[u8],
    index: usize,
    table: &T,
) -> Result<AminoAcid, CharmError> {
    Codon::from_slice(triplet)
        .map(|codon| table.translate(codon))
        .map_err(|_| CharmError::Translation {
            position: index + 1,
            codon: String::from_utf8_lossy(triplet).into_owned(),
            reason: "not a valid codon".to_string(),
        })
}

/// Translates a complete coding sequence.
///
/// The sequence must consist of whole codons, end with a stop codon, and
/// contain no other stop codon. The terminal stop is not part of the
/// returned protein.
///
/// # Errors
///
/// Returns [`CharmError::InvalidSequenceLength`] or
/// [`CharmError::Translation`] describing the first violation.
pub fn translate_cds<T: TranslationTable + ?Sized>(
    sequence: &[u8],
    table: &T,
) -> Result<String, CharmError> {
    let amino_acids = translate_codons(sequence, table)?;
    let Some((last, body)) = amino_acids.split_last() else {
        return Err(CharmError::InvalidSequence {
            position: 0,
            reason: "sequence is empty".to_string(),
        });
    };

    if let Some(index) = body.iter().position(|amino_acid| amino_acid.is_stop()) {
        return Err(CharmError::Translation {
            position: index + 1,
            codon: codon_text(sequence, index),
            reason: "in-frame stop codon".to_string(),
        });
    }
    if !last.is_stop() {
        return Err(CharmError::Translation {
            position: amino_acids.len(),
            codon: codon_text(sequence, amino_acids.len() - 1),
            reason: "final codon is not a stop codon".to_string(),
        });
    }

    Ok(body.iter().map(ToString::to_string).collect())
}

/// Translates whole codons up to, but excluding, the first stop codon.
///
/// A trailing partial codon is dropped.
///
/// # Errors
///
/// Returns [`CharmError::Translation`] for an unrecognized codon before the
/// first stop.
pub fn translate_to_stop<T: TranslationTable + ?Sized>(
    sequence: &[u8],
    table: &T,
) -> Result<String, CharmError> {
    let complete = &sequence[..sequence.len() - sequence.len() % CODON_LENGTH];
    let mut protein = String::with_capacity(complete.len() / CODON_LENGTH);

    for (index, triplet) in complete.chunks_exact(CODON_LENGTH).enumerate() {
        let amino_acid = translate_triplet(triplet, index, table)?;
        if amino_acid.is_stop() {
            break;
        }
        protein.push(char::from(amino_acid.symbol()));
    }

    Ok(protein)
}

fn codon_text(sequence: &[u8], index: usize) -> String {
    let start = index * CODON_LENGTH;
    String::from_utf8_lossy(&sequence[start..start + CODON_LENGTH]).into_owned()
}

/// Result of [`translate_with_recovery`].
#[derive(Debug)]
pub enum TranslationOutcome {
    /// The sequence translated as a complete coding sequence.
    Complete(String),
    /// The strict translation failed; the read-to-first-stop translation was used.
    Recovered { protein: String, cause: CharmError },
    /// Both attempts failed.
    Failed(CharmError),
}

impl TranslationOutcome {
    /// The translated protein, if either attempt succeeded.
    #[must_use]
    pub fn protein(&self) -> Option<&str> {
        match self {
            Self::Complete(protein) | Self::Recovered { protein, .. } => Some(protein),
            Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub const fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered { .. })
    }

    /// Converts the outcome into the protein or the fatal error.
    pub fn into_result(self) -> Result<String, CharmError> {
        match self {
            Self::Complete(protein) | Self::Recovered { protein, .. } => Ok(protein),
            Self::Failed(error) => Err(error),
        }
    }
}

/// Translates a coding sequence, retrying exactly once on failure.
///
/// The first attempt is [`translate_cds`]. If it fails (typically because of
/// an extra stop codon at the end), the sequence is truncated to its last
/// complete codon and translated up to the first stop with
/// [`translate_to_stop`]. A failure of the retry is final.
///
/// # Examples
///
/// ```rust
/// use charm_core::genetic_code::GeneticCode;
/// use charm_core::sequence::{translate_with_recovery, TranslationOutcome};
///
/// let table = GeneticCode::standard();
/// let outcome = translate_with_recovery(b"ATGAAATAA", &table);
/// assert!(matches!(outcome, TranslationOutcome::Complete(ref p) if p == "MK"));
///
/// // Two stop codons: the strict attempt fails, the retry succeeds
/// let outcome = translate_with_recovery(b"ATGAAATAATGA", &table);
/// assert!(outcome.is_recovered());
/// assert_eq!(outcome.protein(), Some("MK"));
/// ```
pub fn translate_with_recovery<T: TranslationTable + ?Sized>(
    sequence: &[u8],
    table: &T,
) -> TranslationOutcome {
    let cause = match translate_cds(sequence, table) {
        Ok(protein) => return TranslationOutcome::Complete(protein),
        Err(error) => error,
    };

    warn!("Error during translation: {}", cause);
    warn!("Retrying up to the first stop codon; this is expected for a trailing extra stop codon");

    match translate_to_stop(sequence, table) {
        Ok(protein) => TranslationOutcome::Recovered { protein, cause },
        Err(error) => TranslationOutcome::Failed(error),
    }
}
