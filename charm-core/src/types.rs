use std::fmt::{self, Write as _};
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::config::UsageUnit;
use crate::constants::{CODON_LENGTH, NCBI_BASE_ORDER, STOP_SYMBOL};

/// A nucleotide triplet over the unambiguous DNA alphabet (A, C, G, T).
///
/// Codons order lexically, which is the order used to break ties between
/// otherwise equivalent substitutions.
///
/// # Examples
///
/// ```rust
/// use charm_core::types::Codon;
///
/// let codon: Codon = "cug".parse()?;
/// assert_eq!(codon.to_string(), "CTG");
/// # Ok::<(), charm_core::types::CharmError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codon([u8; CODON_LENGTH]);

impl Codon {
    /// Builds a codon from three bases, rejecting anything outside A/C/G/T.
    pub fn new(bases: [u8; CODON_LENGTH]) -> Result<Self, CharmError> {
        match bases.iter().position(|base| !is_dna_base(*base)) {
            Some(offset) => Err(CharmError::InvalidSequence {
                position: offset + 1,
                reason: format!(
                    "unrecognized nucleotide '{}' in codon {}",
                    char::from(bases[offset]).escape_default(),
                    String::from_utf8_lossy(&bases)
                ),
            }),
            None => Ok(Self(bases)),
        }
    }

    /// Builds a codon from a slice that must be exactly three bases long.
    pub fn from_slice(bases: &[u8]) -> Result<Self, CharmError> {
        let triplet: [u8; CODON_LENGTH] = bases
            .try_into()
            .map_err(|_| CharmError::InvalidSequenceLength(bases.len()))?;
        Self::new(triplet)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; CODON_LENGTH] {
        &self.0
    }

    /// Index of the codon in the NCBI TCAG ordering (0..64).
    #[must_use]
    pub fn ncbi_index(&self) -> usize {
        self.0.iter().fold(0, |index, base| {
            let rank = NCBI_BASE_ORDER
                .iter()
                .position(|candidate| candidate == base)
                .unwrap_or_default();
            index * 4 + rank
        })
    }

    /// Inverse of [`Codon::ncbi_index`].
    #[must_use]
    pub fn from_ncbi_index(index: usize) -> Self {
        Self([
            NCBI_BASE_ORDER[(index >> 4) & 3],
            NCBI_BASE_ORDER[(index >> 2) & 3],
            NCBI_BASE_ORDER[index & 3],
        ])
    }
}

impl fmt::Display for Codon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|base| f.write_char(char::from(*base)))
    }
}

impl FromStr for Codon {
    type Err = CharmError;

    /// Parses a codon, accepting lowercase input and RNA (`U`) bases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bases: Vec<u8> = s
            .trim()
            .bytes()
            .map(|base| match base.to_ascii_uppercase() {
                b'U' => b'T',
                upper => upper,
            })
            .collect();
        Self::from_slice(&bases)
    }
}

impl Serialize for Codon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One-letter amino-acid symbol, with `*` standing for a stop codon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AminoAcid(u8);

impl AminoAcid {
    /// The translation of a stop codon
    pub const STOP: Self = Self(STOP_SYMBOL);

    /// Creates an amino acid from its one-letter code. Letters are uppercased.
    #[must_use]
    pub const fn new(symbol: u8) -> Self {
        Self(symbol.to_ascii_uppercase())
    }

    #[must_use]
    pub const fn symbol(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_stop(self) -> bool {
        self.0 == STOP_SYMBOL
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(char::from(self.0))
    }
}

impl Serialize for AminoAcid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Checks a byte against the unambiguous, uppercase DNA alphabet.
#[must_use]
pub const fn is_dna_base(base: u8) -> bool {
    matches!(base, b'A' | b'C' | b'G' | b'T')
}

/// Errors that can occur during codon harmonization.
///
/// Every variant is fatal for the sequence being processed; there is no
/// partial harmonization.
#[derive(Debug, Error)]
pub enum CharmError {
    /// Sequence contains a symbol outside the nucleotide alphabet
    #[error("Invalid sequence at position {position}: {reason}")]
    InvalidSequence { position: usize, reason: String },
    /// Sequence length is not a multiple of the codon length
    #[error("Invalid sequence length: {0} bp is not a multiple of 3")]
    InvalidSequenceLength(usize),
    /// Sequence cannot be translated as a coding sequence
    #[error("Translation error at codon {position} ({codon}): {reason}")]
    Translation {
        position: usize,
        codon: String,
        reason: String,
    },
    /// Origin and host profiles use different usage units
    #[error("Usage profile mismatch: origin uses {origin}, host uses {host}")]
    UsageProfileMismatch { origin: UsageUnit, host: UsageUnit },
    /// Amino acid is missing from the host profile
    #[error("Amino acid {amino_acid} has no codons in the usage profile of {organism}")]
    UnknownAminoAcid {
        amino_acid: AminoAcid,
        organism: String,
    },
    /// Codon has no usage value in a profile
    #[error("Codon {codon} ({amino_acid}) has no usage value in the profile of {organism}")]
    MissingCodonUsage {
        codon: Codon,
        amino_acid: AminoAcid,
        organism: String,
    },
    /// Profile files a codon under an amino acid its genetic code disagrees with
    #[error(
        "Usage profile of {organism} lists {codon} as {profile}, but its genetic code translates it as {table}"
    )]
    ProfileTableMismatch {
        codon: Codon,
        profile: AminoAcid,
        table: AminoAcid,
        organism: String,
    },
    /// Translation table id is not supported
    #[error("Invalid translation table: {0}")]
    InvalidTranslationTable(u8),
    /// Configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Error parsing input data
    #[error("Parse error: {0}")]
    ParseError(String),
    /// File I/O operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
