//! Genetic codes used to translate codons into amino acids.
//!
//! Tables are stored in the NCBI layout: a 64-character string of one-letter
//! amino-acid codes, indexed by codon in TCAG order (`TTT`, `TTC`, `TTA`,
//! `TTG`, `TCT`, ...).

use crate::constants::CODON_COUNT;
use crate::types::{AminoAcid, CharmError, Codon};

/// Codon to amino-acid mapping plus stop-codon identification.
///
/// Origin and host organisms may use different implementations.
pub trait TranslationTable {
    /// Translates a codon; stop codons translate to [`AminoAcid::STOP`].
    fn translate(&self, codon: Codon) -> AminoAcid;

    /// Whether the codon terminates translation under this table.
    fn is_stop(&self, codon: Codon) -> bool {
        self.translate(codon).is_stop()
    }
}

/// (id, name, amino acids in TCAG order)
const NCBI_TABLES: &[(u8, &str, &[u8; CODON_COUNT])] = &[
    (1, "Standard", b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (2, "Vertebrate Mitochondrial", b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSS**VVVVAAAADDEEGGGG"),
    (3, "Yeast Mitochondrial", b"FFLLSSSSYY**CCWWTTTTPPPPHHQQRRRRIIMMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (4, "Mold, Protozoan, and Coelenterate Mitochondrial; Mycoplasma; Spiroplasma", b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (5, "Invertebrate Mitochondrial", b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSSSVVVVAAAADDEEGGGG"),
    (6, "Ciliate, Dasycladacean and Hexamita Nuclear", b"FFLLSSSSYYQQCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (9, "Echinoderm and Flatworm Mitochondrial", b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG"),
    (10, "Euplotid Nuclear", b"FFLLSSSSYY**CCCWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (11, "Bacterial, Archaeal and Plant Plastid", b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (12, "Alternative Yeast Nuclear", b"FFLLSSSSYY**CC*WLLLSPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (13, "Ascidian Mitochondrial", b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSGGVVVVAAAADDEEGGGG"),
    (14, "Alternative Flatworm Mitochondrial", b"FFLLSSSSYYY*CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG"),
    (15, "Blepharisma Nuclear", b"FFLLSSSSYY*QCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (16, "Chlorophycean Mitochondrial", b"FFLLSSSSYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (21, "Trematode Mitochondrial", b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNNKSSSSVVVVAAAADDEEGGGG"),
    (22, "Scenedesmus obliquus Mitochondrial", b"FFLLSS*SYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (23, "Thraustochytrium Mitochondrial", b"FF*LSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    (24, "Pterobranchia Mitochondrial", b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSSKVVVVAAAADDEEGGGG"),
    (25, "Candidate Division SR1 and Gracilibacteria", b"FFLLSSSSYY**CCGWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
];

/// An NCBI genetic code.
///
/// # Examples
///
/// ```rust
/// use charm_core::genetic_code::{GeneticCode, TranslationTable};
///
/// let vertebrate_mito = GeneticCode::from_ncbi_id(2)?;
/// let tga = "TGA".parse()?;
/// assert_eq!(vertebrate_mito.translate(tga).to_string(), "W");
/// assert!(GeneticCode::standard().is_stop(tga));
/// # Ok::<(), charm_core::types::CharmError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneticCode {
    id: u8,
    name: &'static str,
    amino_acids: [AminoAcid; CODON_COUNT],
}

impl GeneticCode {
    /// Builds the NCBI translation table with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`CharmError::InvalidTranslationTable`] for ids NCBI does not
    /// define (0, 7, 8, 17 to 20, above 25).
    pub fn from_ncbi_id(id: u8) -> Result<Self, CharmError> {
        NCBI_TABLES
            .iter()
            .find(|(table_id, _, _)| *table_id == id)
            .map(|&(id, name, symbols)| Self {
                id,
                name,
                amino_acids: symbols.map(AminoAcid::new),
            })
            .ok_or(CharmError::InvalidTranslationTable(id))
    }

    /// The standard genetic code (NCBI table 1).
    #[must_use]
    pub fn standard() -> Self {
        Self {
            id: 1,
            name: NCBI_TABLES[0].1,
            amino_acids: NCBI_TABLES[0].2.map(AminoAcid::new),
        }
    }

    /// Whether an NCBI table with this id is available.
    #[must_use]
    pub fn is_supported(id: u8) -> bool {
        NCBI_TABLES.iter().any(|(table_id, _, _)| *table_id == id)
    }

    #[must_use]
    pub const fn id(&self) -> u8 {
        self.id
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// All codons translating to `amino_acid`, in lexical order.
    pub fn synonymous_codons(&self, amino_acid: AminoAcid) -> Vec<Codon> {
        let mut codons: Vec<Codon> = (0..CODON_COUNT)
            .filter(|&index| self.amino_acids[index] == amino_acid)
            .map(Codon::from_ncbi_index)
            .collect();
        codons.sort();
        codons
    }

    /// Stop codons of this table, in lexical order.
    pub fn stop_codons(&self) -> Vec<Codon> {
        self.synonymous_codons(AminoAcid::STOP)
    }
}

impl Default for GeneticCode {
    fn default() -> Self {
        Self::standard()
    }
}

impl TranslationTable for GeneticCode {
    fn translate(&self, codon: Codon) -> AminoAcid {
        self.amino_acids[codon.ncbi_index()]
    }
}
