// =============================================================================
// General
// =============================================================================

/// Length of a codon in base pairs
pub const CODON_LENGTH: usize = 3;

/// Number of distinct codons over the A/C/G/T alphabet
pub const CODON_COUNT: usize = 64;

/// Symbol used for stop codons in translations and usage tables
pub const STOP_SYMBOL: u8 = b'*';

/// Header used when a sequence is harmonized without an identifier
pub const DEFAULT_SEQUENCE_HEADER: &str = "CHarm_Seq_1";

// =============================================================================
// Selection policy
// =============================================================================

/// Lower usage threshold applied to fraction-based profiles
pub const DEFAULT_LOWER_THRESHOLD_FRACTION: f64 = 0.1;

/// Lower usage threshold applied to per-thousand frequency profiles
pub const DEFAULT_LOWER_THRESHOLD_PER_THOUSAND: f64 = 5.0;

/// Two usage differences closer than this are treated as a tie
pub const USAGE_TIE_TOLERANCE: f64 = 1e-9;

// =============================================================================
// Genetic codes
// =============================================================================

/// Base order used to index the 64-character NCBI amino-acid strings
pub const NCBI_BASE_ORDER: [u8; 4] = [b'T', b'C', b'A', b'G'];

/// NCBI translation table ids with a published Codon Usage Database table
pub const MAX_USAGE_DATABASE_TABLE: u8 = 15;
