use std::fmt;

use serde::Serialize;

use crate::constants::{
    DEFAULT_LOWER_THRESHOLD_FRACTION, DEFAULT_LOWER_THRESHOLD_PER_THOUSAND,
    MAX_USAGE_DATABASE_TABLE,
};
use crate::genetic_code::GeneticCode;
use crate::types::CharmError;

/// Unit in which a usage profile expresses codon usage.
///
/// Two profiles can only be compared when they share a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageUnit {
    /// Fraction of the amino acid's codons (0.0 to 1.0 per amino acid).
    Fraction,

    /// Occurrences per thousand codons of the whole coding genome.
    PerThousand,
}

impl UsageUnit {
    /// Lower usage threshold used when the configuration leaves it unset.
    #[must_use]
    pub const fn default_lower_threshold(self) -> f64 {
        match self {
            Self::Fraction => DEFAULT_LOWER_THRESHOLD_FRACTION,
            Self::PerThousand => DEFAULT_LOWER_THRESHOLD_PER_THOUSAND,
        }
    }
}

impl fmt::Display for UsageUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fraction => write!(f, "fraction"),
            Self::PerThousand => write!(f, "frequency per thousand"),
        }
    }
}

/// Output format options for harmonization reports.
///
/// # Examples
///
/// ```rust
/// use charm_core::config::OutputFormat;
///
/// let format: OutputFormat = "tsv".parse()?;
/// assert_eq!(format, OutputFormat::Tsv);
/// # Ok::<(), charm_core::types::CharmError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Harmonized sequence as a FASTA record.
    Fasta,

    /// Tab-separated table with one row per codon.
    ///
    /// Lists original and replacement codons with their usage values and
    /// the reason each replacement was chosen.
    Tsv,

    /// Complete result serialized as JSON.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = CharmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fasta" | "fa" => Ok(Self::Fasta),
            "tsv" | "table" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            other => Err(CharmError::InvalidConfig(format!(
                "unknown output format '{}'",
                other
            ))),
        }
    }
}

/// Configuration settings for a codon harmonization run.
///
/// # Examples
///
/// ## Default configuration
///
/// ```rust
/// use charm_core::config::HarmonizationConfig;
///
/// let config = HarmonizationConfig::default();
/// assert!(config.strong_stop);
/// ```
///
/// ## Different genetic codes for origin and host
///
/// ```rust
/// use charm_core::config::HarmonizationConfig;
///
/// let config = HarmonizationConfig {
///     origin_translation_table: 4,
///     host_translation_table: 11,
///     lower_threshold: Some(0.05),
///     ..Default::default()
/// };
/// config.validate()?;
/// # Ok::<(), charm_core::types::CharmError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarmonizationConfig {
    /// Usage below which a host codon is not used to replace a well-used
    /// origin codon.
    ///
    /// Expressed in the unit of the profiles. `None` selects the unit
    /// default: 0.1 for fractions, 5 for frequencies per thousand.
    ///
    /// **Default**: `None`
    pub lower_threshold: Option<f64>,

    /// Replace every stop codon with the host's most used stop codon.
    ///
    /// **Default**: `true`
    pub strong_stop: bool,

    /// When two candidates are equally close to the origin usage, pick the
    /// one with lower host usage instead of the higher one.
    ///
    /// **Default**: `true`
    pub prefer_lower_usage_on_tie: bool,

    /// Resolve each distinct codon once and copy the result to every
    /// occurrence instead of resolving position by position.
    ///
    /// Both strategies produce identical records.
    ///
    /// **Default**: `true`
    pub use_memoization: bool,

    /// Accept host codons with zero usage as substitutes even when they do
    /// not reduce the usage difference.
    ///
    /// **Default**: `false`
    pub admit_zero_usage: bool,

    /// NCBI genetic code of the origin organism.
    ///
    /// **Default**: `1` (standard code)
    pub origin_translation_table: u8,

    /// NCBI genetic code of the host organism.
    ///
    /// **Default**: `1` (standard code)
    pub host_translation_table: u8,

    /// Resolve distinct codons on the Rayon thread pool.
    ///
    /// **Default**: `true`
    pub parallel: bool,

    /// Number of worker threads for parallel resolution.
    ///
    /// `None` uses the global Rayon pool.
    ///
    /// **Default**: `None`
    pub num_threads: Option<usize>,
}

impl Default for HarmonizationConfig {
    fn default() -> Self {
        Self {
            lower_threshold: None,
            strong_stop: true,
            prefer_lower_usage_on_tie: true,
            use_memoization: true,
            admit_zero_usage: false,
            origin_translation_table: 1,
            host_translation_table: 1,
            parallel: true,
            num_threads: None,
        }
    }
}

impl HarmonizationConfig {
    /// Checks that every setting is in range.
    ///
    /// # Errors
    ///
    /// Returns [`CharmError::InvalidConfig`] for a negative or non-finite
    /// threshold or a zero thread count, and
    /// [`CharmError::InvalidTranslationTable`] for a genetic code without a
    /// published usage table.
    pub fn validate(&self) -> Result<(), CharmError> {
        if let Some(threshold) = self.lower_threshold {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(CharmError::InvalidConfig(format!(
                    "lower threshold must be a non-negative number, got {}",
                    threshold
                )));
            }
        }

        if self.num_threads == Some(0) {
            return Err(CharmError::InvalidConfig(
                "number of threads must be at least 1".to_string(),
            ));
        }

        for table in [self.origin_translation_table, self.host_translation_table] {
            if table > MAX_USAGE_DATABASE_TABLE || !GeneticCode::is_supported(table) {
                return Err(CharmError::InvalidTranslationTable(table));
            }
        }

        Ok(())
    }

    /// Derives the selection policy for profiles expressed in `unit`.
    #[must_use]
    pub fn selection_policy(&self, unit: UsageUnit) -> SelectionPolicy {
        SelectionPolicy {
            lower_threshold: self
                .lower_threshold
                .unwrap_or_else(|| unit.default_lower_threshold()),
            strong_stop: self.strong_stop,
            prefer_lower_usage_on_tie: self.prefer_lower_usage_on_tie,
            admit_zero_usage: self.admit_zero_usage,
        }
    }
}

/// Rules applied by the substitution selector to every codon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionPolicy {
    pub lower_threshold: f64,
    pub strong_stop: bool,
    pub prefer_lower_usage_on_tie: bool,
    pub admit_zero_usage: bool,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        HarmonizationConfig::default().selection_policy(UsageUnit::Fraction)
    }
}
