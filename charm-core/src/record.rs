use std::fmt;

use serde::Serialize;

use crate::types::{AminoAcid, Codon};

/// Marker trait for the resolution state of a [`CodonRecord`].
///
/// A record starts out [`Pending`] when the sequence is split and becomes
/// resolved exactly once, when a [`Substitution`] is attached to it.
pub trait ResolutionState {}

/// Marker type for a codon whose replacement has not been chosen yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending;

impl ResolutionState for Pending {}
impl ResolutionState for Substitution {}

/// Why the selector settled on a replacement codon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionReason {
    /// No synonymous host codon matched the origin usage better.
    Retained,
    /// A host codon with a smaller usage difference was found.
    Harmonized,
    /// Stop codon replaced by the host's most used stop codon.
    StrongStop,
    /// Zero-usage host codon admitted by policy.
    ZeroUsageAdmitted,
    /// The original codon does not encode the amino acid in the host, so the
    /// closest host codon was taken regardless of thresholds.
    Forced,
}

impl fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Retained => "retained",
            Self::Harmonized => "harmonized",
            Self::StrongStop => "strong_stop",
            Self::ZeroUsageAdmitted => "zero_usage_admitted",
            Self::Forced => "forced",
        };
        f.write_str(label)
    }
}

/// Outcome of selecting a replacement for one codon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Substitution {
    /// Codon written to the harmonized sequence
    pub replacement: Codon,
    /// Usage of the original codon in the origin organism
    pub origin_usage: f64,
    /// Usage of the replacement codon in the host organism
    pub target_usage: f64,
    /// |origin usage - host usage| of the original codon
    pub initial_diff: f64,
    /// |origin usage - host usage| of the replacement codon
    pub final_diff: f64,
    pub reason: SelectionReason,
}

/// One codon of a coding sequence.
///
/// The type parameter tracks resolution: the splitter produces
/// `CodonRecord<Pending>`, and [`CodonRecord::resolve`] consumes it to
/// produce a resolved `CodonRecord` carrying its [`Substitution`].
///
/// # Examples
///
/// ```rust
/// use charm_core::record::{CodonRecord, SelectionReason, Substitution};
/// use charm_core::types::AminoAcid;
///
/// let pending = CodonRecord::new(1, "CTT".parse()?, AminoAcid::new(b'L'));
/// let resolved = pending.resolve(Substitution {
///     replacement: "CTC".parse()?,
///     origin_usage: 0.9,
///     target_usage: 0.9,
///     initial_diff: 0.85,
///     final_diff: 0.0,
///     reason: SelectionReason::Harmonized,
/// });
///
/// assert!(resolved.is_changed());
/// assert_eq!(resolved.replacement().to_string(), "CTC");
/// # Ok::<(), charm_core::types::CharmError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodonRecord<S: ResolutionState = Substitution> {
    /// 1-based ordinal of the codon in the sequence
    pub position: usize,
    pub original: Codon,
    /// Translation of the original codon under the origin genetic code
    pub amino_acid: AminoAcid,
    #[serde(flatten)]
    state: S,
}

/// A codon record awaiting its replacement.
pub type PendingCodon = CodonRecord<Pending>;

impl CodonRecord<Pending> {
    #[must_use]
    pub const fn new(position: usize, original: Codon, amino_acid: AminoAcid) -> Self {
        Self {
            position,
            original,
            amino_acid,
            state: Pending,
        }
    }

    /// Attaches the chosen substitution, freezing the record.
    #[must_use]
    pub fn resolve(self, substitution: Substitution) -> CodonRecord {
        CodonRecord {
            position: self.position,
            original: self.original,
            amino_acid: self.amino_acid,
            state: substitution,
        }
    }
}

impl CodonRecord {
    #[must_use]
    pub const fn substitution(&self) -> &Substitution {
        &self.state
    }

    #[must_use]
    pub const fn replacement(&self) -> Codon {
        self.state.replacement
    }

    #[must_use]
    pub const fn origin_usage(&self) -> f64 {
        self.state.origin_usage
    }

    #[must_use]
    pub const fn target_usage(&self) -> f64 {
        self.state.target_usage
    }

    #[must_use]
    pub const fn initial_diff(&self) -> f64 {
        self.state.initial_diff
    }

    #[must_use]
    pub const fn final_diff(&self) -> f64 {
        self.state.final_diff
    }

    #[must_use]
    pub const fn reason(&self) -> SelectionReason {
        self.state.reason
    }

    /// Whether the replacement differs from the original codon.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.state.replacement != self.original
    }
}
