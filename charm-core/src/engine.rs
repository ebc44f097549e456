use std::path::Path;

use log::{debug, info};

use crate::applier::{resolve_codons, Strategy};
use crate::config::{HarmonizationConfig, SelectionPolicy};
use crate::constants::DEFAULT_SEQUENCE_HEADER;
use crate::genetic_code::GeneticCode;
use crate::record::{CodonRecord, PendingCodon};
use crate::results::{HarmonizationResult, SequenceInfo};
use crate::selection::SubstitutionSelector;
use crate::sequence::{
    normalize_sequence, read_fasta_sequences, reconstruct_sequence, split_into_codons,
    translate_to_stop, translate_with_recovery,
};
use crate::types::CharmError;
use crate::usage::UsageProfile;
use crate::verification::{verify_equivalence, verify_records};

/// Codon harmonization engine for one origin/host pair.
///
/// A harmonizer owns both usage profiles, the genetic codes of both
/// organisms and the derived selection policy. Construction validates all of
/// them, so harmonizing a sequence can only fail on the sequence itself.
///
/// # Examples
///
/// ```rust,no_run
/// use charm_core::Harmonizer;
/// use charm_core::config::{HarmonizationConfig, UsageUnit};
/// use charm_core::usage::UsageProfile;
///
/// let origin = UsageProfile::from_kazusa(
///     "Escherichia coli K-12",
///     &std::fs::read_to_string("e_coli.txt")?,
///     UsageUnit::Fraction,
/// )?;
/// let host = UsageProfile::from_kazusa(
///     "Bacillus subtilis",
///     &std::fs::read_to_string("b_subtilis.txt")?,
///     UsageUnit::Fraction,
/// )?;
///
/// let harmonizer = Harmonizer::new(HarmonizationConfig::default(), origin, host)?;
/// let result = harmonizer.harmonize("ATGCTGAAAGGCTAA", Some("my_gene".to_string()))?;
///
/// println!("{}", result.harmonized_sequence);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Harmonizer {
    config: HarmonizationConfig,
    origin: UsageProfile,
    host: UsageProfile,
    origin_code: GeneticCode,
    host_code: GeneticCode,
    policy: SelectionPolicy,
    /// Dedicated pool when `num_threads` is set
    pool: Option<rayon::ThreadPool>,
}

impl Harmonizer {
    /// Creates a harmonizer from a configuration and two usage profiles.
    ///
    /// # Errors
    ///
    /// - [`CharmError::InvalidConfig`] or [`CharmError::InvalidTranslationTable`]
    ///   if `config` fails validation, or the thread pool cannot be built
    /// - [`CharmError::UsageProfileMismatch`] if the profiles use different units
    /// - [`CharmError::ProfileTableMismatch`] if a profile files a codon under
    ///   an amino acid its organism's genetic code disagrees with
    ///
    /// # Examples
    ///
    /// ```rust
    /// use charm_core::Harmonizer;
    /// use charm_core::config::{HarmonizationConfig, UsageUnit};
    /// use charm_core::types::CharmError;
    /// use charm_core::usage::UsageProfile;
    ///
    /// let origin = UsageProfile::new("origin", UsageUnit::Fraction);
    /// let host = UsageProfile::new("host", UsageUnit::PerThousand);
    ///
    /// let result = Harmonizer::new(HarmonizationConfig::default(), origin, host);
    /// assert!(matches!(result, Err(CharmError::UsageProfileMismatch { .. })));
    /// ```
    pub fn new(
        config: HarmonizationConfig,
        origin: UsageProfile,
        host: UsageProfile,
    ) -> Result<Self, CharmError> {
        config.validate()?;

        if origin.unit() != host.unit() {
            return Err(CharmError::UsageProfileMismatch {
                origin: origin.unit(),
                host: host.unit(),
            });
        }

        let origin_code = GeneticCode::from_ncbi_id(config.origin_translation_table)?;
        let host_code = GeneticCode::from_ncbi_id(config.host_translation_table)?;
        origin.check_against(&origin_code)?;
        host.check_against(&host_code)?;

        let pool = match config.num_threads {
            Some(num_threads) if config.parallel => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build()
                    .map_err(|e| {
                        CharmError::InvalidConfig(format!("Failed to configure thread pool: {}", e))
                    })?,
            ),
            _ => None,
        };

        let policy = config.selection_policy(origin.unit());
        debug!(
            "Harmonizer {} (table {}) -> {} (table {}), threshold {} {}",
            origin.organism(),
            origin_code.id(),
            host.organism(),
            host_code.id(),
            policy.lower_threshold,
            origin.unit()
        );

        Ok(Self {
            config,
            origin,
            host,
            origin_code,
            host_code,
            policy,
            pool,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &HarmonizationConfig {
        &self.config
    }

    #[must_use]
    pub const fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    #[must_use]
    pub const fn origin_profile(&self) -> &UsageProfile {
        &self.origin
    }

    #[must_use]
    pub const fn host_profile(&self) -> &UsageProfile {
        &self.host
    }

    /// Harmonizes every record of a FASTA file.
    ///
    /// # Errors
    ///
    /// Returns [`CharmError`] if the file cannot be read or parsed, or if any
    /// record fails to harmonize.
    pub fn harmonize_fasta_file<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Vec<HarmonizationResult>, CharmError> {
        read_fasta_sequences(path)?
            .into_iter()
            .map(|(header, description, bases)| {
                self.harmonize_bytes(&bases, header, description)
            })
            .collect()
    }

    /// Harmonizes a coding sequence given as text.
    ///
    /// `header` defaults to `CHarm_Seq_1`.
    ///
    /// # Errors
    ///
    /// See [`Harmonizer::harmonize_bytes`].
    pub fn harmonize(
        &self,
        sequence: &str,
        header: Option<String>,
    ) -> Result<HarmonizationResult, CharmError> {
        let header = header.unwrap_or_else(|| DEFAULT_SEQUENCE_HEADER.to_string());
        self.harmonize_bytes(sequence.as_bytes(), header, None)
    }

    /// Harmonizes a coding sequence given as raw bytes.
    ///
    /// The sequence is normalized, translated under the origin code, split
    /// into codons, resolved, reassembled and checked for translational
    /// equivalence under the host code.
    ///
    /// # Errors
    ///
    /// - [`CharmError::InvalidSequence`] for symbols outside the nucleotide
    ///   alphabet or an empty sequence
    /// - [`CharmError::InvalidSequenceLength`] if the length is not a multiple of 3
    /// - [`CharmError::Translation`] if the sequence does not translate even
    ///   after the read-to-first-stop retry
    /// - [`CharmError::UnknownAminoAcid`] if the host profile lacks an amino
    ///   acid of the sequence
    /// - [`CharmError::MissingCodonUsage`] if the origin profile lacks a codon
    ///   of the sequence
    ///
    /// # Panics
    ///
    /// Panics if the harmonized sequence does not encode the original
    /// protein. This indicates a defect in codon selection, never bad input.
    pub fn harmonize_bytes(
        &self,
        sequence: &[u8],
        header: String,
        description: Option<String>,
    ) -> Result<HarmonizationResult, CharmError> {
        let normalized = normalize_sequence(sequence)?;

        let translation = translate_with_recovery(&normalized, &self.origin_code);
        let translation_recovered = translation.is_recovered();
        let original_protein = translation.into_result()?;

        let pending = split_into_codons(&normalized, &self.origin_code)?;
        self.check_host_amino_acids(&pending)?;
        info!("Harmonizing {} ({} codons)", header, pending.len());

        let codons = self.resolve(pending)?;
        let harmonized_sequence = reconstruct_sequence(&codons);

        let verified = verify_equivalence(
            &normalized,
            &self.origin_code,
            harmonized_sequence.as_bytes(),
            &self.host_code,
        ) && verify_records(&codons, &self.host_code);
        assert!(
            verified,
            "harmonized sequence {} does not encode the original protein",
            header
        );

        let harmonized_protein = translate_to_stop(harmonized_sequence.as_bytes(), &self.host_code)?;

        let result = HarmonizationResult {
            sequence_info: SequenceInfo {
                header,
                description,
                length: normalized.len(),
                num_codons: codons.len(),
            },
            codons,
            harmonized_sequence,
            original_protein,
            harmonized_protein,
            translation_recovered,
            verified,
        };

        info!(
            "{}: {} of {} codons changed",
            result.sequence_info.header,
            result.changed_codons().count(),
            result.sequence_info.num_codons
        );

        Ok(result)
    }

    fn check_host_amino_acids(&self, pending: &[PendingCodon]) -> Result<(), CharmError> {
        match pending
            .iter()
            .find(|record| !self.host.contains_amino_acid(record.amino_acid))
        {
            Some(record) => Err(CharmError::UnknownAminoAcid {
                amino_acid: record.amino_acid,
                organism: self.host.organism().to_string(),
            }),
            None => Ok(()),
        }
    }

    fn resolve(&self, pending: Vec<PendingCodon>) -> Result<Vec<CodonRecord>, CharmError> {
        let selector = SubstitutionSelector::new(&self.origin, &self.host, self.policy);
        let strategy = if self.config.use_memoization {
            Strategy::Memoized
        } else {
            Strategy::Direct
        };

        match &self.pool {
            Some(pool) => pool.install(|| resolve_codons(pending, &selector, strategy, true)),
            None => resolve_codons(pending, &selector, strategy, self.config.parallel),
        }
    }
}
