//! Choice of the synonymous host codon that best reproduces origin usage.
//!
//! For a codon `c0` encoding amino acid `aa`, the selector compares the usage
//! of `c0` in the origin organism (`originF`) with the usage of every host
//! codon for `aa`. Candidates are accepted when they bring the host usage
//! closer to `originF` than `c0` itself does, unless a well-used origin codon
//! would be traded for a rarely used host codon (the lower threshold). The
//! closest accepted candidate wins; with no accepted candidate `c0` stays.
//!
//! Stop codons follow the strong-stop rule when enabled: the host's most used
//! stop codon is taken regardless of usage differences.
//!
//! Selection is a pure function of the codon, both profiles and the policy,
//! so results can be memoized per distinct codon and computed in parallel.

use log::trace;

use crate::config::SelectionPolicy;
use crate::constants::USAGE_TIE_TOLERANCE;
use crate::record::{SelectionReason, Substitution};
use crate::types::{AminoAcid, CharmError, Codon};
use crate::usage::{CodonUsage, UsageProfile};

/// A host codon under consideration.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    codon: Codon,
    host_usage: f64,
    diff: f64,
    reason: SelectionReason,
}

impl Candidate {
    fn new(usage: &CodonUsage, origin_usage: f64, reason: SelectionReason) -> Self {
        Self {
            codon: usage.codon,
            host_usage: usage.value,
            diff: (origin_usage - usage.value).abs(),
            reason,
        }
    }

    /// Orders candidates by usage difference, then host usage, then codon.
    fn is_better_than(&self, other: &Self, prefer_lower_usage: bool) -> bool {
        if (self.diff - other.diff).abs() > USAGE_TIE_TOLERANCE {
            return self.diff < other.diff;
        }
        if (self.host_usage - other.host_usage).abs() > USAGE_TIE_TOLERANCE {
            return if prefer_lower_usage {
                self.host_usage < other.host_usage
            } else {
                self.host_usage > other.host_usage
            };
        }
        self.codon < other.codon
    }
}

fn best_candidate(
    candidates: impl Iterator<Item = Candidate>,
    prefer_lower_usage: bool,
) -> Option<Candidate> {
    candidates.reduce(|best, candidate| {
        if candidate.is_better_than(&best, prefer_lower_usage) {
            candidate
        } else {
            best
        }
    })
}

/// Resolves codons against an origin and a host usage profile.
///
/// # Examples
///
/// ```rust
/// use charm_core::config::{SelectionPolicy, UsageUnit};
/// use charm_core::selection::SubstitutionSelector;
/// use charm_core::types::AminoAcid;
/// use charm_core::usage::UsageProfile;
///
/// let leucine = AminoAcid::new(b'L');
/// let mut origin = UsageProfile::new("origin", UsageUnit::Fraction);
/// origin.insert(leucine, "CTT".parse()?, 0.9)?;
/// origin.insert(leucine, "CTC".parse()?, 0.05)?;
/// let mut host = UsageProfile::new("host", UsageUnit::Fraction);
/// host.insert(leucine, "CTT".parse()?, 0.05)?;
/// host.insert(leucine, "CTC".parse()?, 0.9)?;
///
/// let selector = SubstitutionSelector::new(&origin, &host, SelectionPolicy::default());
/// let substitution = selector.select(leucine, "CTT".parse()?)?;
///
/// assert_eq!(substitution.replacement.to_string(), "CTC");
/// assert_eq!(substitution.final_diff, 0.0);
/// # Ok::<(), charm_core::types::CharmError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SubstitutionSelector<'a> {
    origin: &'a UsageProfile,
    host: &'a UsageProfile,
    policy: SelectionPolicy,
}

impl<'a> SubstitutionSelector<'a> {
    #[must_use]
    pub const fn new(
        origin: &'a UsageProfile,
        host: &'a UsageProfile,
        policy: SelectionPolicy,
    ) -> Self {
        Self {
            origin,
            host,
            policy,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    /// Chooses the replacement for `original`, which encodes `amino_acid`.
    ///
    /// # Errors
    ///
    /// - [`CharmError::UnknownAminoAcid`] if the host profile has no codons
    ///   for `amino_acid`
    /// - [`CharmError::MissingCodonUsage`] if the origin profile has no usage
    ///   value for `original` under `amino_acid`
    pub fn select(&self, amino_acid: AminoAcid, original: Codon) -> Result<Substitution, CharmError> {
        let host_codons = self
            .host
            .codons(amino_acid)
            .filter(|codons| !codons.is_empty())
            .ok_or_else(|| CharmError::UnknownAminoAcid {
                amino_acid,
                organism: self.host.organism().to_string(),
            })?;

        let origin_usage =
            self.origin
                .usage(amino_acid, original)
                .ok_or_else(|| CharmError::MissingCodonUsage {
                    codon: original,
                    amino_acid,
                    organism: self.origin.organism().to_string(),
                })?;

        // Absent from the host table means c0 is not synonymous in the host
        let host_original = host_codons.iter().find(|usage| usage.codon == original);
        let original_host_usage = host_original.map_or(0.0, |usage| usage.value);
        let initial_diff = (origin_usage - original_host_usage).abs();

        let chosen = if amino_acid.is_stop() && self.policy.strong_stop {
            self.strongest_stop(host_codons, origin_usage)
        } else {
            self.closest_accepted(host_codons, original, origin_usage, initial_diff)
        };

        let substitution = match (chosen, host_original) {
            (Some(candidate), _) => Substitution {
                replacement: candidate.codon,
                origin_usage,
                target_usage: candidate.host_usage,
                initial_diff,
                final_diff: candidate.diff,
                reason: candidate.reason,
            },
            (None, Some(_)) => Substitution {
                replacement: original,
                origin_usage,
                target_usage: original_host_usage,
                initial_diff,
                final_diff: initial_diff,
                reason: SelectionReason::Retained,
            },
            (None, None) => {
                let forced = best_candidate(
                    host_codons
                        .iter()
                        .map(|usage| Candidate::new(usage, origin_usage, SelectionReason::Forced)),
                    self.policy.prefer_lower_usage_on_tie,
                )
                .ok_or_else(|| CharmError::UnknownAminoAcid {
                    amino_acid,
                    organism: self.host.organism().to_string(),
                })?;
                Substitution {
                    replacement: forced.codon,
                    origin_usage,
                    target_usage: forced.host_usage,
                    initial_diff,
                    final_diff: forced.diff,
                    reason: SelectionReason::Forced,
                }
            }
        };

        trace!(
            "{} ({}) -> {} [{}], diff {:.4} -> {:.4}",
            original,
            amino_acid,
            substitution.replacement,
            substitution.reason,
            substitution.initial_diff,
            substitution.final_diff
        );

        Ok(substitution)
    }

    /// Host stop codon with the highest usage; ties go to the lexically first codon.
    fn strongest_stop(&self, host_codons: &[CodonUsage], origin_usage: f64) -> Option<Candidate> {
        host_codons
            .iter()
            .map(|usage| Candidate::new(usage, origin_usage, SelectionReason::StrongStop))
            .reduce(|best, candidate| {
                let higher = candidate.host_usage > best.host_usage + USAGE_TIE_TOLERANCE;
                let tied = (candidate.host_usage - best.host_usage).abs() <= USAGE_TIE_TOLERANCE;
                if higher || (tied && candidate.codon < best.codon) {
                    candidate
                } else {
                    best
                }
            })
    }

    /// Closest alternative codon passing the threshold and acceptance rules.
    fn closest_accepted(
        &self,
        host_codons: &[CodonUsage],
        original: Codon,
        origin_usage: f64,
        initial_diff: f64,
    ) -> Option<Candidate> {
        let threshold = self.policy.lower_threshold;

        let accepted = host_codons
            .iter()
            .filter(|usage| usage.codon != original)
            .filter(|usage| !(usage.value < threshold && origin_usage > threshold))
            .filter_map(|usage| {
                let candidate = Candidate::new(usage, origin_usage, SelectionReason::Harmonized);
                if candidate.diff < initial_diff {
                    Some(candidate)
                } else if self.policy.admit_zero_usage && usage.value == 0.0 {
                    Some(Candidate {
                        reason: SelectionReason::ZeroUsageAdmitted,
                        ..candidate
                    })
                } else {
                    None
                }
            });

        best_candidate(accepted, self.policy.prefer_lower_usage_on_tie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UsageUnit;

    fn aa(symbol: u8) -> AminoAcid {
        AminoAcid::new(symbol)
    }

    fn codon(s: &str) -> Codon {
        s.parse().unwrap()
    }

    fn profile(name: &str, entries: &[(u8, &str, f64)]) -> UsageProfile {
        let mut profile = UsageProfile::new(name, UsageUnit::Fraction);
        for &(symbol, triplet, value) in entries {
            profile.insert(aa(symbol), codon(triplet), value).unwrap();
        }
        profile
    }

    fn policy() -> SelectionPolicy {
        SelectionPolicy {
            lower_threshold: 0.1,
            strong_stop: true,
            prefer_lower_usage_on_tie: true,
            admit_zero_usage: false,
        }
    }

    #[test]
    fn test_scenario_a_swaps_to_matching_host_codon() {
        let origin = profile("origin", &[(b'L', "CTT", 0.9), (b'L', "CTC", 0.05)]);
        let host = profile("host", &[(b'L', "CTT", 0.05), (b'L', "CTC", 0.9)]);
        let selector = SubstitutionSelector::new(&origin, &host, policy());

        let result = selector.select(aa(b'L'), codon("CTT")).unwrap();
        assert_eq!(result.replacement, codon("CTC"));
        assert_eq!(result.final_diff, 0.0);
        assert_eq!(result.origin_usage, 0.9);
        assert_eq!(result.target_usage, 0.9);
        assert!((result.initial_diff - 0.85).abs() < 1e-12);
        assert_eq!(result.reason, SelectionReason::Harmonized);
    }

    #[test]
    fn test_scenario_b_strong_stop_takes_dominant_host_stop() {
        let origin = profile(
            "origin",
            &[(b'*', "TAA", 0.6), (b'*', "TAG", 0.1), (b'*', "TGA", 0.3)],
        );
        let host = profile(
            "host",
            &[(b'*', "TAA", 0.1), (b'*', "TAG", 0.0), (b'*', "TGA", 0.9)],
        );
        let selector = SubstitutionSelector::new(&origin, &host, policy());

        let result = selector.select(AminoAcid::STOP, codon("TAA")).unwrap();
        assert_eq!(result.replacement, codon("TGA"));
        assert_eq!(result.target_usage, 0.9);
        assert!((result.final_diff - 0.3).abs() < 1e-12);
        assert_eq!(result.reason, SelectionReason::StrongStop);

        // Even a codon that already matches perfectly is replaced
        let result = selector.select(AminoAcid::STOP, codon("TAG")).unwrap();
        assert_eq!(result.replacement, codon("TGA"));
    }

    #[test]
    fn test_strong_stop_ties_use_lexical_order() {
        let origin = profile("origin", &[(b'*', "TGA", 0.5)]);
        let host = profile(
            "host",
            &[(b'*', "TGA", 0.45), (b'*', "TAG", 0.1), (b'*', "TAA", 0.45)],
        );
        let selector = SubstitutionSelector::new(&origin, &host, policy());

        let result = selector.select(AminoAcid::STOP, codon("TGA")).unwrap();
        assert_eq!(result.replacement, codon("TAA"));
    }

    #[test]
    fn test_stop_without_strong_stop_minimizes_difference() {
        let origin = profile("origin", &[(b'*', "TAA", 0.6)]);
        let host = profile(
            "host",
            &[(b'*', "TAA", 0.1), (b'*', "TAG", 0.55), (b'*', "TGA", 0.9)],
        );
        let selector = SubstitutionSelector::new(
            &origin,
            &host,
            SelectionPolicy {
                strong_stop: false,
                ..policy()
            },
        );

        let result = selector.select(AminoAcid::STOP, codon("TAA")).unwrap();
        assert_eq!(result.replacement, codon("TAG"));
        assert_eq!(result.reason, SelectionReason::Harmonized);
    }

    #[test]
    fn test_scenario_c_threshold_rejects_rare_host_codon() {
        let origin = profile("origin", &[(b'V', "GTT", 0.5)]);
        let host = profile(
            "host",
            &[(b'V', "GTT", 0.9), (b'V', "GTA", 0.02), (b'V', "GTC", 0.08)],
        );
        let selector = SubstitutionSelector::new(&origin, &host, policy());

        // GTA and GTC would both be closer than GTT but fall below the threshold
        let result = selector.select(aa(b'V'), codon("GTT")).unwrap();
        assert_eq!(result.replacement, codon("GTT"));
        assert_eq!(result.reason, SelectionReason::Retained);
        assert_eq!(result.final_diff, result.initial_diff);
        assert_eq!(result.target_usage, 0.9);
    }

    #[test]
    fn test_scenario_c_qualifying_candidate_still_wins() {
        let origin = profile("origin", &[(b'V', "GTT", 0.5)]);
        let host = profile(
            "host",
            &[(b'V', "GTT", 0.9), (b'V', "GTA", 0.02), (b'V', "GTG", 0.3)],
        );
        let selector = SubstitutionSelector::new(&origin, &host, policy());

        let result = selector.select(aa(b'V'), codon("GTT")).unwrap();
        assert_eq!(result.replacement, codon("GTG"));
        assert!((result.final_diff - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_does_not_apply_to_rare_origin_codon() {
        let origin = profile("origin", &[(b'R', "AGG", 0.05)]);
        let host = profile("host", &[(b'R', "AGG", 0.4), (b'R', "CGA", 0.06)]);
        let selector = SubstitutionSelector::new(&origin, &host, policy());

        let result = selector.select(aa(b'R'), codon("AGG")).unwrap();
        assert_eq!(result.replacement, codon("CGA"));
    }

    #[test]
    fn test_tie_prefers_lower_usage_when_flag_set() {
        let origin = profile("origin", &[(b'G', "GGT", 0.5)]);
        let host = profile(
            "host",
            &[(b'G', "GGT", 0.0), (b'G', "GGC", 0.75), (b'G', "GGA", 0.25)],
        );

        let lower = SubstitutionSelector::new(&origin, &host, policy());
        assert_eq!(
            lower.select(aa(b'G'), codon("GGT")).unwrap().replacement,
            codon("GGA")
        );

        let higher = SubstitutionSelector::new(
            &origin,
            &host,
            SelectionPolicy {
                prefer_lower_usage_on_tie: false,
                ..policy()
            },
        );
        assert_eq!(
            higher.select(aa(b'G'), codon("GGT")).unwrap().replacement,
            codon("GGC")
        );
    }

    #[test]
    fn test_exact_tie_uses_lexical_order() {
        let origin = profile("origin", &[(b'A', "GCT", 0.5)]);
        let host = profile(
            "host",
            &[(b'A', "GCT", 0.0), (b'A', "GCG", 0.4), (b'A', "GCA", 0.4)],
        );
        let selector = SubstitutionSelector::new(&origin, &host, policy());

        let result = selector.select(aa(b'A'), codon("GCT")).unwrap();
        assert_eq!(result.replacement, codon("GCA"));
    }

    #[test]
    fn test_zero_usage_admission_is_opt_in() {
        let origin = profile("origin", &[(b'K', "AAA", 0.05)]);
        let host = profile("host", &[(b'K', "AAA", 0.05), (b'K', "AAG", 0.0)]);

        let default = SubstitutionSelector::new(&origin, &host, policy());
        let result = default.select(aa(b'K'), codon("AAA")).unwrap();
        assert_eq!(result.replacement, codon("AAA"));

        let permissive = SubstitutionSelector::new(
            &origin,
            &host,
            SelectionPolicy {
                admit_zero_usage: true,
                ..policy()
            },
        );
        let result = permissive.select(aa(b'K'), codon("AAA")).unwrap();
        assert_eq!(result.replacement, codon("AAG"));
        assert_eq!(result.reason, SelectionReason::ZeroUsageAdmitted);
        assert!((result.final_diff - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_forced_when_host_code_disagrees() {
        // Origin TGA encodes W (mitochondrial code), the host only knows TGG
        let origin = profile("origin", &[(b'W', "TGA", 0.7), (b'W', "TGG", 0.3)]);
        let host = profile("host", &[(b'W', "TGG", 1.0)]);
        let selector = SubstitutionSelector::new(&origin, &host, policy());

        let result = selector.select(aa(b'W'), codon("TGA")).unwrap();
        assert_eq!(result.replacement, codon("TGG"));
        assert_eq!(result.initial_diff, 0.7);
        assert!((result.final_diff - 0.3).abs() < 1e-12);
        // TGG is closer than "no usage", so the regular rule already picks it
        assert_eq!(result.reason, SelectionReason::Harmonized);

        let origin = profile("origin", &[(b'W', "TGA", 0.5)]);
        let host = profile("host", &[(b'W', "TGG", 0.05)]);
        let selector = SubstitutionSelector::new(&origin, &host, policy());
        let result = selector.select(aa(b'W'), codon("TGA")).unwrap();
        assert_eq!(result.replacement, codon("TGG"));
        assert_eq!(result.reason, SelectionReason::Forced);
    }

    #[test]
    fn test_unknown_amino_acid() {
        let origin = profile("origin", &[(b'C', "TGT", 0.5)]);
        let host = profile("host", &[(b'L', "CTT", 0.5)]);
        let selector = SubstitutionSelector::new(&origin, &host, policy());

        match selector.select(aa(b'C'), codon("TGT")) {
            Err(CharmError::UnknownAminoAcid { amino_acid, organism }) => {
                assert_eq!(amino_acid, aa(b'C'));
                assert_eq!(organism, "host");
            }
            other => panic!("Expected UnknownAminoAcid, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_origin_usage() {
        let origin = profile("origin", &[(b'C', "TGC", 0.5)]);
        let host = profile("host", &[(b'C', "TGT", 0.5), (b'C', "TGC", 0.5)]);
        let selector = SubstitutionSelector::new(&origin, &host, policy());

        assert!(matches!(
            selector.select(aa(b'C'), codon("TGT")),
            Err(CharmError::MissingCodonUsage { .. })
        ));
    }

    #[test]
    fn test_changed_codons_never_increase_difference() {
        let origin = profile(
            "origin",
            &[
                (b'S', "TCT", 0.26),
                (b'S', "TCC", 0.16),
                (b'S', "TCA", 0.21),
                (b'S', "TCG", 0.10),
                (b'S', "AGT", 0.16),
                (b'S', "AGC", 0.11),
            ],
        );
        let host = profile(
            "host",
            &[
                (b'S', "TCT", 0.15),
                (b'S', "TCC", 0.15),
                (b'S', "TCA", 0.12),
                (b'S', "TCG", 0.15),
                (b'S', "AGT", 0.15),
                (b'S', "AGC", 0.28),
            ],
        );

        for prefer_lower in [true, false] {
            let selector = SubstitutionSelector::new(
                &origin,
                &host,
                SelectionPolicy {
                    prefer_lower_usage_on_tie: prefer_lower,
                    ..policy()
                },
            );
            for usage in origin.codons(aa(b'S')).unwrap() {
                let result = selector.select(aa(b'S'), usage.codon).unwrap();
                if result.replacement == usage.codon {
                    assert_eq!(result.final_diff, result.initial_diff);
                } else {
                    assert!(result.final_diff <= result.initial_diff);
                }
            }
        }
    }
}
