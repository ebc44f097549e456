//! Propagation of substitution decisions across a sequence.
//!
//! The selector is a pure function of `(amino acid, codon)`, so a sequence
//! needs only one selection per distinct codon. [`resolve_memoized`] collects
//! the distinct codons, resolves them (in parallel when asked) and copies the
//! result to every occurrence. [`resolve_direct`] resolves each position
//! independently. Both strategies yield identical records.

use std::collections::{HashMap, HashSet};

use log::debug;
use rayon::prelude::*;

use crate::record::{CodonRecord, PendingCodon, Substitution};
use crate::selection::SubstitutionSelector;
use crate::types::{AminoAcid, CharmError, Codon};

/// How the applier schedules selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One selection per distinct codon, copied to every occurrence
    Memoized,
    /// One selection per position
    Direct,
}

/// Resolves pending records with the given strategy.
///
/// With `parallel` set, selections run on the current Rayon pool. Records
/// keep their input order either way.
///
/// # Errors
///
/// Returns the first selection error, see [`SubstitutionSelector::select`].
pub fn resolve_codons(
    records: Vec<PendingCodon>,
    selector: &SubstitutionSelector<'_>,
    strategy: Strategy,
    parallel: bool,
) -> Result<Vec<CodonRecord>, CharmError> {
    match strategy {
        Strategy::Memoized => resolve_memoized(records, selector, parallel),
        Strategy::Direct => resolve_direct(records, selector, parallel),
    }
}

/// Resolves each distinct `(amino acid, codon)` pair once.
///
/// # Errors
///
/// Returns the first selection error, see [`SubstitutionSelector::select`].
pub fn resolve_memoized(
    records: Vec<PendingCodon>,
    selector: &SubstitutionSelector<'_>,
    parallel: bool,
) -> Result<Vec<CodonRecord>, CharmError> {
    let distinct = distinct_codons(&records);
    debug!(
        "Resolving {} distinct codons for {} positions",
        distinct.len(),
        records.len()
    );

    let resolved: Vec<Substitution> = if parallel {
        distinct
            .par_iter()
            .map(|&(amino_acid, codon)| selector.select(amino_acid, codon))
            .collect::<Result<_, _>>()?
    } else {
        distinct
            .iter()
            .map(|&(amino_acid, codon)| selector.select(amino_acid, codon))
            .collect::<Result<_, _>>()?
    };

    let lookup: HashMap<(AminoAcid, Codon), Substitution> =
        distinct.into_iter().zip(resolved).collect();

    records
        .into_iter()
        .map(|record| {
            let key = (record.amino_acid, record.original);
            match lookup.get(&key) {
                Some(substitution) => Ok(record.resolve(*substitution)),
                None => selector
                    .select(record.amino_acid, record.original)
                    .map(|substitution| record.resolve(substitution)),
            }
        })
        .collect()
}

/// Resolves every position independently.
///
/// # Errors
///
/// Returns the first selection error, see [`SubstitutionSelector::select`].
pub fn resolve_direct(
    records: Vec<PendingCodon>,
    selector: &SubstitutionSelector<'_>,
    parallel: bool,
) -> Result<Vec<CodonRecord>, CharmError> {
    let resolve = |record: PendingCodon| {
        selector
            .select(record.amino_acid, record.original)
            .map(|substitution| record.resolve(substitution))
    };

    if parallel {
        records.into_par_iter().map(resolve).collect()
    } else {
        records.into_iter().map(resolve).collect()
    }
}

/// Distinct `(amino acid, codon)` keys in order of first occurrence.
fn distinct_codons(records: &[PendingCodon]) -> Vec<(AminoAcid, Codon)> {
    let mut seen = HashSet::with_capacity(64);
    records
        .iter()
        .map(|record| (record.amino_acid, record.original))
        .filter(|key| seen.insert(*key))
        .collect()
}
