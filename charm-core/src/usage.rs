//! Per-organism codon usage statistics.
//!
//! A [`UsageProfile`] maps each amino acid to the codons filed under it and a
//! usage value per codon. Codons keep the order in which they were inserted,
//! so every pass over a profile visits candidates in the same sequence.

use std::collections::HashMap;

use crate::config::UsageUnit;
use crate::genetic_code::TranslationTable;
use crate::types::{AminoAcid, CharmError, Codon};

/// Usage value of a single codon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodonUsage {
    pub codon: Codon,
    pub value: f64,
}

/// Codon usage table of one organism.
///
/// # Examples
///
/// ```rust
/// use charm_core::config::UsageUnit;
/// use charm_core::types::AminoAcid;
/// use charm_core::usage::UsageProfile;
///
/// let mut profile = UsageProfile::new("Escherichia coli", UsageUnit::Fraction);
/// profile.insert(AminoAcid::new(b'L'), "CTG".parse()?, 0.50)?;
/// profile.insert(AminoAcid::new(b'L'), "CTA".parse()?, 0.04)?;
///
/// assert_eq!(profile.usage(AminoAcid::new(b'L'), "CTG".parse()?), Some(0.50));
/// assert_eq!(profile.codons(AminoAcid::new(b'L')).map(<[_]>::len), Some(2));
/// # Ok::<(), charm_core::types::CharmError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UsageProfile {
    organism: String,
    unit: UsageUnit,
    groups: Vec<(AminoAcid, Vec<CodonUsage>)>,
    index: HashMap<AminoAcid, usize>,
}

impl UsageProfile {
    /// Creates an empty profile.
    pub fn new(organism: impl Into<String>, unit: UsageUnit) -> Self {
        Self {
            organism: organism.into(),
            unit,
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Records the usage of `codon` under `amino_acid`.
    ///
    /// Inserting a codon twice under the same amino acid replaces its value
    /// without changing its position.
    ///
    /// # Errors
    ///
    /// Returns [`CharmError::ParseError`] if the value is negative or not finite.
    pub fn insert(
        &mut self,
        amino_acid: AminoAcid,
        codon: Codon,
        value: f64,
    ) -> Result<(), CharmError> {
        if !value.is_finite() || value < 0.0 {
            return Err(CharmError::ParseError(format!(
                "usage of {} ({}) must be a non-negative number, got {}",
                codon, amino_acid, value
            )));
        }

        let slot = match self.index.get(&amino_acid) {
            Some(&slot) => slot,
            None => {
                self.groups.push((amino_acid, Vec::new()));
                self.index.insert(amino_acid, self.groups.len() - 1);
                self.groups.len() - 1
            }
        };

        let codons = &mut self.groups[slot].1;
        match codons.iter_mut().find(|usage| usage.codon == codon) {
            Some(existing) => existing.value = value,
            None => codons.push(CodonUsage { codon, value }),
        }
        Ok(())
    }

    #[must_use]
    pub fn organism(&self) -> &str {
        &self.organism
    }

    #[must_use]
    pub const fn unit(&self) -> UsageUnit {
        self.unit
    }

    /// Codons filed under `amino_acid`, in insertion order.
    #[must_use]
    pub fn codons(&self, amino_acid: AminoAcid) -> Option<&[CodonUsage]> {
        self.index
            .get(&amino_acid)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    /// Usage value of `codon` under `amino_acid`.
    #[must_use]
    pub fn usage(&self, amino_acid: AminoAcid, codon: Codon) -> Option<f64> {
        self.codons(amino_acid)?
            .iter()
            .find(|usage| usage.codon == codon)
            .map(|usage| usage.value)
    }

    #[must_use]
    pub fn contains_amino_acid(&self, amino_acid: AminoAcid) -> bool {
        self.index.contains_key(&amino_acid)
    }

    /// Amino acids in the order they were first inserted.
    pub fn amino_acids(&self) -> impl Iterator<Item = AminoAcid> + '_ {
        self.groups.iter().map(|(amino_acid, _)| *amino_acid)
    }

    /// Total number of codons across all amino acids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, codons)| codons.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Checks that every codon is filed under the amino acid `table` assigns it.
    ///
    /// # Errors
    ///
    /// Returns [`CharmError::ProfileTableMismatch`] for the first codon that disagrees.
    pub fn check_against<T: TranslationTable + ?Sized>(&self, table: &T) -> Result<(), CharmError> {
        for (amino_acid, codons) in &self.groups {
            for usage in codons {
                let translated = table.translate(usage.codon);
                if translated != *amino_acid {
                    return Err(CharmError::ProfileTableMismatch {
                        codon: usage.codon,
                        profile: *amino_acid,
                        table: translated,
                        organism: self.organism.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Parses a table in the Codon Usage Database "style=N" text layout.
    ///
    /// Each entry reads `codon amino-acid fraction per-thousand (count)`, with
    /// several entries per line:
    ///
    /// ```text
    /// UUU F 0.57 22.1 ( 80995)  UCU S 0.11  8.5 ( 29970)  UAU Y 0.53 16.3 ( 57463)
    /// ```
    ///
    /// RNA codons are stored as DNA. `unit` picks the column that is kept.
    /// `<pre>` tags and lines without entries are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CharmError::ParseError`] for malformed entries and for input
    /// containing no entries at all.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use charm_core::config::UsageUnit;
    /// use charm_core::types::AminoAcid;
    /// use charm_core::usage::UsageProfile;
    ///
    /// let text = "UUU F 0.57 22.1 ( 80995)  UUC F 0.43 16.6 ( 60980)";
    /// let profile = UsageProfile::from_kazusa("E. coli", text, UsageUnit::PerThousand)?;
    /// assert_eq!(profile.usage(AminoAcid::new(b'F'), "TTC".parse()?), Some(16.6));
    /// # Ok::<(), charm_core::types::CharmError>(())
    /// ```
    pub fn from_kazusa(
        organism: impl Into<String>,
        text: &str,
        unit: UsageUnit,
    ) -> Result<Self, CharmError> {
        let mut profile = Self::new(organism, unit);

        for (line_number, line) in text.lines().enumerate() {
            let line = line.replace("<pre>", "").replace("</pre>", "");
            if !line.contains('(') {
                continue;
            }

            for entry in line.split(')').map(str::trim).filter(|e| !e.is_empty()) {
                let (amino_acid, codon, value) = parse_kazusa_entry(entry, unit)
                    .map_err(|reason| {
                        CharmError::ParseError(format!(
                            "line {}: {} in entry '{}'",
                            line_number + 1,
                            reason,
                            entry
                        ))
                    })?;
                profile.insert(amino_acid, codon, value)?;
            }
        }

        if profile.is_empty() {
            return Err(CharmError::ParseError(
                "no codon usage entries found".to_string(),
            ));
        }
        Ok(profile)
    }
}

fn parse_kazusa_entry(entry: &str, unit: UsageUnit) -> Result<(AminoAcid, Codon, f64), String> {
    let fields: Vec<&str> = entry.split_whitespace().collect();
    if fields.len() < 4 {
        return Err("expected codon, amino acid, fraction and frequency".to_string());
    }

    let codon: Codon = fields[0].parse().map_err(|_| "invalid codon".to_string())?;
    let amino_acid = match fields[1].as_bytes() {
        [symbol] if symbol.is_ascii_alphabetic() || *symbol == b'*' => AminoAcid::new(*symbol),
        _ => return Err("invalid amino acid".to_string()),
    };
    let column = match unit {
        UsageUnit::Fraction => fields[2],
        UsageUnit::PerThousand => fields[3],
    };
    let value = column
        .parse::<f64>()
        .map_err(|_| format!("invalid usage value '{}'", column))?;

    Ok((amino_acid, codon, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetic_code::GeneticCode;

    const KAZUSA_SNIPPET: &str = "<pre>
UUU F 0.57 22.1 ( 80995)  UCU S 0.11  8.5 ( 29970)  UAU Y 0.53 16.3 ( 57463)  UGU C 0.42  5.2 ( 18473)
UUC F 0.43 16.6 ( 60980)  UCC S 0.11  8.6 ( 30495)  UAC Y 0.47 12.2 ( 43109)  UGC C 0.58  6.5 ( 22975)
UUA L 0.15 13.8 ( 50719)  UCA S 0.15 10.4 ( 36800)  UAA * 0.64  2.0 (  7356)  UGA * 0.29  0.9 (  3260)
UUG L 0.12 11.6 ( 42769)  UCG S 0.16  8.0 ( 29293)  UAG * 0.07  0.2 (   894)  UGG W 1.00 13.9 ( 48974)
</pre>";

    fn aa(symbol: u8) -> AminoAcid {
        AminoAcid::new(symbol)
    }

    fn codon(s: &str) -> Codon {
        s.parse().unwrap()
    }

    #[test]
    fn test_insert_preserves_order_and_overwrites() {
        let mut profile = UsageProfile::new("test", UsageUnit::Fraction);
        profile.insert(aa(b'L'), codon("CTT"), 0.1).unwrap();
        profile.insert(aa(b'L'), codon("CTC"), 0.2).unwrap();
        profile.insert(aa(b'F'), codon("TTT"), 0.5).unwrap();
        profile.insert(aa(b'L'), codon("CTT"), 0.7).unwrap();

        let leucine = profile.codons(aa(b'L')).unwrap();
        assert_eq!(leucine[0].codon, codon("CTT"));
        assert_eq!(leucine[0].value, 0.7);
        assert_eq!(leucine[1].codon, codon("CTC"));
        assert_eq!(profile.amino_acids().collect::<Vec<_>>(), vec![aa(b'L'), aa(b'F')]);
        assert_eq!(profile.len(), 3);
    }

    #[test]
    fn test_insert_rejects_invalid_values() {
        let mut profile = UsageProfile::new("test", UsageUnit::Fraction);
        assert!(profile.insert(aa(b'L'), codon("CTT"), -0.1).is_err());
        assert!(profile.insert(aa(b'L'), codon("CTT"), f64::NAN).is_err());
        assert!(profile.is_empty());
    }

    #[test]
    fn test_lookup_missing_entries() {
        let mut profile = UsageProfile::new("test", UsageUnit::Fraction);
        profile.insert(aa(b'L'), codon("CTT"), 0.1).unwrap();
        assert_eq!(profile.usage(aa(b'L'), codon("CTA")), None);
        assert_eq!(profile.usage(aa(b'K'), codon("AAA")), None);
        assert!(profile.codons(aa(b'K')).is_none());
        assert!(!profile.contains_amino_acid(aa(b'K')));
    }

    #[test]
    fn test_from_kazusa_fraction() {
        let profile = UsageProfile::from_kazusa("yeast", KAZUSA_SNIPPET, UsageUnit::Fraction).unwrap();
        assert_eq!(profile.organism(), "yeast");
        assert_eq!(profile.unit(), UsageUnit::Fraction);
        assert_eq!(profile.len(), 16);
        assert_eq!(profile.usage(aa(b'F'), codon("TTT")), Some(0.57));
        assert_eq!(profile.usage(aa(b'*'), codon("TAA")), Some(0.64));
        assert_eq!(profile.usage(aa(b'W'), codon("TGG")), Some(1.0));

        let stops: Vec<String> = profile
            .codons(AminoAcid::STOP)
            .unwrap()
            .iter()
            .map(|u| u.codon.to_string())
            .collect();
        assert_eq!(stops, vec!["TAA", "TGA", "TAG"]);
    }

    #[test]
    fn test_from_kazusa_per_thousand() {
        let profile =
            UsageProfile::from_kazusa("yeast", KAZUSA_SNIPPET, UsageUnit::PerThousand).unwrap();
        assert_eq!(profile.usage(aa(b'F'), codon("TTT")), Some(22.1));
        assert_eq!(profile.usage(aa(b'S'), codon("TCG")), Some(8.0));
    }

    #[test]
    fn test_from_kazusa_rejects_garbage() {
        let result = UsageProfile::from_kazusa("x", "UUU F zero 22.1 ( 80995)", UsageUnit::Fraction);
        assert!(matches!(result, Err(CharmError::ParseError(_))));

        let result = UsageProfile::from_kazusa("x", "UXU F 0.5 22.1 ( 80995)", UsageUnit::Fraction);
        assert!(matches!(result, Err(CharmError::ParseError(_))));

        let result = UsageProfile::from_kazusa("x", "no table here", UsageUnit::Fraction);
        assert!(matches!(result, Err(CharmError::ParseError(_))));
    }

    #[test]
    fn test_check_against_genetic_code() {
        let profile = UsageProfile::from_kazusa("yeast", KAZUSA_SNIPPET, UsageUnit::Fraction).unwrap();
        assert!(profile.check_against(&GeneticCode::standard()).is_ok());

        // TGA encodes tryptophan in vertebrate mitochondria
        let mito = GeneticCode::from_ncbi_id(2).unwrap();
        match profile.check_against(&mito) {
            Err(CharmError::ProfileTableMismatch { codon: c, table, .. }) => {
                assert_eq!(c, codon("TGA"));
                assert_eq!(table, aa(b'W'));
            }
            other => panic!("Expected ProfileTableMismatch, got {:?}", other),
        }
    }
}
