//! # CHarm - Codon Harmonization
//!
//! Rewrites a protein-coding nucleotide sequence so that its codon choices
//! resemble the codon usage of a host organism, while the encoded protein
//! stays exactly the same.
//!
//! ## Overview
//!
//! Codon harmonization adapts a gene from an origin organism to a host
//! organism. Each codon is replaced by the synonymous host codon whose usage
//! in the host is closest to the usage of the original codon in the origin
//! organism, so that rarely used codons stay rare and common codons stay
//! common. Translation-rate patterns of the original gene are preserved
//! better than with plain codon optimization.
//!
//! ## Features
//!
//! - **Usage-difference selection** with a lower usage threshold
//! - **Strong stop**: stop codons use the host's preferred stop codon
//! - **Different genetic codes** for origin and host (NCBI tables)
//! - **Memoized, parallel resolution**: one selection per distinct codon, on Rayon
//! - **Verified output**: every result is checked for translational equivalence
//! - **Reports** in FASTA, TSV and JSON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use charm_core::Harmonizer;
//! use charm_core::config::{HarmonizationConfig, UsageUnit};
//! use charm_core::usage::UsageProfile;
//!
//! // Tables in the Codon Usage Database text layout
//! let origin = UsageProfile::from_kazusa(
//!     "Escherichia coli K-12",
//!     &std::fs::read_to_string("e_coli.txt")?,
//!     UsageUnit::Fraction,
//! )?;
//! let host = UsageProfile::from_kazusa(
//!     "Bacillus subtilis",
//!     &std::fs::read_to_string("b_subtilis.txt")?,
//!     UsageUnit::Fraction,
//! )?;
//!
//! let harmonizer = Harmonizer::new(HarmonizationConfig::default(), origin, host)?;
//! let result = harmonizer.harmonize("ATGCTTAAAGGCTAA", Some("my_gene".to_string()))?;
//!
//! println!("{}", result.harmonized_sequence);
//! println!("{} codons changed", result.summary().changed_codons);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Pipeline
//!
//! [`Harmonizer::harmonize`] runs these steps for every sequence:
//!
//! 1. normalize the input ([`sequence::normalize_sequence`])
//! 2. translate under the origin code, retrying once up to the first stop
//!    ([`sequence::translate_with_recovery`])
//! 3. split into codon records ([`sequence::split_into_codons`])
//! 4. select a replacement per distinct codon ([`selection`]) and apply it to
//!    every occurrence ([`applier`])
//! 5. reassemble the sequence ([`sequence::reconstruct_sequence`])
//! 6. verify translational equivalence ([`verification`])
//!
//! ## Module Organization
//!
//! - [`config`]: Harmonization options and usage units
//! - [`engine`]: The [`Harmonizer`] pipeline
//! - [`types`]: Codons, amino acids and the error type
//! - [`genetic_code`]: NCBI translation tables
//! - [`usage`]: Codon usage profiles and the Codon Usage Database parser
//! - [`sequence`]: Normalization, splitting, translation and FASTA input
//! - [`record`]: Per-codon records and substitutions
//! - [`selection`]: Choice of the replacement codon
//! - [`applier`]: Propagation of choices across a sequence
//! - [`verification`]: Translational equivalence checks
//! - [`results`]: Harmonization results and summaries
//! - [`output`]: FASTA, TSV and JSON reports
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, CharmError>`](types::CharmError),
//! covering:
//!
//! - Invalid sequences (bad symbols, partial codons, untranslatable input)
//! - Usage profiles with different units, missing amino acids or codons
//! - Profiles that disagree with their genetic code
//! - Invalid configuration and I/O errors
//!
//! A harmonized sequence that fails verification is a defect in the
//! selection logic and panics instead of returning an error.
//!
//! ## Logging
//!
//! Progress is reported through the [`log`] facade. Install any logger in the
//! application to see it.

pub mod applier;
pub mod config;
pub mod constants;
pub mod engine;
pub mod genetic_code;
pub mod output;
pub mod record;
pub mod results;
pub mod selection;
pub mod sequence;
pub mod types;
pub mod usage;
pub mod verification;

pub use engine::Harmonizer;
pub use types::CharmError;
