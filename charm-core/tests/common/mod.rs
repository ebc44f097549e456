#![allow(dead_code)]

use std::path::{Path, PathBuf};

use charm_core::Harmonizer;
use charm_core::config::{HarmonizationConfig, UsageUnit};
use charm_core::usage::UsageProfile;

/// Green fluorescent protein coding sequence
pub const GFP_FRAGMENT: &str = "ATGAGTAAAGGAGAAGAACTTTTCACTGGAGTTGTCCCAATTCTTGTTGAATTAGATGGTGATGTTAATGGGCACAAATTTTCTGTCAGTGGAGAGGGTGAAGGTGATGCTACATACGGAAAGCTTACCCTTAAATTTATTTGCACTACTGGAAAACTACCTGTTCCATGGCCAACACTTGTCACTACTTTCGGTTATGGTGTTCAATGCTTTTCAAGATACCCAGATCATATGAAACGGCATGACTTTTTCAAGAGTGCCATGCCCGAAGGTTATGTACAGGAAAGAACTATATTTTTCAAAGATGACGGGAACTACAAGACACGTGCTGAAGTCAAGTTTGAAGGTGATACCCTTGTTAATAGAATCGAGTTAAAAGGTATTGATTTTAAAGAAGATGGAAACATTCTTGGACACAAATTGGAATACAACTATAACTCACACAATGTATACATCATGGCAGACAAACAAAAGAATGGAATCAAAGTTAACTTCAAAATTAGACACAACATTGAAGATGGAAGCGTTCAACTAGCAGACCATTATCAACAAAATACTCCAATTGGCGATGGCCCTGTCCTTTTACCAGACAACCATTACCTGTCCACACAATCTGCCCTTTCGAAAGATCCCAACGAAAAGAGAGACCACATGGTCCTTCTTGAGTTTGTAACAGCTGCTGGGATTACACATGGCATGGATGAACTATACAAATAA";

pub fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

pub fn load_profile(name: &str, organism: &str, unit: UsageUnit) -> UsageProfile {
    let text = std::fs::read_to_string(data_path(name)).unwrap();
    UsageProfile::from_kazusa(organism, &text, unit).unwrap()
}

/// E. coli K-12 to B. subtilis harmonizer
pub fn e_coli_to_b_subtilis(config: HarmonizationConfig, unit: UsageUnit) -> Harmonizer {
    let origin = load_profile("escherichia_coli_k12.txt", "Escherichia coli K-12", unit);
    let host = load_profile("bacillus_subtilis.txt", "Bacillus subtilis", unit);
    Harmonizer::new(config, origin, host).unwrap()
}
