use crate::error::ContactMapError;
use crate::matrix::MAX_RESIDUES;
use crate::source::ChainBundle;

use nalgebra as na;
use pdbtbx::*;
use tracing::{debug, warn};

/// Chain id used when neither the bundle nor the label names one.
pub const UNKNOWN_CHAIN: &str = "?";

/// One residue of the flattened structure.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidueRecord {
    /// Position in chain-concatenation order
    pub index: usize,
    /// Chain identifier
    pub chain: String,
    /// Residue sequence number
    pub res_no: i64,
    /// Residue label without chain prefix, e.g. `"ALA 12"`
    pub label: String,
    /// Secondary structure code
    pub ss_code: String,
    /// Representative position of the residue
    pub position: na::Point3<f64>,
}

impl ResidueRecord {
    /// The three-letter residue name, upper-cased.
    pub fn resn(&self) -> String {
        residue_code(&self.label)
    }
}

/// First whitespace-delimited token of a residue label, upper-cased.
pub fn residue_code(label: &str) -> String {
    label
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_uppercase()
}

/// Split a raw label into `(chain, residue label)`.
///
/// Only the first colon separates the chain id, so `"A:X:1"` gives `("A", "X:1")`.
pub fn split_chain_label(raw: &str) -> (Option<&str>, &str) {
    match raw.split_once(':') {
        Some((chain, rest)) => (Some(chain), rest),
        None => (None, raw),
    }
}

/// Parse the trailing whitespace-delimited token of a residue label as its number.
pub fn parse_res_no(label: &str) -> Option<i64> {
    label.split_whitespace().last()?.parse().ok()
}

/// Flatten chain bundles into an ordered residue list.
///
/// Fails only when the total residue count exceeds [`MAX_RESIDUES`]; the count
/// is checked before any record is built.
pub fn build_residues(bundles: &[ChainBundle]) -> Result<Vec<ResidueRecord>, ContactMapError> {
    let total: usize = bundles.iter().map(ChainBundle::len).sum();
    if total > MAX_RESIDUES {
        return Err(ContactMapError::TooManyResidues(total));
    }

    let mut residues = Vec::with_capacity(total);
    for bundle in bundles {
        if !bundle.is_aligned() {
            warn!(
                "Chain {:?} has misaligned coordinate arrays; using the first {} residues",
                bundle.chain,
                bundle.len()
            );
        }
        for k in 0..bundle.len() {
            let index = residues.len();
            let (label_chain, label) = split_chain_label(&bundle.labels[k]);
            let chain = bundle
                .chain
                .as_deref()
                .or(label_chain)
                .filter(|c| !c.is_empty())
                .unwrap_or(UNKNOWN_CHAIN)
                .to_string();
            let res_no = parse_res_no(label).unwrap_or(index as i64 + 1);

            residues.push(ResidueRecord {
                index,
                chain,
                res_no,
                label: label.trim().to_string(),
                ss_code: bundle.ss.get(k).cloned().unwrap_or_default(),
                position: na::Point3::new(bundle.x[k], bundle.y[k], bundle.z[k]),
            });
        }
    }
    debug!("Built {} residue records from {} chains", residues.len(), bundles.len());

    Ok(residues)
}

pub trait ResidueExt {
    /// The residue one-letter code, or `None` if it's not an amino acid.
    fn resn(&self) -> Option<&str>;

    /// The CA atom of the residue, if present.
    fn alpha_carbon(&self) -> Option<&Atom>;
}

impl ResidueExt for Residue {
    fn resn(&self) -> Option<&str> {
        one_letter_code(self.name()?)
    }

    fn alpha_carbon(&self) -> Option<&Atom> {
        self.atoms().find(|atom| atom.name() == "CA")
    }
}

/// Map a three-letter amino acid code to its one-letter code.
pub fn one_letter_code(resn: &str) -> Option<&'static str> {
    let aa_code = match resn.to_uppercase().as_str() {
        "ALA" => "A",
        "ARG" => "R",
        "ASN" => "N",
        "ASP" => "D",
        "CYS" => "C",
        "GLN" => "Q",
        "GLU" => "E",
        "GLY" => "G",
        "HIS" => "H",
        "ILE" => "I",
        "LEU" => "L",
        "LYS" => "K",
        "MET" => "M",
        "PHE" => "F",
        "PRO" => "P",
        "SER" => "S",
        "THR" => "T",
        "TRP" => "W",
        "TYR" => "Y",
        "VAL" => "V",
        _ => "X",
    };

    match aa_code {
        "X" => None,
        _ => Some(aa_code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(chain: Option<&str>, labels: &[&str]) -> ChainBundle {
        let n = labels.len();
        ChainBundle {
            chain: chain.map(str::to_string),
            x: (0..n).map(|i| i as f64).collect(),
            y: vec![0.0; n],
            z: vec![0.0; n],
            labels: labels.iter().map(|l| l.to_string()).collect(),
            ss: vec!["H".to_string(); n],
        }
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!(split_chain_label("A:ALA 12"), (Some("A"), "ALA 12"));
        assert_eq!(split_chain_label("ALA 12"), (None, "ALA 12"));
        assert_eq!(split_chain_label("B:X:3"), (Some("B"), "X:3"));
        assert_eq!(parse_res_no("ALA 12"), Some(12));
        assert_eq!(parse_res_no("ALA 12A"), None);
        assert_eq!(parse_res_no(""), None);
        assert_eq!(residue_code("arg 5"), "ARG");
    }

    #[test]
    fn test_chain_from_label_prefix() {
        let residues = build_residues(&[bundle(None, &["A:ALA 5", "GLY 6"])]).unwrap();
        assert_eq!(residues[0].chain, "A");
        assert_eq!(residues[0].label, "ALA 5");
        assert_eq!(residues[0].res_no, 5);
        assert_eq!(residues[1].chain, UNKNOWN_CHAIN);
        assert_eq!(residues[1].res_no, 6);
    }

    #[test]
    fn test_structured_chain_wins() {
        let residues = build_residues(&[bundle(Some("H"), &["L:SER 1"])]).unwrap();
        assert_eq!(residues[0].chain, "H");
        assert_eq!(residues[0].label, "SER 1");
    }

    #[test]
    fn test_unparseable_res_no_uses_position() {
        let residues = build_residues(&[
            bundle(Some("A"), &["ALA 1", "GLY 2"]),
            bundle(Some("B"), &["LIG", "SER x"]),
        ])
        .unwrap();
        assert_eq!(residues.len(), 4);
        assert_eq!(residues[2].res_no, 3);
        assert_eq!(residues[3].res_no, 4);
        assert_eq!(residues[3].index, 3);
        assert_eq!(residues[3].ss_code, "H");
    }

    #[test]
    fn test_oversized_rejected() {
        let labels: Vec<String> = (0..=MAX_RESIDUES).map(|i| format!("ALA {i}")).collect();
        let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
        match build_residues(&[bundle(Some("A"), &labels)]) {
            Err(ContactMapError::TooManyResidues(n)) => assert_eq!(n, MAX_RESIDUES + 1),
            other => panic!("Expected oversize rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_one_letter_codes() {
        assert_eq!(one_letter_code("trp"), Some("W"));
        assert_eq!(one_letter_code("HOH"), None);
    }
}
