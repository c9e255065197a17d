use crate::residues::{ResidueExt, ResidueRecord};

use pdbtbx::*;
use std::collections::HashMap;

/// A contiguous run of residues sharing one chain id. `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRange {
    pub chain: String,
    pub start: usize,
    pub end: usize,
}

impl ChainRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Scan residue order for chain-id changes.
///
/// A chain id that reappears later in the list starts a new range.
pub fn chain_ranges(residues: &[ResidueRecord]) -> Vec<ChainRange> {
    let mut ranges: Vec<ChainRange> = Vec::new();
    for (i, res) in residues.iter().enumerate() {
        match ranges.last_mut() {
            Some(last) if last.chain == res.chain => last.end = i + 1,
            _ => ranges.push(ChainRange {
                chain: res.chain.clone(),
                start: i,
                end: i + 1,
            }),
        }
    }
    ranges
}

/// Start index of every range after the first, where a separator line goes.
pub fn chain_boundaries(ranges: &[ChainRange]) -> impl Iterator<Item = usize> + '_ {
    ranges.iter().skip(1).map(|r| r.start)
}

pub trait ChainExt {
    fn pdb_seq(&self) -> Vec<&str>;
}

impl ChainExt for Chain {
    fn pdb_seq(&self) -> Vec<&str> {
        // Load the amino acid sequence for each chain
        self.residues().map(|res| res.resn().unwrap_or("X")).collect()
    }
}

/// Get sequences of all chains in the first model of a structure.
pub fn get_sequences(pdb: &PDB) -> HashMap<String, String> {
    pdb.model(0)
        .map(|model| {
            model
                .chains()
                .map(|chain| (chain.id().to_string(), chain.pdb_seq().join("")))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::load_model;
    use nalgebra as na;

    fn record(index: usize, chain: &str) -> ResidueRecord {
        ResidueRecord {
            index,
            chain: chain.to_string(),
            res_no: index as i64 + 1,
            label: format!("ALA {}", index + 1),
            ss_code: String::new(),
            position: na::Point3::origin(),
        }
    }

    #[test]
    fn test_chain_ranges() {
        let residues: Vec<ResidueRecord> = ["A", "A", "B", "B", "B", "A"]
            .iter()
            .enumerate()
            .map(|(i, c)| record(i, c))
            .collect();
        let ranges = chain_ranges(&residues);
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[1], ChainRange { chain: "B".to_string(), start: 2, end: 5 });
        assert_eq!(ranges[2].len(), 1);
        assert!(!ranges[0].is_empty());
        assert_eq!(chain_boundaries(&ranges).collect::<Vec<_>>(), vec![2, 5]);
    }

    #[test]
    fn test_empty() {
        assert!(chain_ranges(&[]).is_empty());
        assert_eq!(chain_boundaries(&[]).count(), 0);
    }

    #[test]
    fn test_pdb_seq() {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = format!("{}/{}", root, "test-data/two_chains.pdb");

        let (pdb, _) = load_model(&path).unwrap();
        let seqs = get_sequences(&pdb);
        assert_eq!(seqs.get("A").map(String::as_str), Some("CRF"));
        assert_eq!(seqs.get("B").map(String::as_str), Some("DC"));
    }
}
