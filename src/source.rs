//! Coordinate providers for the contact map engine.
//!
//! The engine never parses structures itself. It asks a [`CoordinateSource`]
//! for one [`ChainBundle`] per chain and builds everything else from those.

use crate::chains::get_sequences;
use crate::residues::ResidueExt;
use crate::utils::load_model;

use core::fmt;
use pdbtbx::*;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Per-chain coordinate arrays, aligned by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainBundle {
    /// Chain identifier. When `None` it is recovered from a `CHAIN:` label prefix.
    pub chain: Option<String>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    /// Residue labels such as `"ALA 12"` or `"A:ALA 12"`
    pub labels: Vec<String>,
    /// Secondary structure codes, one per residue
    pub ss: Vec<String>,
}

impl ChainBundle {
    /// Number of complete residues in the bundle.
    ///
    /// Arrays of unequal length are truncated to the shortest coordinate/label
    /// array; missing secondary structure codes are treated as coil.
    pub fn len(&self) -> usize {
        self.x
            .len()
            .min(self.y.len())
            .min(self.z.len())
            .min(self.labels.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn is_aligned(&self) -> bool {
        let n = self.x.len();
        self.y.len() == n && self.z.len() == n && self.labels.len() == n
    }
}

/// Failure reported by a [`CoordinateSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError(pub String);

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for FetchError {}

/// Asynchronous provider of per-chain residue coordinates.
pub trait CoordinateSource {
    fn fetch_chains(&self) -> impl Future<Output = Result<Vec<ChainBundle>, FetchError>>;
}

/// Reads CA coordinates from a PDB or mmCIF file.
#[derive(Debug, Clone)]
pub struct PdbSource {
    path: PathBuf,
}

impl PdbSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the structure and collect one bundle per chain of the first model.
    pub fn read_bundles(&self) -> Result<Vec<ChainBundle>, FetchError> {
        let input_file = self.path.to_string_lossy().to_string();
        let (pdb, pdb_warnings) = load_model(&input_file).map_err(|e| FetchError(e.to_string()))?;
        for e in &pdb_warnings {
            warn!("{e}");
        }
        for (chain, seq) in get_sequences(&pdb) {
            debug!(">{chain}\n{seq}");
        }
        Ok(pdb_to_bundles(&pdb))
    }
}

impl CoordinateSource for PdbSource {
    fn fetch_chains(&self) -> impl Future<Output = Result<Vec<ChainBundle>, FetchError>> {
        let bundles = self.read_bundles();
        async move { bundles }
    }
}

/// Convert the first model of a structure into chain bundles.
///
/// Each residue is placed at its CA atom; residues without one are skipped.
pub fn pdb_to_bundles(pdb: &PDB) -> Vec<ChainBundle> {
    let Some(model) = pdb.model(0) else {
        return Vec::new();
    };

    model
        .chains()
        .filter_map(|chain| {
            let mut bundle = ChainBundle {
                chain: Some(chain.id().to_string()),
                ..Default::default()
            };
            for residue in chain.residues() {
                let Some(ca) = residue.alpha_carbon() else {
                    debug!(
                        "Skipping residue {} {} in chain {}: no CA atom",
                        residue.name().unwrap_or("?"),
                        residue.serial_number(),
                        chain.id()
                    );
                    continue;
                };
                let (x, y, z) = ca.pos();
                bundle.x.push(x);
                bundle.y.push(y);
                bundle.z.push(z);
                bundle.labels.push(format!(
                    "{} {}",
                    residue.name().unwrap_or("UNK"),
                    residue.serial_number()
                ));
                bundle.ss.push("C".to_string());
            }
            (!bundle.is_empty()).then_some(bundle)
        })
        .collect()
}

/// In-memory source, handy for embedding callers that already hold coordinates.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub bundles: Vec<ChainBundle>,
}

impl CoordinateSource for StaticSource {
    fn fetch_chains(&self) -> impl Future<Output = Result<Vec<ChainBundle>, FetchError>> {
        let bundles = self.bundles.clone();
        async move { Ok(bundles) }
    }
}
