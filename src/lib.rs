//! # Resmap Library
//!
//! This library builds residue-level contact maps for protein structures.
//! Per-chain C-alpha coordinates are flattened into an ordered residue list and
//! an all-vs-all distance matrix, residue pairs are classified into simple
//! interaction categories, and the result is rendered as a heatmap with
//! secondary structure tracks and a navigation minimap.
//!
//! [`ContactMapEngine`] holds one interactive view: it loads coordinates from a
//! [`CoordinateSource`], caches rasters for the current [`RenderParams`], and
//! resolves pointer input to residue pairs. Tabular results are returned as
//! Polars DataFrames.

pub mod chains;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod export;
pub mod interactions;
pub mod matrix;
pub mod render;
pub mod residues;
pub mod settings;
pub mod source;
mod utils;

// Re-export key public types
pub use chains::{chain_ranges, get_sequences, ChainExt, ChainRange};
pub use engine::{ContactMapEngine, EngineState, LoadOutcome, LoadTicket, ResidueEvents};
pub use error::ContactMapError;
pub use export::{encode_png, get_contact_pairs, get_interactions, CSV_DISTANCE_CUTOFF};
pub use interactions::{classify, ClassifiedInteraction, FilterCategory, Interaction};
pub use matrix::{suggested_scale, DistanceMatrix, MAX_RESIDUES};
pub use render::{FilterState, RenderParams, Theme, Thresholds};
pub use residues::{build_residues, ResidueExt, ResidueRecord};
pub use settings::Settings;
pub use source::{ChainBundle, CoordinateSource, FetchError, PdbSource, StaticSource};
pub use utils::{load_model, write_df_to_file, DataFrameFileType};

/// Build the residue list and distance matrix for a set of chain bundles.
///
/// # Arguments
///
/// * `bundles` - One bundle per chain, in the order residues should appear on the map axes
///
/// # Returns
///
/// The ordered residues and their N×N distance matrix, or
/// [`ContactMapError::TooManyResidues`] when the structure exceeds [`MAX_RESIDUES`].
///
/// # Example
///
/// ```no_run
/// use resmap::{get_contact_map, PdbSource};
///
/// let bundles = PdbSource::new("path/to/structure.pdb").read_bundles().unwrap();
/// let (residues, matrix) = get_contact_map(&bundles).unwrap();
/// println!("{} residues, d(0, 1) = {:.2}", residues.len(), matrix.get(0, 1));
/// ```
pub fn get_contact_map(
    bundles: &[ChainBundle],
) -> Result<(Vec<ResidueRecord>, DistanceMatrix), ContactMapError> {
    let residues = build_residues(bundles)?;
    let matrix = DistanceMatrix::build(&residues)?;
    Ok((residues, matrix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_map_from_pdb() {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = format!("{}/{}", root, "test-data/two_chains.pdb");

        let bundles = PdbSource::new(&path).read_bundles().unwrap();
        let (residues, matrix) = get_contact_map(&bundles).unwrap();
        assert_eq!(residues.len(), 5);
        assert_eq!(matrix.size(), 5);
        // CYS 1 (A) to ASP 10 (B) are stacked 5 Å apart
        assert!((matrix.get(0, 3) - 5.0).abs() < 1e-6);
        assert_eq!(residues[3].chain, "B");
        assert_eq!(residues[3].res_no, 10);

        let df = get_interactions(&residues, &matrix).unwrap();
        assert!(df.height() > 0);
    }
}
