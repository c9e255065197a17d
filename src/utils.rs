use crate::error::ContactMapError;
use crate::residues::ResidueExt;
use pdbtbx::*;
use polars::prelude::*;
use std::path::Path;

/// Open an atomic data file with [`pdbtbx::ReadOptions`] and remove non-protein residues.
///
/// Breaking parse errors are returned as [`ContactMapError::Structure`]; anything
/// less severe is handed back alongside the structure for the caller to log.
pub fn load_model(input_file: &String) -> Result<(PDB, Vec<PDBError>), ContactMapError> {
    // Load file as complex structure
    let (mut pdb, errors) = pdbtbx::ReadOptions::default()
        .set_only_atomic_coords(true)
        .set_level(pdbtbx::StrictnessLevel::Loose)
        .read(input_file)
        .map_err(|errs| {
            ContactMapError::Structure(
                errs.iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;

    // Remove non-protein residues from model
    pdb.remove_residues_by(|res| res.resn().is_none());

    Ok((pdb, errors))
}

/// Write a DataFrame to `file_path`, replacing its extension with the format's suffix.
pub fn write_df_to_file(
    df: &mut DataFrame,
    file_path: &Path,
    file_type: DataFrameFileType,
) -> Result<(), ContactMapError> {
    let file_suffix = file_type.to_string();
    let mut file = std::fs::File::create(file_path.with_extension(file_suffix))?;
    match file_type {
        DataFrameFileType::Csv => {
            CsvWriter::new(&mut file)
                .with_float_precision(Some(3))
                .finish(df)?;
        }
        DataFrameFileType::Parquet => {
            ParquetWriter::new(&mut file).finish(df)?;
        }
        DataFrameFileType::Json => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::Json)
                .finish(df)?;
        }
        DataFrameFileType::NDJson => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::JsonLines)
                .finish(df)?;
        }
    }
    Ok(())
}

/// File format for writing DataFrames.
#[derive(clap::ValueEnum, Clone, Debug, Copy)]
pub enum DataFrameFileType {
    /// Comma-separated values
    Csv,
    /// Parquet columnar storage
    Parquet,
    /// Standard JSON
    Json,
    /// Newline-delimited JSON
    NDJson,
}

impl std::fmt::Display for DataFrameFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataFrameFileType::Csv => write!(f, "csv"),
            DataFrameFileType::Parquet => write!(f, "parquet"),
            DataFrameFileType::Json => write!(f, "json"),
            DataFrameFileType::NDJson => write!(f, "ndjson"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_keeps_protein_residues() {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = format!("{}/{}", root, "test-data/two_chains.pdb");

        let (pdb, _) = load_model(&path).unwrap();
        assert_eq!(pdb.chain_count(), 2);
        assert_eq!(pdb.residue_count(), 5);
        assert!(pdb.residues().all(|r| r.resn().is_some()));
    }

    #[test]
    fn test_missing_file() {
        let path = "does/not/exist.pdb".to_string();
        assert!(matches!(load_model(&path), Err(ContactMapError::Structure(_))));
    }

    #[test]
    fn test_write_replaces_extension() {
        let mut df = df!(
            "chain" => ["A", "B"],
            "distance" => [1.23456_f64, 7.0],
        )
        .unwrap();
        let dir = std::env::temp_dir().join("resmap-utils-test");
        std::fs::create_dir_all(&dir).unwrap();
        let target = dir.join("pairs.out");

        write_df_to_file(&mut df, &target, DataFrameFileType::Csv).unwrap();
        let written = std::fs::read_to_string(dir.join("pairs.csv")).unwrap();
        assert_eq!(written, "chain,distance\nA,1.235\nB,7.000\n");

        write_df_to_file(&mut df, &target, DataFrameFileType::NDJson).unwrap();
        let written = std::fs::read_to_string(dir.join("pairs.ndjson")).unwrap();
        assert_eq!(written.lines().count(), 2);
    }
}
