use crate::error::ContactMapError;
use crate::interactions::classify;
use crate::matrix::DistanceMatrix;
use crate::residues::ResidueRecord;

use image::{ImageFormat, RgbaImage};
use polars::prelude::*;
use std::io::{Cursor, Write};
use tracing::{debug, info};

/// Residue pairs further apart than this are left out of the distance CSV, in Å.
pub const CSV_DISTANCE_CUTOFF: f64 = 15.0;

/// Pairwise residue distances up to `cutoff` as a DataFrame.
///
/// One row per pair `(i, j)` with `i <= j`, in matrix order, with columns
/// `Chain1, ResNo1, Residue1, Chain2, ResNo2, Residue2, Distance(A)`.
pub fn get_contact_pairs(
    residues: &[ResidueRecord],
    matrix: &DistanceMatrix,
    cutoff: f64,
) -> Result<DataFrame, ContactMapError> {
    let pairs: Vec<(usize, usize, f64)> = matrix
        .pairs_within(cutoff)
        .filter(|&(i, j, _)| i < residues.len() && j < residues.len())
        .collect();
    debug!("{} residue pairs within {cutoff} Å", pairs.len());

    let df = df!(
        "Chain1" => pairs.iter().map(|p| residues[p.0].chain.to_owned()).collect::<Vec<String>>(),
        "ResNo1" => pairs.iter().map(|p| residues[p.0].res_no).collect::<Vec<i64>>(),
        "Residue1" => pairs.iter().map(|p| residues[p.0].resn()).collect::<Vec<String>>(),
        "Chain2" => pairs.iter().map(|p| residues[p.1].chain.to_owned()).collect::<Vec<String>>(),
        "ResNo2" => pairs.iter().map(|p| residues[p.1].res_no).collect::<Vec<i64>>(),
        "Residue2" => pairs.iter().map(|p| residues[p.1].resn()).collect::<Vec<String>>(),
        "Distance(A)" => pairs.iter().map(|p| p.2).collect::<Vec<f64>>(),
    )?;
    Ok(df)
}

/// Write the distance CSV for the standard cutoff; returns the number of data rows.
pub fn write_contact_csv<W: Write>(
    writer: W,
    residues: &[ResidueRecord],
    matrix: &DistanceMatrix,
) -> Result<usize, ContactMapError> {
    let mut df = get_contact_pairs(residues, matrix, CSV_DISTANCE_CUTOFF)?;
    CsvWriter::new(writer)
        .include_header(true)
        .with_float_precision(Some(3))
        .finish(&mut df)?;
    info!("Exported {} residue pairs", df.height());
    Ok(df.height())
}

/// Every classified residue pair with `i < j`.
///
/// Columns: from_chain, from_resn, from_resi, to_chain, to_resn, to_resi,
/// distance, interaction.
pub fn get_interactions(
    residues: &[ResidueRecord],
    matrix: &DistanceMatrix,
) -> Result<DataFrame, ContactMapError> {
    let n = residues.len().min(matrix.size());
    let mut found = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let d = matrix.get(i, j);
            if let Some(c) = classify(&residues[i].label, &residues[j].label, d) {
                found.push((i, j, d, c.interaction));
            }
        }
    }
    debug!("Classified {} residue pairs", found.len());

    let df = df!(
        "from_chain" => found.iter().map(|x| residues[x.0].chain.to_owned()).collect::<Vec<String>>(),
        "from_resn" => found.iter().map(|x| residues[x.0].resn()).collect::<Vec<String>>(),
        "from_resi" => found.iter().map(|x| residues[x.0].res_no).collect::<Vec<i64>>(),
        "to_chain" => found.iter().map(|x| residues[x.1].chain.to_owned()).collect::<Vec<String>>(),
        "to_resn" => found.iter().map(|x| residues[x.1].resn()).collect::<Vec<String>>(),
        "to_resi" => found.iter().map(|x| residues[x.1].res_no).collect::<Vec<i64>>(),
        "distance" => found.iter().map(|x| x.2 as f32).collect::<Vec<f32>>(),
        "interaction" => found.iter().map(|x| x.3.to_string()).collect::<Vec<String>>(),
    )?;
    Ok(df)
}

/// Encode a raster as PNG bytes, pixel for pixel.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, ContactMapError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::residues::build_residues;
    use crate::source::ChainBundle;

    fn fixture() -> (Vec<ResidueRecord>, DistanceMatrix) {
        let bundle = ChainBundle {
            chain: Some("A".to_string()),
            x: vec![0.0, 3.0, 6.0],
            y: vec![0.0, 4.0, 0.0],
            z: vec![0.0; 3],
            labels: vec!["ARG 10".into(), "GLY 11".into(), "ASP 12".into()],
            ss: vec![],
        };
        let residues = build_residues(&[bundle]).unwrap();
        let matrix = DistanceMatrix::build(&residues).unwrap();
        (residues, matrix)
    }

    #[test]
    fn test_csv_rows_and_format() {
        let (residues, matrix) = fixture();
        let mut buf = Vec::new();
        let rows = write_contact_csv(&mut buf, &residues, &matrix).unwrap();
        assert_eq!(rows, 6);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Chain1,ResNo1,Residue1,Chain2,ResNo2,Residue2,Distance(A)");
        assert_eq!(lines[1], "A,10,ARG,A,10,ARG,0.000");
        assert_eq!(lines[2], "A,10,ARG,A,11,GLY,5.000");
        assert_eq!(lines[3], "A,10,ARG,A,12,ASP,6.000");
    }

    #[test]
    fn test_cutoff_drops_far_pairs() {
        let (residues, matrix) = fixture();
        let df = get_contact_pairs(&residues, &matrix, 5.5).unwrap();
        // Three diagonal entries plus the two 5 Å neighbours
        assert_eq!(df.height(), 5);
        assert_eq!(df.get_column_names().len(), 7);
    }

    #[test]
    fn test_interaction_table() {
        let (residues, matrix) = fixture();
        let df = get_interactions(&residues, &matrix).unwrap();
        // ARG 10 / ASP 12 at 6 Å is a salt bridge; GLY pairs are 5 Å apart, so not close contacts
        assert_eq!(df.height(), 1);
        let kind = df.column("interaction").unwrap().str().unwrap().get(0);
        assert_eq!(kind, Some("Salt Bridge"));
    }

    #[test]
    fn test_png_signature() {
        let img = RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
        let bytes = encode_png(&img).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded, img);
    }
}
