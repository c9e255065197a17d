use super::{fill_rect, map_size, pixel_to_residue, residue_to_pixel, stroke_rect, Theme};
use crate::interactions::{classify, ClassifiedInteraction};
use crate::matrix::DistanceMatrix;
use crate::residues::ResidueRecord;

use core::fmt;
use image::RgbaImage;

/// The two residues of a clicked cell, as reported to the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResiduePair {
    pub chain_a: String,
    pub res_a: i64,
    pub chain_b: String,
    pub res_b: i64,
}

/// Tooltip content for the hovered cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverInfo {
    /// Row residue index
    pub i: usize,
    /// Column residue index
    pub j: usize,
    pub residue_a: String,
    pub residue_b: String,
    pub distance: f64,
    pub interaction: Option<ClassifiedInteraction>,
}

impl fmt::Display for HoverInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{a} / {b}: {d:.2} Å",
            a = self.residue_a,
            b = self.residue_b,
            d = self.distance
        )?;
        if let Some(intxn) = &self.interaction {
            write!(f, " ({intxn})")?;
        }
        Ok(())
    }
}

/// Pointer state over the heatmap: crosshair, cell outline, tooltip and clicks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionOverlay {
    hovered: Option<(usize, usize)>,
}

impl InteractionOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// The hovered `(row, column)` cell.
    pub fn hovered(&self) -> Option<(usize, usize)> {
        self.hovered
    }

    /// Resolve the pointer position to a cell. Positions outside the map clear the hover.
    pub fn pointer_move(&mut self, x: f64, y: f64, scale: u32, n: usize) -> Option<(usize, usize)> {
        self.hovered = pixel_to_residue(y, scale, n).zip(pixel_to_residue(x, scale, n));
        self.hovered
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = None;
    }

    /// Transparent layer the size of the heatmap with the hovered row and
    /// column highlighted and the hovered cell outlined.
    pub fn render(&self, n: usize, scale: u32, theme: Theme) -> RgbaImage {
        let scale = scale.max(1);
        let size = map_size(n, scale);
        let mut img = RgbaImage::new(size, size);
        let Some((i, j)) = self.hovered.filter(|&(i, j)| i < n && j < n) else {
            return img;
        };

        let palette = theme.palette();
        let (x, y) = (residue_to_pixel(j, scale), residue_to_pixel(i, scale));
        fill_rect(&mut img, 0, y, size, scale, palette.crosshair);
        fill_rect(&mut img, x, 0, scale, size, palette.crosshair);
        stroke_rect(&mut img, x, y, scale, scale, palette.cell_outline);
        img
    }

    /// Live distance and classification for the hovered pair.
    pub fn tooltip(&self, residues: &[ResidueRecord], matrix: &DistanceMatrix) -> Option<HoverInfo> {
        let (i, j) = self.hovered?;
        let (a, b) = (residues.get(i)?, residues.get(j)?);
        if i >= matrix.size() || j >= matrix.size() {
            return None;
        }
        let distance = matrix.get(i, j);
        Some(HoverInfo {
            i,
            j,
            residue_a: format!("{}:{}", a.chain, a.label),
            residue_b: format!("{}:{}", b.chain, b.label),
            distance,
            interaction: classify(&a.label, &b.label, distance),
        })
    }

    /// The residue pair under the pointer, or `None` when nothing is hovered.
    pub fn click(&self, residues: &[ResidueRecord]) -> Option<ResiduePair> {
        let (i, j) = self.hovered?;
        let (a, b) = (residues.get(i)?, residues.get(j)?);
        Some(ResiduePair {
            chain_a: a.chain.clone(),
            res_a: a.res_no,
            chain_b: b.chain.clone(),
            res_b: b.res_no,
        })
    }
}
