use super::{fill_rect, map_size, residue_to_pixel, FilterState, RenderParams, GRID_SPACING};
use crate::chains::{chain_boundaries, chain_ranges};
use crate::interactions::classify;
use crate::matrix::DistanceMatrix;
use crate::residues::ResidueRecord;

use image::{Rgba, RgbaImage};
use tracing::debug;

/// Render the contact heatmap.
///
/// Layers, bottom to top: background, gridlines every [`GRID_SPACING`]
/// residues (when enabled), the diagonal, chain boundaries, contact cells.
/// Each accepted pair `(i, j)` with `i <= j` fills the cell whose top-left
/// pixel is `(j * scale, i * scale)` and its mirror.
pub fn render_heatmap(
    matrix: &DistanceMatrix,
    residues: &[ResidueRecord],
    params: &RenderParams,
) -> RgbaImage {
    let n = matrix.size().min(residues.len());
    let scale = params.scale.max(1);
    let size = map_size(n, scale);
    let palette = params.theme.palette();

    let mut img = RgbaImage::from_pixel(size, size, palette.background);

    if params.show_grid {
        for k in (GRID_SPACING..n).step_by(GRID_SPACING) {
            let p = residue_to_pixel(k, scale);
            fill_rect(&mut img, p, 0, 1, size, palette.grid);
            fill_rect(&mut img, 0, p, size, 1, palette.grid);
        }
    }

    for p in 0..size {
        img.put_pixel(p, p, palette.diagonal);
    }

    let ranges = chain_ranges(&residues[..n]);
    for k in chain_boundaries(&ranges) {
        let p = residue_to_pixel(k, scale);
        fill_rect(&mut img, p, 0, 1, size, palette.chain_separator);
        fill_rect(&mut img, 0, p, size, 1, palette.chain_separator);
    }

    let mut n_cells = 0usize;
    for i in 0..n {
        for j in i..n {
            if !params.show_intra_chain && residues[i].chain == residues[j].chain {
                continue;
            }
            let Some(color) = cell_color(matrix.get(i, j), &residues[i], &residues[j], params) else {
                continue;
            };
            let (x, y) = (residue_to_pixel(j, scale), residue_to_pixel(i, scale));
            fill_rect(&mut img, x, y, scale, scale, color);
            fill_rect(&mut img, y, x, scale, scale, color);
            n_cells += 1;
        }
    }
    debug!("Rendered {size}x{size} heatmap with {n_cells} contact cells");

    img
}

/// Color of one cell, or `None` when the pair is not drawn.
pub fn cell_color(
    distance: f64,
    res1: &ResidueRecord,
    res2: &ResidueRecord,
    params: &RenderParams,
) -> Option<Rgba<u8>> {
    match &params.filter {
        FilterState::ShowAll => {
            let palette = params.theme.palette();
            if distance > params.thresholds.proximal {
                None
            } else if distance < params.thresholds.contact {
                Some(palette.close)
            } else {
                Some(palette.proximal)
            }
        }
        FilterState::CategorySet(_) => classify(&res1.label, &res2.label, distance)
            .filter(|c| params.filter.accepts(c.interaction))
            .map(|c| c.color),
    }
}
