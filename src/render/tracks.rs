use super::{fill_rect, map_size, residue_to_pixel};
use crate::chains::ChainRange;
use crate::residues::ResidueRecord;

use image::{Rgba, RgbaImage};

/// Thickness of each secondary structure strip, in pixels.
pub const TRACK_THICKNESS: u32 = 8;

/// Secondary structure strips aligned with the heatmap axes.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryStructureTracks {
    /// Horizontal strip above the map, `size × TRACK_THICKNESS`
    pub top: RgbaImage,
    /// Vertical strip left of the map, `TRACK_THICKNESS × size`
    pub left: RgbaImage,
}

/// Thickness of each chain bar, in pixels.
pub const CHAIN_BAR_THICKNESS: u32 = 4;

/// Chain bar colors, cycled by range order.
const CHAIN_COLORS: [Rgba<u8>; 6] = [
    Rgba([59, 130, 246, 255]),
    Rgba([16, 185, 129, 255]),
    Rgba([245, 158, 11, 255]),
    Rgba([139, 92, 246, 255]),
    Rgba([236, 72, 153, 255]),
    Rgba([20, 184, 166, 255]),
];

/// Per-chain colored bars aligned with the heatmap axes.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainBars {
    /// Horizontal bar above the map, `size × CHAIN_BAR_THICKNESS`
    pub top: RgbaImage,
    /// Vertical bar left of the map, `CHAIN_BAR_THICKNESS × size`
    pub left: RgbaImage,
}

/// Color of the `k`-th chain range.
pub fn chain_color(k: usize) -> Rgba<u8> {
    CHAIN_COLORS[k % CHAIN_COLORS.len()]
}

/// Draw one bar segment per chain range at the heatmap's current scale.
pub fn render_chain_bars(ranges: &[ChainRange], scale: u32) -> ChainBars {
    let scale = scale.max(1);
    let size = map_size(ranges.last().map_or(0, |r| r.end), scale);
    let mut top = RgbaImage::new(size, CHAIN_BAR_THICKNESS);
    let mut left = RgbaImage::new(CHAIN_BAR_THICKNESS, size);

    for (k, range) in ranges.iter().enumerate().filter(|(_, r)| !r.is_empty()) {
        let start = residue_to_pixel(range.start, scale);
        let extent = range.len() as u32 * scale;
        fill_rect(&mut top, start, 0, extent, CHAIN_BAR_THICKNESS, chain_color(k));
        fill_rect(&mut left, 0, start, CHAIN_BAR_THICKNESS, extent, chain_color(k));
    }

    ChainBars { top, left }
}

/// Fill color for a secondary structure code, or `None` for coil.
pub fn ss_color(code: &str) -> Option<Rgba<u8>> {
    match code.chars().next()?.to_ascii_uppercase() {
        // alpha helix
        'H' => Some(Rgba([220, 38, 38, 255])),
        // 3-10 helix
        'G' => Some(Rgba([236, 72, 153, 255])),
        // pi helix
        'I' => Some(Rgba([147, 51, 234, 255])),
        // strand / sheet
        'E' | 'S' => Some(Rgba([234, 179, 8, 255])),
        // isolated bridge
        'B' => Some(Rgba([249, 115, 22, 255])),
        'T' => Some(Rgba([125, 211, 252, 255])),
        _ => None,
    }
}

/// Render both strips at the heatmap's current scale.
pub fn render_tracks(residues: &[ResidueRecord], scale: u32) -> SecondaryStructureTracks {
    let scale = scale.max(1);
    let size = map_size(residues.len(), scale);
    let mut top = RgbaImage::new(size, TRACK_THICKNESS);
    let mut left = RgbaImage::new(TRACK_THICKNESS, size);

    for (i, res) in residues.iter().enumerate() {
        let Some(color) = ss_color(&res.ss_code) else {
            continue;
        };
        let p = residue_to_pixel(i, scale);
        fill_rect(&mut top, p, 0, scale, TRACK_THICKNESS, color);
        fill_rect(&mut left, 0, p, TRACK_THICKNESS, scale, color);
    }

    SecondaryStructureTracks { top, left }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra as na;

    fn residues(codes: &[&str]) -> Vec<ResidueRecord> {
        codes
            .iter()
            .enumerate()
            .map(|(i, c)| ResidueRecord {
                index: i,
                chain: "A".to_string(),
                res_no: i as i64 + 1,
                label: format!("GLY {}", i + 1),
                ss_code: c.to_string(),
                position: na::Point3::origin(),
            })
            .collect()
    }

    #[test]
    fn test_codes() {
        assert_eq!(ss_color("h"), ss_color("H"));
        assert!(ss_color("E").is_some());
        assert_eq!(ss_color("S"), ss_color("E"));
        assert!(ss_color("C").is_none());
        assert!(ss_color("").is_none());
        assert_ne!(ss_color("H"), ss_color("G"));
    }

    #[test]
    fn test_tracks_follow_scale() {
        let res = residues(&["H", "C", "E"]);
        for scale in [1, 3, 7] {
            let tracks = render_tracks(&res, scale);
            assert_eq!(tracks.top.dimensions(), (3 * scale, TRACK_THICKNESS));
            assert_eq!(tracks.left.dimensions(), (TRACK_THICKNESS, 3 * scale));

            let last = 3 * scale - 1;
            assert_eq!(Some(*tracks.top.get_pixel(0, 0)), ss_color("H"));
            assert_eq!(tracks.top.get_pixel(scale, 0)[3], 0);
            assert_eq!(Some(*tracks.top.get_pixel(last, TRACK_THICKNESS - 1)), ss_color("E"));
            assert_eq!(Some(*tracks.left.get_pixel(0, last)), ss_color("E"));
        }
    }

    #[test]
    fn test_chain_bar_extents() {
        let ranges = vec![
            ChainRange { chain: "A".to_string(), start: 0, end: 3 },
            ChainRange { chain: "B".to_string(), start: 3, end: 5 },
        ];
        for scale in [2, 5] {
            let bars = render_chain_bars(&ranges, scale);
            assert_eq!(bars.top.dimensions(), (5 * scale, CHAIN_BAR_THICKNESS));
            assert_eq!(bars.left.dimensions(), (CHAIN_BAR_THICKNESS, 5 * scale));

            // Chain A covers [0, 3 * scale), chain B the rest
            assert_eq!(*bars.top.get_pixel(0, 0), chain_color(0));
            assert_eq!(*bars.top.get_pixel(3 * scale - 1, 0), chain_color(0));
            assert_eq!(*bars.top.get_pixel(3 * scale, 0), chain_color(1));
            assert_eq!(*bars.top.get_pixel(5 * scale - 1, CHAIN_BAR_THICKNESS - 1), chain_color(1));
            assert_eq!(*bars.left.get_pixel(0, 3 * scale - 1), chain_color(0));
            assert_eq!(*bars.left.get_pixel(CHAIN_BAR_THICKNESS - 1, 3 * scale), chain_color(1));
        }
        assert_ne!(chain_color(0), chain_color(1));
        assert_eq!(render_chain_bars(&[], 4).top.width(), 0);
    }
}
