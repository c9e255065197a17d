//! Raster rendering of contact maps.
//!
//! Every renderer here is a pure function of its inputs: the distance matrix,
//! the residue list and an immutable [`RenderParams`]. Callers cache the
//! returned rasters and re-render whenever any input changes.

pub mod heatmap;
pub mod minimap;
pub mod overlay;
pub mod tracks;

pub use heatmap::render_heatmap;
pub use minimap::{jump_to, viewport_rect, Minimap, ScrollState, ViewportRect, MINIMAP_SIZE};
pub use overlay::{HoverInfo, InteractionOverlay, ResiduePair};
pub use tracks::{
    chain_color, render_chain_bars, render_tracks, ss_color, ChainBars, SecondaryStructureTracks,
    CHAIN_BAR_THICKNESS, TRACK_THICKNESS,
};

use crate::interactions::{FilterCategory, Interaction};
use crate::matrix::{MAX_SCALE, MIN_SCALE};

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

/// Gridlines are drawn every this many residues.
pub const GRID_SPACING: usize = 25;

/// Largest heatmap edge, in pixels. Zoom is reduced for big structures to stay under it.
pub const MAX_MAP_EDGE: u32 = 8192;

pub const CONTACT_RANGE: (f64, f64) = (3.0, 12.0);
pub const PROXIMAL_RANGE: (f64, f64) = (5.0, 20.0);

/// Distance cutoffs for the two heatmap color buckets, in Å.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Pairs closer than this use the "close" color
    pub contact: f64,
    /// Pairs up to this distance use the "proximal" color
    pub proximal: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            contact: 8.0,
            proximal: 12.0,
        }
    }
}

impl Thresholds {
    /// Build thresholds, clamping each value into its allowed range.
    pub fn new(contact: f64, proximal: f64) -> Self {
        let t = Self {
            contact: contact.clamp(CONTACT_RANGE.0, CONTACT_RANGE.1),
            proximal: proximal.clamp(PROXIMAL_RANGE.0, PROXIMAL_RANGE.1),
        };
        if !t.is_ordered() {
            warn!(
                "Contact threshold {} is not below proximal threshold {}; no proximal band will be drawn",
                t.contact, t.proximal
            );
        }
        t
    }

    /// Re-apply the allowed ranges, e.g. after deserializing.
    pub fn clamped(self) -> Self {
        Self::new(self.contact, self.proximal)
    }

    pub fn is_ordered(&self) -> bool {
        self.contact < self.proximal
    }
}

/// A non-empty set of interaction categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FilterCategory>", into = "Vec<FilterCategory>")]
pub struct CategorySet(BTreeSet<FilterCategory>);

impl CategorySet {
    /// Returns `None` when no category is given.
    pub fn new(categories: impl IntoIterator<Item = FilterCategory>) -> Option<Self> {
        let set: BTreeSet<FilterCategory> = categories.into_iter().collect();
        (!set.is_empty()).then_some(Self(set))
    }

    pub fn contains(&self, category: FilterCategory) -> bool {
        self.0.contains(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = FilterCategory> + '_ {
        self.0.iter().copied()
    }
}

impl TryFrom<Vec<FilterCategory>> for CategorySet {
    type Error = String;

    fn try_from(categories: Vec<FilterCategory>) -> Result<Self, Self::Error> {
        Self::new(categories).ok_or_else(|| "category filter needs at least one category".to_string())
    }
}

impl From<CategorySet> for Vec<FilterCategory> {
    fn from(set: CategorySet) -> Self {
        set.0.into_iter().collect()
    }
}

/// Which residue pairs the heatmap shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "categories", rename_all = "kebab-case")]
pub enum FilterState {
    /// Distance buckets for every pair
    #[default]
    ShowAll,
    /// Only pairs classified into one of these categories
    CategorySet(CategorySet),
}

impl FilterState {
    /// Build a filter from a list of categories; an empty list shows everything.
    pub fn from_categories(categories: impl IntoIterator<Item = FilterCategory>) -> Self {
        CategorySet::new(categories).map_or(FilterState::ShowAll, FilterState::CategorySet)
    }

    /// Whether a classified pair passes the filter in category mode.
    pub fn accepts(&self, interaction: Interaction) -> bool {
        match self {
            FilterState::ShowAll => true,
            FilterState::CategorySet(set) => interaction
                .filter_category()
                .is_some_and(|c| set.contains(c)),
        }
    }
}

/// Color theme of the rendered canvases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Theme-dependent colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgba<u8>,
    pub grid: Rgba<u8>,
    pub diagonal: Rgba<u8>,
    pub chain_separator: Rgba<u8>,
    pub close: Rgba<u8>,
    pub proximal: Rgba<u8>,
    pub minimap_diagonal: Rgba<u8>,
    pub viewport: Rgba<u8>,
    pub crosshair: Rgba<u8>,
    pub cell_outline: Rgba<u8>,
}

impl Theme {
    pub fn palette(&self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: Rgba([255, 255, 255, 255]),
                grid: Rgba([229, 231, 235, 255]),
                diagonal: Rgba([156, 163, 175, 255]),
                chain_separator: Rgba([55, 65, 81, 255]),
                close: Rgba([37, 99, 235, 255]),
                proximal: Rgba([147, 197, 253, 255]),
                minimap_diagonal: Rgba([209, 213, 219, 255]),
                viewport: Rgba([220, 38, 38, 255]),
                crosshair: Rgba([250, 204, 21, 70]),
                cell_outline: Rgba([17, 24, 39, 255]),
            },
            Theme::Dark => Palette {
                background: Rgba([17, 24, 39, 255]),
                grid: Rgba([31, 41, 55, 255]),
                diagonal: Rgba([75, 85, 99, 255]),
                chain_separator: Rgba([209, 213, 219, 255]),
                close: Rgba([96, 165, 250, 255]),
                proximal: Rgba([30, 64, 175, 255]),
                minimap_diagonal: Rgba([55, 65, 81, 255]),
                viewport: Rgba([248, 113, 113, 255]),
                crosshair: Rgba([250, 204, 21, 60]),
                cell_outline: Rgba([255, 255, 255, 255]),
            },
        }
    }
}

/// Everything besides the matrix that determines a heatmap raster.
///
/// The zoom is derived from the structure on every load, so it is not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    /// Pixels per residue
    #[serde(skip)]
    pub scale: u32,
    pub theme: Theme,
    pub show_grid: bool,
    /// When false, pairs within the same chain are left blank
    pub show_intra_chain: bool,
    pub thresholds: Thresholds,
    pub filter: FilterState,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            scale: MIN_SCALE,
            theme: Theme::Light,
            show_grid: false,
            show_intra_chain: true,
            thresholds: Thresholds::default(),
            filter: FilterState::ShowAll,
        }
    }
}

impl RenderParams {
    /// Bring scale and thresholds back into their allowed ranges.
    pub fn normalized(mut self) -> Self {
        self.scale = clamp_scale(self.scale);
        self.thresholds = self.thresholds.clamped();
        self
    }
}

pub fn clamp_scale(scale: u32) -> u32 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Largest zoom that keeps a map of `n` residues within [`MAX_MAP_EDGE`].
pub fn max_scale_for(n: usize) -> u32 {
    let n = u32::try_from(n).unwrap_or(u32::MAX).max(1);
    MAX_SCALE.min(MAX_MAP_EDGE / n).max(MIN_SCALE)
}

/// Clamp a zoom to the allowed range for a map of `n` residues.
pub fn clamp_scale_for(scale: u32, n: usize) -> u32 {
    clamp_scale(scale).min(max_scale_for(n))
}

/// Edge length in pixels of a map of `n` residues.
pub fn map_size(n: usize, scale: u32) -> u32 {
    n as u32 * scale
}

/// Top-left pixel coordinate of a residue's row or column.
pub fn residue_to_pixel(index: usize, scale: u32) -> u32 {
    index as u32 * scale
}

/// Residue index under a pixel coordinate, `floor(pixel / scale)`.
///
/// Returns `None` for negative coordinates or ones past the last residue.
pub fn pixel_to_residue(pixel: f64, scale: u32, n: usize) -> Option<usize> {
    if pixel < 0.0 || scale == 0 {
        return None;
    }
    let index = (pixel / f64::from(scale)).floor() as usize;
    (index < n).then_some(index)
}

/// Fill an axis-aligned rectangle, clipped to the image.
pub(crate) fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    let x_end = x.saturating_add(w).min(img.width());
    let y_end = y.saturating_add(h).min(img.height());
    for py in y.min(y_end)..y_end {
        for px in x.min(x_end)..x_end {
            img.put_pixel(px, py, color);
        }
    }
}

/// Outline an axis-aligned rectangle with one-pixel lines, clipped to the image.
pub(crate) fn stroke_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    if w == 0 || h == 0 {
        return;
    }
    fill_rect(img, x, y, w, 1, color);
    fill_rect(img, x, y + h - 1, w, 1, color);
    fill_rect(img, x, y, 1, h, color);
    fill_rect(img, x + w - 1, y, 1, h, color);
}

/// Linear mix of two colors; `t = 0` gives `a`.
pub(crate) fn blend(a: Rgba<u8>, b: Rgba<u8>, t: f32) -> Rgba<u8> {
    let mix = |x: u8, y: u8| (f32::from(x) * (1.0 - t) + f32::from(y) * t).round() as u8;
    Rgba([
        mix(a[0], b[0]),
        mix(a[1], b[1]),
        mix(a[2], b[2]),
        mix(a[3], b[3]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_clamped() {
        let t = Thresholds::new(1.0, 50.0);
        assert_eq!(t, Thresholds { contact: 3.0, proximal: 20.0 });
        let t = Thresholds::new(12.0, 6.0);
        assert!(!t.is_ordered());
    }

    #[test]
    fn test_category_set_non_empty() {
        assert!(CategorySet::new([]).is_none());
        assert_eq!(FilterState::from_categories([]), FilterState::ShowAll);
        let f = FilterState::from_categories([FilterCategory::SaltBridge]);
        assert!(f.accepts(Interaction::SaltBridge));
        assert!(!f.accepts(Interaction::DisulfideBond));
        assert!(!f.accepts(Interaction::CloseContact));
        assert!(FilterState::ShowAll.accepts(Interaction::CationPi));
    }

    #[test]
    fn test_filter_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            filter: FilterState,
        }
        let w: Wrapper =
            toml::from_str("filter = { mode = \"category-set\", categories = [\"disulfide\", \"pi-stacking\"] }")
                .unwrap();
        match w.filter {
            FilterState::CategorySet(set) => {
                assert_eq!(
                    set.iter().collect::<Vec<_>>(),
                    vec![FilterCategory::Disulfide, FilterCategory::PiStacking]
                );
            }
            FilterState::ShowAll => panic!("Expected a category filter"),
        }
        assert!(toml::from_str::<Wrapper>(
            "filter = { mode = \"category-set\", categories = [] }"
        )
        .is_err());
    }

    #[test]
    fn test_pixel_mapping() {
        assert_eq!(pixel_to_residue(0.0, 4, 10), Some(0));
        assert_eq!(pixel_to_residue(3.99, 4, 10), Some(0));
        assert_eq!(pixel_to_residue(4.0, 4, 10), Some(1));
        assert_eq!(pixel_to_residue(40.0, 4, 10), None);
        assert_eq!(pixel_to_residue(-0.5, 4, 10), None);
        assert_eq!(residue_to_pixel(3, 4), 12);
        assert_eq!(map_size(10, 4), 40);
    }

    #[test]
    fn test_scale_bounded_by_map_edge() {
        assert_eq!(max_scale_for(0), MAX_SCALE);
        assert_eq!(max_scale_for(100), MAX_SCALE);
        assert_eq!(max_scale_for(3000), 2);
        assert_eq!(clamp_scale_for(20, 3000), 2);
        assert_eq!(clamp_scale_for(0, 3000), MIN_SCALE);
        assert!(map_size(3000, max_scale_for(3000)) <= MAX_MAP_EDGE);
        assert_eq!(max_scale_for(usize::MAX), MIN_SCALE);
    }

    #[test]
    fn test_blend() {
        let a = Rgba([0, 0, 0, 255]);
        let b = Rgba([200, 100, 50, 255]);
        assert_eq!(blend(a, b, 0.5), Rgba([100, 50, 25, 255]));
        assert_eq!(blend(a, b, 0.0), a);
    }
}
