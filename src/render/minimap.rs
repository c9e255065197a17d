//! Fixed-size overview of the whole map with a tracking viewport rectangle.

use super::{blend, stroke_rect, Theme, Thresholds};
use crate::matrix::DistanceMatrix;

use image::RgbaImage;

/// Edge length of the minimap, in pixels.
pub const MINIMAP_SIZE: u32 = 150;

/// Scroll position and visible size of the container holding the heatmap,
/// in heatmap pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    pub scroll_left: f64,
    pub scroll_top: f64,
    pub client_width: f64,
    pub client_height: f64,
}

/// The visible region, in minimap pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Downsampled overview raster, independent of the heatmap zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimap {
    image: RgbaImage,
    theme: Theme,
}

impl Minimap {
    /// Nearest-neighbor sample the matrix at `step = N / MINIMAP_SIZE` using the
    /// close / proximal / background buckets, plus a faint diagonal.
    pub fn build(matrix: &DistanceMatrix, thresholds: &Thresholds, theme: Theme) -> Self {
        let palette = theme.palette();
        let mut image = RgbaImage::from_pixel(MINIMAP_SIZE, MINIMAP_SIZE, palette.background);
        let n = matrix.size();
        if n == 0 {
            return Self { image, theme };
        }

        let step = n as f64 / f64::from(MINIMAP_SIZE);
        let sample = |p: u32| ((f64::from(p) * step).floor() as usize).min(n - 1);
        for py in 0..MINIMAP_SIZE {
            let i = sample(py);
            for px in 0..MINIMAP_SIZE {
                let d = matrix.get(i, sample(px));
                let mut color = if d < thresholds.contact {
                    palette.close
                } else if d <= thresholds.proximal {
                    palette.proximal
                } else {
                    palette.background
                };
                if px == py {
                    color = blend(color, palette.minimap_diagonal, 0.5);
                }
                image.put_pixel(px, py, color);
            }
        }

        Self { image, theme }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Copy of the overview with the viewport rectangle drawn on top.
    pub fn with_viewport(&self, rect: &ViewportRect) -> RgbaImage {
        let mut img = self.image.clone();
        let x = rect.x.round().max(0.0) as u32;
        let y = rect.y.round().max(0.0) as u32;
        let w = (rect.w.round() as u32).max(1);
        let h = (rect.h.round() as u32).max(1);
        stroke_rect(
            &mut img,
            x.min(MINIMAP_SIZE - 1),
            y.min(MINIMAP_SIZE - 1),
            w.min(MINIMAP_SIZE - x.min(MINIMAP_SIZE - 1)),
            h.min(MINIMAP_SIZE - y.min(MINIMAP_SIZE - 1)),
            self.theme.palette().viewport,
        );
        img
    }
}

/// Visible fraction of the content, mapped onto the minimap.
///
/// `content_size` is the heatmap edge length (`N * scale`).
pub fn viewport_rect(scroll: &ScrollState, content_size: f64) -> ViewportRect {
    let full = f64::from(MINIMAP_SIZE);
    if !content_size.is_finite() || content_size <= 0.0 {
        return ViewportRect {
            x: 0.0,
            y: 0.0,
            w: full,
            h: full,
        };
    }

    // Non-finite offsets or sizes count as 0
    let frac = |v: f64| if v.is_finite() { v / content_size } else { 0.0 };
    let fx = frac(scroll.scroll_left).clamp(0.0, 1.0);
    let fy = frac(scroll.scroll_top).clamp(0.0, 1.0);
    let fw = frac(scroll.client_width).clamp(0.0, 1.0 - fx);
    let fh = frac(scroll.client_height).clamp(0.0, 1.0 - fy);

    ViewportRect {
        x: fx * full,
        y: fy * full,
        w: fw * full,
        h: fh * full,
    }
}

/// Scroll offsets that center the clicked minimap point in the viewport.
///
/// Results are clamped to the scrollable range of the container.
pub fn jump_to(cx: f64, cy: f64, content_size: f64, scroll: &ScrollState) -> (f64, f64) {
    let full = f64::from(MINIMAP_SIZE);
    let center = |c: f64, client: f64| {
        let target = (c / full).clamp(0.0, 1.0) * content_size - client / 2.0;
        target.clamp(0.0, (content_size - client).max(0.0))
    };
    (
        center(cx, scroll.client_width),
        center(cy, scroll.client_height),
    )
}
