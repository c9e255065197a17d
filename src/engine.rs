//! The interactive contact map: load lifecycle, cached rasters and pointer
//! handling for one open view.

use crate::chains::{chain_ranges, ChainRange};
use crate::debounce::Debouncer;
use crate::error::ContactMapError;
use crate::export::{encode_png, write_contact_csv};
use crate::matrix::{suggested_scale, DistanceMatrix};
use crate::render::{
    clamp_scale_for, jump_to, map_size, pixel_to_residue, render_chain_bars, render_heatmap,
    render_tracks, viewport_rect, ChainBars, FilterState, HoverInfo, InteractionOverlay, Minimap,
    RenderParams, ResiduePair, ScrollState, SecondaryStructureTracks, Theme, Thresholds,
    ViewportRect,
};
use crate::residues::{build_residues, ResidueRecord};
use crate::source::{ChainBundle, CoordinateSource, FetchError};

use image::RgbaImage;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Default quiet period before a dragged threshold is applied.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Callbacks into the hosting 3D viewer.
pub trait ResidueEvents {
    /// A heatmap cell was clicked.
    fn on_residue_click(&mut self, _chain_a: &str, _res_a: i64, _chain_b: &str, _res_b: i64) {}

    /// A residue on one of the axis tracks is under the pointer.
    fn on_residue_hover(&mut self, _chain: &str, _res_no: i64) {}
}

/// Lifecycle of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No structure loaded
    Idle,
    /// Waiting on the coordinate fetch for this generation
    Computing { generation: u64 },
    /// Matrix built, fully interactive
    Ready,
}

/// Handle for one coordinate fetch. Only the most recent ticket is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What [`ContactMapEngine::finish_load`] did with a fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The map was built; `scale` is the zoom applied as default
    Applied { residues: usize, scale: u32 },
    /// A newer load superseded this one and the result was discarded
    Stale,
}

/// Per-structure data plus rasters cached by the inputs they were drawn from.
#[derive(Debug)]
struct LoadedMap {
    residues: Vec<ResidueRecord>,
    matrix: DistanceMatrix,
    chains: Vec<ChainRange>,
    heatmap: Option<(RenderParams, RgbaImage)>,
    tracks: Option<(u32, SecondaryStructureTracks)>,
    chain_bars: Option<(u32, ChainBars)>,
    minimap: Option<((Thresholds, Theme), Minimap)>,
}

impl LoadedMap {
    fn new(residues: Vec<ResidueRecord>, matrix: DistanceMatrix) -> Self {
        let chains = chain_ranges(&residues);
        Self {
            residues,
            matrix,
            chains,
            heatmap: None,
            tracks: None,
            chain_bars: None,
            minimap: None,
        }
    }
}

pub struct ContactMapEngine {
    state: EngineState,
    generation: u64,
    map: Option<LoadedMap>,
    params: RenderParams,
    overlay: InteractionOverlay,
    scroll: ScrollState,
    thresholds: Debouncer<Thresholds>,
    events: Option<Box<dyn ResidueEvents>>,
    last_error: Option<String>,
}

impl Default for ContactMapEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactMapEngine {
    pub fn new() -> Self {
        Self::with_params(RenderParams::default(), DEFAULT_DEBOUNCE)
    }

    pub fn with_params(params: RenderParams, debounce: Duration) -> Self {
        Self {
            state: EngineState::Idle,
            generation: 0,
            map: None,
            params: params.normalized(),
            overlay: InteractionOverlay::new(),
            scroll: ScrollState::default(),
            thresholds: Debouncer::new(debounce),
            events: None,
            last_error: None,
        }
    }

    /// Register the viewer callbacks.
    pub fn set_events(&mut self, events: Box<dyn ResidueEvents>) {
        self.events = Some(events);
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == EngineState::Ready
    }

    /// User-facing message from the last failed load.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // -- Load lifecycle -----------------------------------------------------

    /// Start a new load. Any previous map is dropped immediately.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.map = None;
        self.overlay.pointer_leave();
        self.last_error = None;
        self.state = EngineState::Computing {
            generation: self.generation,
        };
        debug!("Started contact map load #{}", self.generation);
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Complete a load with the fetched coordinates.
    ///
    /// Results for superseded tickets are discarded. Fetch failures, empty
    /// structures and oversized structures put the engine back in
    /// [`EngineState::Idle`] with a notice.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        fetched: Result<Vec<ChainBundle>, FetchError>,
    ) -> Result<LoadOutcome, ContactMapError> {
        if self.state
            != (EngineState::Computing {
                generation: ticket.generation,
            })
        {
            warn!(
                "Discarding coordinates for load #{}; current load is #{}",
                ticket.generation, self.generation
            );
            return Ok(LoadOutcome::Stale);
        }

        let bundles = match fetched {
            Ok(bundles) => bundles,
            Err(e) => return Err(self.fail(ContactMapError::Fetch(e.0))),
        };
        if bundles.iter().all(ChainBundle::is_empty) {
            return Err(self.fail(ContactMapError::EmptyStructure));
        }

        let built = build_residues(&bundles)
            .and_then(|residues| DistanceMatrix::build(&residues).map(|m| (residues, m)));
        let (residues, matrix) = match built {
            Ok(built) => built,
            Err(e) => return Err(self.fail(e)),
        };

        let n = residues.len();
        let scale = clamp_scale_for(suggested_scale(n), n);
        self.params.scale = scale;
        self.scroll.scroll_left = 0.0;
        self.scroll.scroll_top = 0.0;
        self.map = Some(LoadedMap::new(residues, matrix));
        self.state = EngineState::Ready;
        info!("Contact map ready: {n} residues at scale {scale}");

        Ok(LoadOutcome::Applied {
            residues: n,
            scale,
        })
    }

    /// Fetch coordinates from `source` and build the map.
    pub async fn load_from<S: CoordinateSource>(
        &mut self,
        source: &S,
    ) -> Result<LoadOutcome, ContactMapError> {
        let ticket = self.begin_load();
        let fetched = source.fetch_chains().await;
        self.finish_load(ticket, fetched)
    }

    fn fail(&mut self, err: ContactMapError) -> ContactMapError {
        error!("{err}");
        self.map = None;
        self.state = EngineState::Idle;
        self.last_error = Some(err.to_string());
        err
    }

    // -- Accessors ----------------------------------------------------------

    pub fn residues(&self) -> Option<&[ResidueRecord]> {
        self.map.as_ref().map(|m| m.residues.as_slice())
    }

    pub fn matrix(&self) -> Option<&DistanceMatrix> {
        self.map.as_ref().map(|m| &m.matrix)
    }

    pub fn chain_ranges(&self) -> Option<&[ChainRange]> {
        self.map.as_ref().map(|m| m.chains.as_slice())
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    fn residue_count(&self) -> usize {
        self.map.as_ref().map_or(0, |m| m.residues.len())
    }

    /// Edge length of the heatmap at the current scale, in pixels.
    pub fn content_size(&self) -> f64 {
        f64::from(map_size(self.residue_count(), self.params.scale))
    }

    // -- Render parameters --------------------------------------------------

    pub fn set_params(&mut self, params: RenderParams) {
        self.thresholds.cancel();
        let n = self.residue_count();
        self.params = params.normalized();
        self.params.scale = clamp_scale_for(self.params.scale, n);
    }

    /// Set the zoom, reduced if needed so the map stays within [`crate::render::MAX_MAP_EDGE`].
    pub fn set_scale(&mut self, scale: u32) {
        self.params.scale = clamp_scale_for(scale, self.residue_count());
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.params.filter = filter;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.params.theme = theme;
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.params.show_grid = show;
    }

    pub fn set_show_intra_chain(&mut self, show: bool) {
        self.params.show_intra_chain = show;
    }

    /// Apply thresholds right away, dropping any queued change.
    pub fn set_thresholds(&mut self, thresholds: Thresholds) {
        self.thresholds.cancel();
        self.params.thresholds = thresholds.clamped();
    }

    /// Queue a threshold change from a high-frequency input such as a slider drag.
    pub fn queue_thresholds(&mut self, thresholds: Thresholds, now: Instant) {
        self.thresholds.push(thresholds, now);
    }

    /// Apply a queued threshold change once its quiet period has passed.
    /// Returns true when the thresholds changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.thresholds.poll(now) {
            Some(t) => {
                self.params.thresholds = t.clamped();
                true
            }
            None => false,
        }
    }

    /// Apply any queued threshold change immediately.
    pub fn commit_thresholds(&mut self) -> bool {
        match self.thresholds.flush() {
            Some(t) => {
                self.params.thresholds = t.clamped();
                true
            }
            None => false,
        }
    }

    // -- Rasters ------------------------------------------------------------

    /// The heatmap for the current parameters, redrawn only when they changed.
    pub fn heatmap(&mut self) -> Result<&RgbaImage, ContactMapError> {
        let params = &self.params;
        let map = self.map.as_mut().ok_or(ContactMapError::NotReady)?;
        if map.heatmap.as_ref().map_or(true, |(p, _)| p != params) {
            let img = render_heatmap(&map.matrix, &map.residues, params);
            map.heatmap = Some((params.clone(), img));
        }
        map.heatmap
            .as_ref()
            .map(|(_, img)| img)
            .ok_or(ContactMapError::NotReady)
    }

    /// Secondary structure strips at the current scale.
    pub fn tracks(&mut self) -> Result<&SecondaryStructureTracks, ContactMapError> {
        let scale = self.params.scale;
        let map = self.map.as_mut().ok_or(ContactMapError::NotReady)?;
        if map.tracks.as_ref().map_or(true, |(s, _)| *s != scale) {
            map.tracks = Some((scale, render_tracks(&map.residues, scale)));
        }
        map.tracks
            .as_ref()
            .map(|(_, t)| t)
            .ok_or(ContactMapError::NotReady)
    }

    /// Per-chain bars along both axes at the current scale.
    pub fn chain_bars(&mut self) -> Result<&ChainBars, ContactMapError> {
        let scale = self.params.scale;
        let map = self.map.as_mut().ok_or(ContactMapError::NotReady)?;
        if map.chain_bars.as_ref().map_or(true, |(s, _)| *s != scale) {
            map.chain_bars = Some((scale, render_chain_bars(&map.chains, scale)));
        }
        map.chain_bars
            .as_ref()
            .map(|(_, b)| b)
            .ok_or(ContactMapError::NotReady)
    }

    /// The overview with the current viewport drawn on it.
    ///
    /// The overview itself is rebuilt only when thresholds or theme change.
    pub fn minimap(&mut self) -> Result<RgbaImage, ContactMapError> {
        let rect = self.viewport_rect();
        let key = (self.params.thresholds, self.params.theme);
        let map = self.map.as_mut().ok_or(ContactMapError::NotReady)?;
        if map.minimap.as_ref().map_or(true, |(k, _)| *k != key) {
            map.minimap = Some((key, Minimap::build(&map.matrix, &key.0, key.1)));
        }
        map.minimap
            .as_ref()
            .map(|(_, mini)| mini.with_viewport(&rect))
            .ok_or(ContactMapError::NotReady)
    }

    /// Crosshair and cell outline layer for the hovered cell.
    pub fn overlay_layer(&self) -> RgbaImage {
        self.overlay
            .render(self.residue_count(), self.params.scale, self.params.theme)
    }

    // -- Pointer and scroll -------------------------------------------------

    /// Track the pointer over the heatmap; returns the tooltip for the hovered cell.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<HoverInfo> {
        let map = self.map.as_ref()?;
        self.overlay
            .pointer_move(x, y, self.params.scale, map.residues.len())?;
        self.overlay.tooltip(&map.residues, &map.matrix)
    }

    pub fn pointer_leave(&mut self) {
        self.overlay.pointer_leave();
    }

    pub fn hovered(&self) -> Option<(usize, usize)> {
        self.overlay.hovered()
    }

    /// Report the hovered cell to the viewer. No-op when nothing is hovered.
    pub fn click(&mut self) -> Option<ResiduePair> {
        let pair = self.overlay.click(self.residues()?)?;
        if let Some(events) = self.events.as_mut() {
            events.on_residue_click(&pair.chain_a, pair.res_a, &pair.chain_b, pair.res_b);
        }
        Some(pair)
    }

    /// The pointer is over an axis track at `pixel` along the axis.
    pub fn hover_axis(&mut self, pixel: f64) -> Option<(String, i64)> {
        let residues = self.map.as_ref().map(|m| m.residues.as_slice())?;
        let index = pixel_to_residue(pixel, self.params.scale, residues.len())?;
        let res = &residues[index];
        let hit = (res.chain.clone(), res.res_no);
        if let Some(events) = self.events.as_mut() {
            events.on_residue_hover(&hit.0, hit.1);
        }
        Some(hit)
    }

    /// Record the scroll container's position and size.
    pub fn scroll(&mut self, scroll: ScrollState) {
        self.scroll = scroll;
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll
    }

    pub fn viewport_rect(&self) -> ViewportRect {
        viewport_rect(&self.scroll, self.content_size())
    }

    /// Center the main view on a clicked minimap point; returns the new scroll state.
    pub fn minimap_click(&mut self, cx: f64, cy: f64) -> Option<ScrollState> {
        if !self.is_ready() {
            return None;
        }
        let (left, top) = jump_to(cx, cy, self.content_size(), &self.scroll);
        self.scroll.scroll_left = left;
        self.scroll.scroll_top = top;
        Some(self.scroll)
    }

    // -- Export -------------------------------------------------------------

    /// Write the distance CSV; returns the number of rows.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize, ContactMapError> {
        let map = self.map.as_ref().ok_or(ContactMapError::NotReady)?;
        write_contact_csv(writer, &map.residues, &map.matrix)
    }

    /// PNG bytes of the heatmap exactly as currently rendered.
    pub fn export_png(&mut self) -> Result<Vec<u8>, ContactMapError> {
        encode_png(self.heatmap()?)
    }
}
