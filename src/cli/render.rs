use super::{load_engine, InputArgs};
use clap::Parser;
use resmap::{ContactMapError, FilterCategory, FilterState, Theme, Thresholds};
use tracing::{info, trace};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    #[command(flatten)]
    io: InputArgs,

    /// Prefix of the output PNG files
    #[arg(short = 'f', long = "filename", default_value_t = String::from("contact_map"))]
    filename: String,

    /// Pixels per residue; derived from the structure size when omitted
    #[arg(long)]
    scale: Option<u32>,

    /// Color theme
    #[arg(long)]
    theme: Option<Theme>,

    /// Pairs closer than this (Å) use the "close" color
    #[arg(long)]
    contact: Option<f64>,

    /// Pairs up to this distance (Å) use the "proximal" color
    #[arg(long)]
    proximal: Option<f64>,

    /// Only show residue pairs in these interaction categories, e.g. salt-bridge,disulfide
    #[arg(long, value_delimiter = ',')]
    filter: Vec<FilterCategory>,

    /// Draw gridlines every 25 residues
    #[arg(long, default_value_t = false)]
    grid: bool,

    /// Leave pairs within the same chain blank
    #[arg(long = "hide-intra-chain", default_value_t = false)]
    hide_intra_chain: bool,
}

pub(crate) fn run(args: &Args) -> Result<(), ContactMapError> {
    trace!("{args:?}");

    let settings = args.io.load_settings()?;
    let mut engine = load_engine(&args.io.input, &settings)?;

    if let Some(scale) = args.scale {
        engine.set_scale(scale);
    }
    if let Some(theme) = args.theme {
        engine.set_theme(theme);
    }
    if args.contact.is_some() || args.proximal.is_some() {
        let current = engine.params().thresholds;
        engine.set_thresholds(Thresholds::new(
            args.contact.unwrap_or(current.contact),
            args.proximal.unwrap_or(current.proximal),
        ));
    }
    if !args.filter.is_empty() {
        engine.set_filter(FilterState::from_categories(args.filter.iter().copied()));
    }
    if args.grid {
        engine.set_show_grid(true);
    }
    if args.hide_intra_chain {
        engine.set_show_intra_chain(false);
    }

    let heatmap_file = args.io.output_file(&format!("{}.png", args.filename))?;
    std::fs::write(&heatmap_file, engine.export_png()?)?;
    info!("Heatmap saved to {}", heatmap_file.display());

    let tracks = engine.tracks()?;
    tracks
        .top
        .save(args.io.output_file(&format!("{}_ss_top.png", args.filename))?)?;
    tracks
        .left
        .save(args.io.output_file(&format!("{}_ss_left.png", args.filename))?)?;

    let bars = engine.chain_bars()?;
    bars.top
        .save(args.io.output_file(&format!("{}_chains_top.png", args.filename))?)?;
    bars.left
        .save(args.io.output_file(&format!("{}_chains_left.png", args.filename))?)?;

    let minimap_file = args.io.output_file(&format!("{}_minimap.png", args.filename))?;
    engine.minimap()?.save(&minimap_file)?;
    info!("Minimap saved to {}", minimap_file.display());

    Ok(())
}
