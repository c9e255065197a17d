pub(crate) mod interactions;
pub(crate) mod pairs;
pub(crate) mod render;

use resmap::{ContactMapEngine, ContactMapError, PdbSource, Settings};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Arguments shared by every subcommand.
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct InputArgs {
    /// Path to the PDB or mmCIF file to be analyzed
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory
    #[arg(short, long)]
    pub output: PathBuf,

    /// TOML file with default render and export settings
    #[arg(short, long)]
    pub settings: Option<PathBuf>,
}

impl InputArgs {
    pub fn load_settings(&self) -> Result<Settings, ContactMapError> {
        match &self.settings {
            Some(path) => Settings::load(path),
            None => Ok(Settings::default()),
        }
    }

    /// Create the output directory and return `dir/filename`.
    pub fn output_file(&self, filename: &str) -> Result<PathBuf, ContactMapError> {
        let output_path = std::path::absolute(&self.output)?;
        std::fs::create_dir_all(&output_path)?;
        Ok(output_path.join(filename))
    }
}

/// Load `input` into a ready engine configured from `settings`.
pub(crate) fn load_engine(
    input: &Path,
    settings: &Settings,
) -> Result<ContactMapEngine, ContactMapError> {
    let input_path = input.canonicalize()?;
    debug!("Using input file {}", input_path.display());

    let mut engine = ContactMapEngine::with_params(settings.render.clone(), settings.debounce());
    let source = PdbSource::new(&input_path);
    pollster::block_on(engine.load_from(&source))?;

    if let Some(ranges) = engine.chain_ranges() {
        info!(
            "Loaded {} residues in {} chain segments",
            engine.residues().map_or(0, |r| r.len()),
            ranges.len()
        );
    }
    Ok(engine)
}
