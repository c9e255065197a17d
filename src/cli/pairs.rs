use super::{load_engine, InputArgs};
use clap::Parser;
use resmap::{get_contact_pairs, write_df_to_file, ContactMapError, DataFrameFileType};
use tracing::{info, trace};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    #[command(flatten)]
    io: InputArgs,

    /// Name of the output file
    #[arg(short = 'f', long = "filename", default_value_t = String::from("pairs"))]
    filename: String,

    /// Output file type
    #[arg(short = 't', long, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,

    /// Largest residue-residue distance (Å) to include; defaults to the settings value
    #[arg(short, long)]
    dist_cutoff: Option<f64>,
}

pub(crate) fn run(args: &Args) -> Result<(), ContactMapError> {
    trace!("{args:?}");

    let settings = args.io.load_settings()?;
    let cutoff = args.dist_cutoff.unwrap_or(settings.export.pair_cutoff);
    let engine = load_engine(&args.io.input, &settings)?;
    let (residues, matrix) = engine
        .residues()
        .zip(engine.matrix())
        .ok_or(ContactMapError::NotReady)?;

    let mut df_pairs = get_contact_pairs(residues, matrix, cutoff)?;
    let output_file = args
        .io
        .output_file(&args.filename)?
        .with_extension(args.output_format.to_string());
    write_df_to_file(&mut df_pairs, &output_file, args.output_format)?;
    info!(
        "{} residue pairs within {cutoff} Å saved to {}",
        df_pairs.height(),
        output_file.display()
    );

    Ok(())
}
