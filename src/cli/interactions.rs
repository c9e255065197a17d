use super::{load_engine, InputArgs};
use clap::Parser;
use polars::prelude::*;
use resmap::{get_interactions, write_df_to_file, ContactMapError, DataFrameFileType};
use tracing::{debug, info, trace};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    #[command(flatten)]
    io: InputArgs,

    /// Name of the output file
    #[arg(short = 'f', long = "filename", default_value_t = String::from("interactions"))]
    filename: String,

    /// Output file type
    #[arg(short = 't', long, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,
}

pub(crate) fn run(args: &Args) -> Result<(), ContactMapError> {
    trace!("{args:?}");

    let settings = args.io.load_settings()?;
    let engine = load_engine(&args.io.input, &settings)?;
    let (residues, matrix) = engine
        .residues()
        .zip(engine.matrix())
        .ok_or(ContactMapError::NotReady)?;

    let mut df_interactions = get_interactions(residues, matrix)?;
    debug!("{df_interactions}");

    // Log how many pairs fall in each category
    let df_counts = df_interactions
        .clone()
        .lazy()
        .group_by([col("interaction")])
        .agg([len().alias("count")])
        .sort(["interaction"], Default::default())
        .collect()?;
    info!("Interaction counts\n{df_counts}");

    let output_file = args
        .io
        .output_file(&args.filename)?
        .with_extension(args.output_format.to_string());
    write_df_to_file(&mut df_interactions, &output_file, args.output_format)?;
    info!("Results saved to {}", output_file.display());

    Ok(())
}
