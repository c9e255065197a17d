mod cli;

use clap::{Parser, Subcommand};
use tracing::{error, Level};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity of the program:
    /// -v for info, -vv for debug, and -vvv for trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the contact map heatmap, secondary structure tracks and minimap as PNG files
    Render(cli::render::Args),
    /// Export pairwise residue distances
    Pairs(cli::pairs::Args),
    /// Export classified residue-residue interactions
    Interactions(cli::interactions::Args),
}

fn main() {
    let args = Cli::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let result = match &args.command {
        Commands::Render(args) => cli::render::run(args),
        Commands::Pairs(args) => cli::pairs::run(args),
        Commands::Interactions(args) => cli::interactions::run(args),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}
