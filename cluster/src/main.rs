use anyhow::Context;
use blockcore::catalog::{WavePair, SUPPORTED_WAVE_PAIRS};
use blockcore::math::block::{DEFAULT_DZ, DEFAULT_NX, DEFAULT_NY};
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;
use workflow::config::{GatherConfig, DEFAULT_OUTPUT_FILE};
use workflow::runner::{match_files, sort_file, Runner};

mod workflow;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Clustering of events and stations into blocks for 3-D inversion input files"
)]
struct Args {
    /// Level of logging
    #[arg(short, long, value_enum, default_value_t = Verbosity::Info, global = true)]
    verbosity: Verbosity,
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Verbosity {
    #[value(name = "DEBUG")]
    Debug,
    #[value(name = "INFO")]
    Info,
    #[value(name = "WARNING")]
    Warning,
    #[value(name = "ERROR")]
    Error,
}

impl From<Verbosity> for LevelFilter {
    fn from(verbosity: Verbosity) -> Self {
        match verbosity {
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Warning => LevelFilter::Warn,
            Verbosity::Error => LevelFilter::Error,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Gather all source-station block pairs for all events in a directory
    Gather {
        events_dir: PathBuf,
        /// Output arrivals file basename
        #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_FILE, conflicts_with = "config")]
        output_file: String,
        /// Number of segments from 0 to 360 degrees for longitude
        #[arg(short = 'x', long, default_value_t = DEFAULT_NX, conflicts_with = "config")]
        nx: u32,
        /// Number of segments from 0 to 180 degrees for latitude
        #[arg(short = 'y', long, default_value_t = DEFAULT_NY, conflicts_with = "config")]
        ny: u32,
        /// Unit segment length of depth in meters
        #[arg(short = 'z', long, default_value_t = DEFAULT_DZ, conflicts_with = "config")]
        dz: f64,
        /// Wave type pair to generate inversion inputs
        #[arg(
            short = 'w',
            long,
            default_value = "P S",
            value_parser = PossibleValuesParser::new(SUPPORTED_WAVE_PAIRS),
            conflicts_with = "config"
        )]
        wave_type: String,
        /// Station inventory CSV; repeat to merge, later files win
        #[arg(short = 's', long = "stations", conflicts_with = "config")]
        stations: Vec<PathBuf>,
        /// Load gather parameters from YAML; excludes the other gather flags
        #[arg(long)]
        config: Option<PathBuf>,
        /// Extract events on all cores
        #[arg(long, default_value_t = false, conflicts_with = "config")]
        parallel: bool,
    },
    /// Sort on source and station block, keeping the median travel time row
    Sort {
        output_file: PathBuf,
        /// Output sorted and filtered file
        #[arg(short = 's', long, default_value = "sorted.csv")]
        sorted_file: PathBuf,
    },
    /// Keep only source and station block pairs present in both sorted files
    Match {
        p_file: PathBuf,
        s_file: PathBuf,
        /// Output matched P file
        #[arg(short = 'p', long, default_value = "matched_p.csv")]
        matched_p_file: PathBuf,
        /// Output matched S file
        #[arg(short = 's', long, default_value = "matched_s.csv")]
        matched_s_file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.into())
        .parse_default_env()
        .init();

    match args.command {
        Command::Gather {
            events_dir,
            output_file,
            nx,
            ny,
            dz,
            wave_type,
            stations,
            config,
            parallel,
        } => {
            let gather_config = if let Some(path) = config {
                GatherConfig::load(path)?
            } else {
                GatherConfig {
                    output_file,
                    nx,
                    ny,
                    dz,
                    wave_type: WavePair::parse(&wave_type).context("parsing wave type")?,
                    stations,
                    parallel,
                }
            };
            let result = Runner::new(gather_config).gather(&events_dir)?;
            println!(
                "Gathered {} + {} rows from {} events -> {}, {}",
                result.summary.first_phase_rows,
                result.summary.second_phase_rows,
                result.summary.events_processed,
                result.first_path.display(),
                result.second_path.display()
            );
        }
        Command::Sort {
            output_file,
            sorted_file,
        } => {
            let result = sort_file(&output_file, &sorted_file)?;
            println!(
                "Sorted {} rows, kept {} -> {}",
                result.input_rows,
                result.kept_rows,
                sorted_file.display()
            );
        }
        Command::Match {
            p_file,
            s_file,
            matched_p_file,
            matched_s_file,
        } => {
            let result = match_files(&p_file, &s_file, &matched_p_file, &matched_s_file)?;
            println!(
                "Matched {} P and {} S rows -> {}, {}",
                result.first_rows,
                result.second_rows,
                matched_p_file.display(),
                matched_s_file.display()
            );
        }
    }

    Ok(())
}
