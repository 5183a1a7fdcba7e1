use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    name = "RS-GP",
    about = "A lap-based single-event race simulator written in Rust"
)]
pub struct SimOpts {
    // FLAGS ---------------------------------------------------------------------------------------
    /// Activate debug output (lap-by-lap standings)
    #[clap(short, long)]
    pub debug: bool,

    // OPTIONS -------------------------------------------------------------------------------------
    /// Set path to the simulation parameter file (if not set, a random demo field is simulated)
    #[clap(short, long)]
    pub parfile_path: Option<PathBuf>,

    /// Set seed of the random demo field (only used without parameter file)
    #[clap(short = 's', long, default_value = "42")]
    pub demo_seed: u64,

    /// Set number of cars of the random demo field (only used without parameter file)
    #[clap(short, long, default_value = "20")]
    pub no_cars: u32,

    /// Set path of the CSV file the lap and race times are written to
    #[clap(short, long)]
    pub output_path: Option<PathBuf>,
}
