use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "apple-container",
    about = "Drag a box over apples that add up to ten",
    version
)]
pub struct Cli {
    /// Seed for board generation and apple physics (defaults to the clock).
    #[arg(long)]
    pub seed: Option<u32>,

    /// Simulation and redraw rate.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Write log records to this file (the terminal is busy drawing the game).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn frame_ms(&self) -> u64 {
        (1000 / u64::from(self.fps)).max(1)
    }
}
