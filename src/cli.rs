// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

use crate::scenes::Variant;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "stair-gallery")]
#[command(about = "Procedural staircase gallery", long_about = None)]
pub struct Cli {
    /// Layout to build
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding bg.jpg, door.jpg, picture*.jpg
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Override the staircase step count
    #[arg(long)]
    pub steps: Option<usize>,

    /// Disable the HUD overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}
