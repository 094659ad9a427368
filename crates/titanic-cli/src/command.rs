use std::path::PathBuf;

use clap::Parser;
use titanic_charts::figure::DEFAULT_DPI;

use crate::visualizer::{Visualizer, VisualizerConfig};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Passenger CSV file to visualize
    #[arg(long = "data", default_value = "data/train_data.csv")]
    data_path: PathBuf,
    /// Directory that receives the chart images
    #[arg(long, default_value = "outputs")]
    output_dir: PathBuf,
    /// Output image resolution in dots per inch
    #[arg(long, default_value_t = DEFAULT_DPI, value_parser = clap::value_parser!(u32).range(1..))]
    dpi: u32,
}

impl From<CommandArgs> for VisualizerConfig {
    fn from(args: CommandArgs) -> Self {
        let CommandArgs {
            data_path,
            output_dir,
            dpi,
        } = args;
        Self {
            data_path,
            output_dir,
            dpi,
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("\nTITANIC DATA VISUALIZATION");
    let mut visualizer = Visualizer::new(args.into());
    visualizer.run()
}
