use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "esgscope")]
#[command(about = "ESG risk scoring for company reports", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "esgscope.yaml", env = "ESGSCOPE_CONFIG")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP analysis service
    Serve {
        /// Listen address
        #[arg(short = 'l', long)]
        listen: Option<String>,

        /// Listen port
        #[arg(short = 'P', long)]
        port: Option<u16>,

        /// Directory to write report files into after each analysis
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },

    /// Analyze a local PDF or text file and print the report
    Analyze {
        /// Path to a .pdf or .txt document
        path: PathBuf,

        /// Print only the summary report instead of the full JSON result
        #[arg(long)]
        summary: bool,
    },
}
