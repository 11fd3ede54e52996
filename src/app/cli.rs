use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "Collect configured project files into a flat, timestamped folder and merge them"
)]
pub struct Cli {
    /// Directory holding Extensions.yaml and Folders.yaml (defaults to the current directory)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Root that top-level folder names resolve against (defaults to the config dir's grandparent)
    #[arg(long)]
    pub project_root: Option<PathBuf>,

    /// Base directory for timestamped output folders (defaults to <config dir>/Out)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}
