use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rundiff",
    version,
    about = "View the file changes of an agent run, unified or side by side"
)]
pub struct Cli {
    /// Run diff JSON document (`-` or omitted reads stdin)
    pub input: Option<PathBuf>,

    /// Start in split (side-by-side) mode
    #[arg(short, long)]
    pub split: bool,

    /// Start with every file expanded
    #[arg(short = 'a', long)]
    pub expand_all: bool,

    /// Print the diff as plain text instead of opening the viewer
    #[arg(short, long, conflicts_with = "check")]
    pub print: bool,

    /// Only validate the document and print its summary
    #[arg(long)]
    pub check: bool,

    /// Column width of each side in printed split output
    #[arg(long, default_value = "60")]
    pub width: usize,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// The input path, or `None` for stdin
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|p| p.as_os_str() != "-")
    }
}
