use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chronicle")]
#[command(
    author,
    version,
    about = "Build a combined news file from news fragments"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a combined news file from news fragments
    Build {
        /// Render the news fragments to standard output; don't write to files
        #[clap(long, default_value_t = false)]
        draft: bool,

        /// Configuration file path (defaults to chronicle.toml in the project directory)
        #[clap(long, value_name = "FILE_PATH")]
        config: Option<String>,

        /// Build fragments in the given directory (defaults to the current directory)
        #[clap(long, value_name = "PATH")]
        dir: Option<String>,

        /// Pass a custom project name
        #[clap(long)]
        name: Option<String>,

        /// Render the news fragments using the given version
        #[clap(long)]
        version: Option<String>,

        /// Render the news fragments using the given date
        #[clap(long)]
        date: Option<String>,

        /// Do not ask for confirmation to remove news fragments
        #[clap(long, default_value_t = false)]
        yes: bool,

        /// Do not ask for confirmation, but keep the news fragments
        #[clap(long, default_value_t = false)]
        keep: bool,
    },
}
