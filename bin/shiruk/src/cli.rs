pub use clap::{self, Parser};

use crate::opts::{ClientOpts, OutputFormat, UiOpts};

#[derive(Parser, Debug)]
#[clap(
    name = "shiruk",
    version,
    about,
    rename_all = "kebab-case",
    rename_all_env = "screaming-snake"
)]
pub struct Cli {
    /// Log filter, same syntax as RUST_LOG. Wins over RUST_LOG when given;
    /// with neither set the filter is `info`
    #[arg(long, global = true, env = "SHIRUK_LOG")]
    pub log: Option<String>,

    /// Subcommands
    #[clap(subcommand)]
    pub subcommand: Commands,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Commands {
    /// Read lines from stdin; every line is analyzed as if Enter was pressed
    Interactive {
        #[clap(flatten)]
        client: ClientOpts,

        #[clap(flatten)]
        ui: UiOpts,
    },
    /// Analyze a single text and print the result
    Analyze {
        #[clap(flatten)]
        client: ClientOpts,

        #[clap(flatten)]
        ui: UiOpts,

        /// Output layout (text, html, json)
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Text to analyze
        text: String,
    },
    /// Probe the backend health endpoint
    Health {
        #[clap(flatten)]
        client: ClientOpts,

        /// Also fetch the service banner
        #[arg(long)]
        verbose: bool,
    },
}

impl Cli {
    /// The form runs on a single cooperative loop, so one thread is enough.
    pub fn create_runtime() -> anyhow::Result<tokio::runtime::Runtime> {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(Into::into)
    }
}
