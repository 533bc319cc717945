use crate::sink::SinkKind;
use crate::source::Table;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};

/// Scatter plot / text export of (x, y) points stored in PostgreSQL
#[derive(Debug, Parser)]
#[command(
    name = "pointplot",
    version,
    about = "Fetch (x, y) points from PostgreSQL and draw a scatter plot or write them to a file",
    long_about = "A small CLI that reads the (x, y) rows of a lab table (ordered by x) and either renders them as a scatter plot or writes them as `x, y` lines."
)]
pub struct Cli {
    /// Enable verbose output (debug level)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Suppress non-error output (error level only)
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// `run` 子命令参数，未指定的项使用配置文件中的值
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", default_value = "config.toml")]
    pub config: String,

    /// Table to read
    #[arg(short = 't', long = "table", value_enum)]
    pub table: Option<Table>,

    /// Where to send the points
    #[arg(short = 's', long = "sink", value_enum)]
    pub sink: Option<SinkKind>,

    /// Output file for the file sink
    #[arg(short = 'o', long = "output")]
    pub output: Option<String>,

    /// Write the plot to this HTML file instead of opening a viewer (viewer mode does not block)
    #[arg(long = "html")]
    pub html: Option<String>,

    /// Read points from a previously written file instead of the database
    #[arg(long = "from-csv")]
    pub from_csv: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch points and render them
    Run(RunArgs),
    /// Generate a default configuration file
    Init {
        /// Output configuration file path
        #[arg(short = 'o', long = "output", default_value = "config.toml")]
        output: String,
        /// Force overwrite if file exists
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
    /// Validate a configuration file
    Validate {
        /// Configuration file path
        #[arg(short = 'c', long = "config", default_value = "config.toml")]
        config: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Generate shell completions
    pub fn generate_completions(shell: Shell) {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
    }
}
