use clap::Parser;
use log::info;
use pointplot::cli::{self, opts::Commands};
use pointplot::config::Config;
use pointplot::error::{self, Result};
use pointplot::logging;
use std::path::Path;

fn main() -> Result<()> {
    let cli = cli::opts::Cli::parse();

    match &cli.command {
        Some(Commands::Init { output, force }) => {
            logging::init_simple_logging(cli.verbose, cli.quiet);
            cli::init::handle_init(output, *force)
        }
        Some(Commands::Completions { shell }) => {
            cli::opts::Cli::generate_completions(*shell);
            Ok(())
        }
        Some(Commands::Run(args)) => {
            let cfg = prepare(&args.config, cli.verbose, cli.quiet)?;
            cli::run::handle_run(&cfg, args).map(|_| ())
        }
        Some(Commands::Validate { config }) => {
            let cfg = prepare(config, cli.verbose, cli.quiet)?;
            cli::validate::handle_validate(&cfg)
        }
        None => {
            print_help();
            std::process::exit(1);
        }
    }
}

/// 加载并验证配置，然后初始化日志
fn prepare(config_path: &str, verbose: bool, quiet: bool) -> Result<Config> {
    let mut cfg = load_config(config_path)?;
    cfg.validate()?;
    eprintln!("Configuration validation passed");

    if verbose {
        cfg.logging.level = "debug".to_string();
    } else if quiet {
        cfg.logging.level = "error".to_string();
    }

    logging::init_logging(&cfg.logging)?;
    info!("Application started");
    Ok(cfg)
}

fn load_config(config_path: &str) -> Result<Config> {
    let path = Path::new(config_path);
    match Config::from_file(path) {
        Ok(c) => {
            eprintln!("Loaded configuration file: {config_path}");
            Ok(c)
        }
        Err(error::Error::Config(error::ConfigError::NotFound(_))) => {
            eprintln!("Configuration file not found: {config_path}, using default configuration");
            eprintln!("Tip: run 'pointplot init' to generate a configuration file");
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

fn print_help() {
    eprintln!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!("pointplot - Scatter plot / file export of (x, y) points");
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!("\nUsage: pointplot <COMMAND> [OPTIONS]");
    eprintln!("\nCommands:");
    eprintln!("  run          Fetch points and render them");
    eprintln!("  init         Generate a default configuration file");
    eprintln!("  validate     Validate a configuration file");
    eprintln!("  completions  Generate shell completion scripts");
    eprintln!("\nOptions:");
    eprintln!("  -v, --verbose   Enable verbose output (debug level)");
    eprintln!("  -q, --quiet     Suppress non-error output");
    eprintln!("  -h, --help      Print help information");
    eprintln!("  -V, --version   Print version information");
    eprintln!("\nExamples:");
    eprintln!("  # Initialize configuration");
    eprintln!("  pointplot init");
    eprintln!("\n  # Plot lab05.fn");
    eprintln!("  pointplot run");
    eprintln!("\n  # Write lab05.fn to sine.csv");
    eprintln!("  pointplot run --sink file");
    eprintln!("\n  # Plot lab05.fn_file into an HTML file");
    eprintln!("  pointplot run --table fn_file --html export/plot.html");
    eprintln!("\n  # Validate configuration");
    eprintln!("  pointplot validate -c config.toml");
    eprintln!("\nFor more help: pointplot --help");
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}
