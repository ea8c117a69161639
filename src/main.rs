mod cli_bin;

use anyhow::{Context, Result};
use clap::Parser;
use cli_bin::args::Cli;
use log::{debug, LevelFilter};
use promptmatter::{Config, ModeManagerTools};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let prompts_dir = cli
        .prompts_dir
        .clone()
        .context("no prompts directory: pass --prompts-dir or set MCP_PROMPTS_DIRECTORY")?;
    let config = Config::new(prompts_dir).with_read_only(cli.read_only);
    debug!("Using configuration: {:?}", config);

    let tools = ModeManagerTools::new(&config);
    let response = cli_bin::commands::run(cli.command, &tools)?;

    if response.is_error {
        eprintln!("{}", response);
        std::process::exit(1);
    }
    println!("{}", response.message.trim_end());
    Ok(())
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        LevelFilter::Info
    } else if cli.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
