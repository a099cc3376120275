use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use mapguessr::catalog::load_catalog;
use mapguessr::config::GameConfig;
use std::process;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "data/questions.json")]
    catalog: String,

    /// JSON game config; values given on the command line still win.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Play(cmd::play::PlayArgs),
    Simulate(cmd::simulate::SimulateArgs),
    Validate(cmd::validate::ValidateArgs),
}

fn resolve_config(cli: &Cli, cli_config: &GameConfig, sub_matches: &ArgMatches) -> GameConfig {
    let Some(path) = &cli.config else {
        return cli_config.clone();
    };

    info!("⚖️  Loading game config from: {}", path);
    match GameConfig::load_from_file(path) {
        Ok(mut file_config) => {
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        Err(e) => {
            warn!("⚠️  Could not load '{}': {}. Using command line values.", path, e);
            cli_config.clone()
        }
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    let (cli_config, sub_name) = match &cli.command {
        Commands::Play(args) => (&args.config, "play"),
        Commands::Simulate(args) => (&args.config, "simulate"),
        Commands::Validate(args) => (&args.config, "validate"),
    };
    let Some(sub_matches) = matches.subcommand_matches(sub_name) else {
        error!("❌ Missing subcommand arguments for '{}'", sub_name);
        process::exit(1);
    };

    let config = resolve_config(&cli, cli_config, sub_matches);
    if let Err(e) = config.validate() {
        error!("❌ {}", e);
        process::exit(1);
    }

    info!("📂 Loading catalog: {}", cli.catalog);
    let catalog = load_catalog(&cli.catalog).unwrap_or_else(|e| {
        error!("❌ Could not load catalog '{}': {}", cli.catalog, e);
        process::exit(1);
    });

    let outcome = match cli.command {
        Commands::Play(args) => cmd::play::run(args, config, &catalog),
        Commands::Simulate(args) => cmd::simulate::run(args, config, &catalog),
        Commands::Validate(_) => cmd::validate::run(&config, &catalog),
    };

    if let Err(e) = outcome {
        error!("❌ {}", e);
        process::exit(1);
    }
}
