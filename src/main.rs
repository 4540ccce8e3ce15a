//! Binary entrypoint for the Riddlebox CLI.
//!
//! Commands:
//! - `start [--bind <addr>] [--offline]` - run the game server
//! - `init` - write a starter `config.toml`
//! - `words` - list the active word catalog
//! - `status` - print a configuration summary and whether a generator key is usable
//!
//! See the library crate docs for module-level details: `riddlebox::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};

use riddlebox::api::GameServer;
use riddlebox::config::Config;
use riddlebox::game::GameEngine;
use riddlebox::generator::{GroqClient, ScriptedGenerator, TextGenerator};

#[derive(Parser)]
#[command(name = "riddlebox")]
#[command(about = "A word-guessing game server with model-generated riddle clues")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the game server
    Start {
        /// Listen address, overrides server.bind (e.g., 0.0.0.0:8000)
        #[arg(short, long)]
        bind: Option<String>,

        /// Serve scripted placeholder clues instead of calling the model
        #[arg(long)]
        offline: bool,
    },
    /// Write a default configuration file
    Init,
    /// List the words in the active catalog
    Words,
    /// Show configuration summary
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // Missing .env is fine; the key may already be exported
    let _ = dotenv::dotenv();

    let config = match cli.command {
        Commands::Init => None,
        _ => match Config::load(&cli.config).await {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                eprintln!("{} (using defaults)", e);
                None
            }
        },
    };
    init_logging(&config, cli.verbose);
    let config = config.unwrap_or_default();

    match cli.command {
        Commands::Start { bind, offline } => {
            info!("Starting Riddlebox v{}", env!("CARGO_PKG_VERSION"));
            let mut config = config;
            if let Some(addr) = bind {
                config.server.bind = addr;
            }
            if offline {
                warn!("Offline mode: clues are scripted placeholders");
                serve(config, ScriptedGenerator::new("Offline clue")).await?;
            } else {
                let generator = GroqClient::new(config.generator.clone());
                serve(config, generator).await?;
            }
        }
        Commands::Init => {
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
        }
        Commands::Words => {
            let catalog = config.game.load_catalog()?;
            for entry in catalog.entries() {
                println!("{:<16} {} hint prompts", entry.word, entry.hints.len());
            }
        }
        Commands::Status => {
            let catalog = config.game.load_catalog()?;
            let generator = GroqClient::new(config.generator.clone());
            println!("Listen address : {}", config.server.bind);
            println!(
                "Debug routes   : {}",
                if config.server.debug_routes { "ENABLED (not for production)" } else { "disabled" }
            );
            println!("Model          : {}", config.generator.model);
            println!(
                "API key        : {}",
                if generator.is_configured() { "configured" } else { "missing" }
            );
            println!("Catalog        : {} words", catalog.len());
            match config.game.seed {
                Some(seed) => println!("RNG seed       : {}", seed),
                None => println!("RNG seed       : entropy"),
            }
        }
    }

    Ok(())
}

async fn serve<G>(config: Config, generator: G) -> Result<()>
where
    G: TextGenerator + Send + Sync + 'static,
{
    let catalog = config.game.load_catalog()?;
    info!("Loaded {} words", catalog.len());
    let engine = GameEngine::new(catalog, generator, config.game.seed);
    let server = GameServer::new(config.server, engine);
    server.run().await
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides config
    let base_level = match (verbosity, config) {
        (0, Some(cfg)) => cfg.logging.level_filter(),
        (0, None) => log::LevelFilter::Info,
        (1, _) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_ref())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

    if let Some(f) = log_file {
        let file = std::sync::Mutex::new(f);
        // Mirror to the console only when attached to a terminal
        let is_tty = atty::is(atty::Stream::Stdout);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = file.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
