//! Binary entrypoint for the Guildbook CLI.
//!
//! Commands:
//! - `member add|remove|list`, `quest add|complete|list` - edit the roster and quest board
//! - `resource [--gold N] [--item NAME --quantity N]` - adjust the treasury
//! - `announce <message>` / `info [--name] [--description]` - guild notices and identity
//! - `web [--output FILE]` - render the static guild page
//! - `status` - print a short overview
//! - `menu` - interactive numbered menu
//! - `init` - write a starter `guildbook.toml`
//!
//! See the library crate docs for module-level details: `guildbook::`.
use std::io::{self, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, info};

use guildbook::config::Config;
use guildbook::console::{dispatch, GuildCommand, GuildMenu};
use guildbook::guild::GuildStore;

#[derive(Parser)]
#[command(name = "guildbook")]
#[command(about = "Manage guild members, quests and resources, and publish a guild web page")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "guildbook.toml", global = true)]
    config: String,

    /// Guild data file (overrides storage.data_file from the config)
    #[arg(short, long, global = true)]
    data: Option<String>,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Guild(GuildCommand),
    /// Open the interactive menu
    Menu,
    /// Write a default configuration file
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            init_logging(&None, cli.verbose);
            Config::create_default(&cli.config)?;
            info!("Configuration file created at {}", cli.config);
            println!("[+] Configuration file created at {}", cli.config);
        }
        Commands::Guild(command) => {
            let (config, mut store) = open_store(&cli.config, cli.data.as_deref(), cli.verbose)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            dispatch(&mut store, command, &config.web.output_file, &mut out)?;
            out.flush()?;
        }
        Commands::Menu => {
            let (config, mut store) = open_store(&cli.config, cli.data.as_deref(), cli.verbose)?;
            info!("Starting interactive menu on {}", store.path().display());
            let interactive = atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout);
            let stdin = io::stdin();
            let stdout = io::stdout();
            GuildMenu::new(&mut store, stdin.lock(), stdout.lock())
                .with_default_output(&config.web.output_file)
                .with_pauses(interactive)
                .run()?;
        }
    }

    Ok(())
}

/// Load config, start logging, and open the guild store it points at.
fn open_store(config_path: &str, data: Option<&str>, verbosity: u8) -> Result<(Config, GuildStore)> {
    let config = Config::load_or_default(config_path)?;
    init_logging(&Some(config.clone()), verbosity);

    let data_file = data.unwrap_or(&config.storage.data_file).to_string();
    debug!("Using guild data file {}", data_file);

    let mut store = GuildStore::open(&data_file);
    if let Some(warning) = store.take_load_warning() {
        eprintln!(
            "Warning: Could not load {} ({}). Starting with empty data.",
            data_file, warning
        );
    }
    Ok((config, store))
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .map(|c| c.logging.level_filter())
            .unwrap_or(log::LevelFilter::Warn),
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|c| c.logging.file.as_ref())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

    if let Some(f) = log_file {
        let file = std::sync::Mutex::new(f);
        // Mirror to the console only when someone is watching stderr
        let is_tty = atty::is(atty::Stream::Stderr);
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
            writeln!(
                fmt,
                "{} [{}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.args()
            )
        });
    }
    let _ = builder.try_init();
}
