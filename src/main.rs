use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod config;
mod diagnostics;
mod render;

pub type Result<T> = anyhow::Result<T>;

const DEFAULT_CONFIG_PATH: &str = "chain-config.json";

#[derive(Parser)]
#[command(name = "chainconf")]
#[command(about = "Network and compiler configuration for a Solidity build toolchain", long_about = None)]
struct Cli {
    /// Configuration file to read (or write, for `init`).
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// -v for info, -vv for debug. RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default development configuration.
    Init {
        /// Use the Ganache CLI port (8545) instead of the Ganache UI port (7545).
        #[arg(long)]
        ganache_cli: bool,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Load and validate the configuration.
    Check,

    /// Print a summary of networks and the compiler pin.
    Show,

    /// Render the configuration in another format.
    Export {
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },

    /// Print the endpoint URL of a network.
    Url {
        #[arg(default_value = config::DEFAULT_NETWORK)]
        network: String,

        /// Websocket URL instead of HTTP.
        #[arg(long)]
        ws: bool,
    },

    /// Print the network that accepts a chain id.
    Resolve { network_id: u64 },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    /// CommonJS module (`module.exports = {...}`).
    Js,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.cmd {
        Commands::Init { ganache_cli, force } => {
            if cli.config.exists() && !force {
                anyhow::bail!(
                    "{}",
                    diagnostics::error_message(format!(
                        "{} already exists (use --force to overwrite)",
                        cli.config.display()
                    ))
                );
            }
            let port = if ganache_cli {
                config::GANACHE_CLI_PORT
            } else {
                config::GANACHE_UI_PORT
            };
            let cfg = config::BuildConfiguration::development(port);
            std::fs::write(&cli.config, render::render_json(&cfg)?)?;
            println!("Wrote {}", cli.config.display());
        }
        Commands::Check => {
            let cfg = config::load_file(&cli.config)?;
            println!(
                "ok: {} network(s), solc {}",
                cfg.networks.len(),
                cfg.compilers.solc.version
            );
        }
        Commands::Show => {
            let cfg = config::load_file(&cli.config)?;
            print!("{}", render::render_summary(&cfg));
        }
        Commands::Export { format, out } => {
            let cfg = config::load_file(&cli.config)?;
            let text = match format {
                Format::Json => render::render_json(&cfg)?,
                Format::Js => render::render_js_module(&cfg)?,
            };
            match out {
                Some(path) => {
                    std::fs::write(&path, text)?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{}", text),
            }
        }
        Commands::Url { network, ws } => {
            let cfg = config::load_file(&cli.config)?;
            let ep = cfg.network(&network)?;
            println!("{}", if ws { ep.ws_url() } else { ep.rpc_url() });
        }
        Commands::Resolve { network_id } => {
            let cfg = config::load_file(&cli.config)?;
            match cfg.resolve_network(network_id) {
                Some((name, ep)) => println!("{} ({})", name, ep.rpc_url()),
                None => anyhow::bail!(
                    "{}",
                    diagnostics::error_message(format!(
                        "no network accepts network_id {}",
                        network_id
                    ))
                ),
            }
        }
    }

    Ok(())
}
