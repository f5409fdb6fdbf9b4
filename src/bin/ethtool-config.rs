use std::path::PathBuf;
use structopt::StructOpt;
use ethtool::config::{Config, OutputFormat};
use ethtool::init_logger;
use log::{info, error};

#[derive(Debug, StructOpt)]
#[structopt(name = "ethtool-config", about = "ethtool configuration tool")]
struct Opt {
    /// Output file (prints to stdout when omitted)
    #[structopt(long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Validate and print an existing configuration file
    #[structopt(long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// Output format (text, json)
    #[structopt(long)]
    format: Option<OutputFormat>,

    /// Print addresses in lowercase instead of EIP-55 checksum case
    #[structopt(long)]
    lowercase_addresses: bool,

    /// Prefix keys, digests and signatures with 0x
    #[structopt(long)]
    hex_prefix: bool,

    /// Omit ========== banners
    #[structopt(long)]
    no_banner: bool,

    /// Default log level
    #[structopt(long)]
    log_level: Option<String>,
}

fn main() {
    init_logger("info");

    let opt = Opt::from_args();

    let mut config = match &opt.input {
        Some(input) => match Config::load(input) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load configuration: {}", e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    // Update config with command line arguments
    if let Some(format) = opt.format {
        config.output.format = format;
    }

    if opt.lowercase_addresses {
        config.output.checksum_address = false;
    }

    if opt.hex_prefix {
        config.output.hex_prefix = true;
    }

    if opt.no_banner {
        config.output.banner = false;
    }

    if let Some(log_level) = opt.log_level {
        config.logging.level = log_level;
    }

    if let Some(output) = opt.output {
        match config.save(&output) {
            Ok(_) => {
                info!("Configuration saved to {:?}", output);
            },
            Err(e) => {
                error!("Failed to save configuration: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        match config.to_toml() {
            Ok(config_str) => {
                println!("{}", config_str);
            },
            Err(e) => {
                error!("Failed to serialize configuration: {}", e);
                std::process::exit(1);
            }
        }
    }
}
