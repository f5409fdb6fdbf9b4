use log::error;
use std::io;

use ethtool::cli::{self, Invocation};
use ethtool::config::{Config, OutputFormat};
use ethtool::init_logger;

fn main() {
    let Invocation { opt, command, params } = Invocation::from_args();

    let mut config = match &opt.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                init_logger("warn");
                error!("Failed to load configuration: {}", e);
                std::process::exit(ethtool::ToolError::from(e).exit_code());
            }
        },
        None => Config::default(),
    };

    init_logger(&config.logging.level);

    if opt.json {
        config.output.format = OutputFormat::Json;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let code = match cli::run(command.as_deref(), &params, &config.output, &mut out) {
        Ok(code) => code,
        Err(e) => {
            error!("Failed to write output: {}", e);
            1
        }
    };
    std::process::exit(code);
}
