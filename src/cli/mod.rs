//! Command dispatcher: one command name plus positional string parameters.

pub mod args;
pub mod console;

use log::debug;
use std::io::{self, Write};

use crate::config::OutputConfig;
use crate::error::{ToolError, EXIT_OK};
use crate::ops;

pub use args::{Invocation, Opt};
pub use console::{Console, Line};

/// A parsed command with its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `help`, no command, or an unrecognised command
    Help,
    GenKey,
    PrvToPub { private_key: String },
    Hash { message: String },
    Sign { message: String, private_key: String },
    Verify { message: String, signature: String, address: String },
    Recover { message: String, signature: String },
}

impl Command {
    /// Route a command name and check its parameter count
    pub fn parse(name: Option<&str>, params: &[String]) -> Result<Self, ToolError> {
        let name = match name {
            Some(name) => name,
            None => return Ok(Command::Help),
        };

        let command = match name {
            "help" => Command::Help,
            "genKey" => Command::GenKey,
            "prvToPub" => {
                let [private_key] = exact::<1>(params, "prvToPub need 1 string param")?;
                Command::PrvToPub { private_key }
            }
            "hash" => match params.first() {
                Some(message) => Command::Hash { message: message.clone() },
                None => return Err(usage("hash need input")),
            },
            "sign" => {
                let [message, private_key] = exact::<2>(params, "sign need 2 string params")?;
                Command::Sign { message, private_key }
            }
            "verify" => {
                let [message, signature, address] =
                    exact::<3>(params, "verify need 3 string params")?;
                Command::Verify { message, signature, address }
            }
            "recover" => {
                let [message, signature] = exact::<2>(params, "recover need 2 string params")?;
                Command::Recover { message, signature }
            }
            other => {
                debug!("unrecognised command {:?}", other);
                Command::Help
            }
        };
        Ok(command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::GenKey => "genKey",
            Command::PrvToPub { .. } => "prvToPub",
            Command::Hash { .. } => "hash",
            Command::Sign { .. } => "sign",
            Command::Verify { .. } => "verify",
            Command::Recover { .. } => "recover",
        }
    }

    /// Banner printed before the command's output
    pub fn banner(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::GenKey => "generate Key",
            Command::PrvToPub { .. } => "prvToPub",
            Command::Hash { .. } => "sha3-hash",
            Command::Sign { .. } => "sign",
            Command::Verify { .. } => "verify",
            Command::Recover { .. } => "recover",
        }
    }
}

fn usage(message: &str) -> ToolError {
    ToolError::Usage(message.to_string())
}

fn exact<const N: usize>(params: &[String], message: &str) -> Result<[String; N], ToolError> {
    <[String; N]>::try_from(params.to_vec()).map_err(|_| usage(message))
}

/// Run one invocation and return the process exit status.
///
/// The tool banner is printed first. Usage text and both verification
/// outcomes exit with `EXIT_OK`; an aborted operation exits with its error
/// class. Only writing or flushing `out` can fail.
pub fn run<W: Write>(
    name: Option<&str>,
    params: &[String],
    config: &OutputConfig,
    out: &mut W,
) -> io::Result<i32> {
    let code = dispatch(name, params, config, out)?;
    out.flush()?;
    Ok(code)
}

fn dispatch<W: Write>(
    name: Option<&str>,
    params: &[String],
    config: &OutputConfig,
    out: &mut W,
) -> io::Result<i32> {
    let mut console = Console::new(out, config);
    console.banner(console::TOOL_BANNER)?;

    let command = match Command::parse(name, params) {
        Ok(command) => command,
        Err(e) => {
            debug!("usage error: {}", e);
            console.error(name.unwrap_or_default(), &e, &[])?;
            return Ok(e.exit_code());
        }
    };

    if command == Command::Help {
        console.usage()?;
        return Ok(EXIT_OK);
    }

    console.banner(command.banner())?;
    match execute(&command, &console) {
        Ok(lines) => {
            console.report(command.name(), &lines)?;
            Ok(EXIT_OK)
        }
        Err(e) => {
            debug!("{} failed: {}", command.name(), e);
            // A verification that could not decode its input is still a "false"
            let extra = match command {
                Command::Verify { .. } => vec![
                    Line::Note("verify failed".to_string()),
                    console::verified_line(false),
                ],
                _ => Vec::new(),
            };
            console.error(command.name(), &e, &extra)?;
            Ok(e.exit_code())
        }
    }
}

fn execute<W: Write>(
    command: &Command,
    console: &Console<'_, W>,
) -> Result<Vec<Line>, ToolError> {
    let lines = match command {
        Command::Help => Vec::new(),
        Command::GenKey => console.key_lines(&ops::gen_key()?),
        Command::PrvToPub { private_key } => console.key_lines(&ops::prv_to_pub(private_key)?),
        Command::Hash { message } => console.hash_lines(&ops::hash_message(message)),
        Command::Sign { message, private_key } => {
            console.sign_lines(&ops::sign(message, private_key)?)
        }
        Command::Verify { message, signature, address } => {
            console.verify_lines(&ops::verify(message, signature, address)?)
        }
        Command::Recover { message, signature } => {
            console.recover_lines(&ops::recover(message, signature)?)
        }
    };
    Ok(lines)
}
