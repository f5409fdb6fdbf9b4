//! Argument splitting for the `ethtool` binary.
//!
//! Only the flags before the command name go through structopt. The command
//! name and everything after it are handed to the dispatcher untouched, so a
//! message or key may begin with `-`.

use std::ffi::OsString;
use std::path::PathBuf;
use structopt::clap;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "ethtool",
    about = "secp256k1 key, hash, sign and verify tool",
    usage = "ethtool [--config <path>] [--json] [command [params...]]",
    after_help = "COMMANDS:\n    help, genKey, prvToPub, hash, sign, verify, recover"
)]
pub struct Opt {
    /// Configuration file
    #[structopt(long, parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Print one JSON object instead of labelled lines
    #[structopt(long)]
    pub json: bool,
}

/// Global flags plus the raw command tail
#[derive(Debug)]
pub struct Invocation {
    pub opt: Opt,
    pub command: Option<String>,
    pub params: Vec<String>,
}

impl Invocation {
    /// Parse the process arguments; exits through clap on a flag error or `--help`
    pub fn from_args() -> Self {
        match Self::from_iter_safe(std::env::args_os()) {
            Ok(invocation) => invocation,
            Err(e) => e.exit(),
        }
    }

    /// Parse an argument list whose first item is the binary name.
    ///
    /// Flags are read up to the first argument that does not start with `-`
    /// (or the one following `--`); that argument is the command.
    pub fn from_iter_safe<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args
            .into_iter()
            .map(|arg| arg.into().to_string_lossy().into_owned());

        let mut flags = vec![args.next().unwrap_or_else(|| "ethtool".to_string())];
        let mut command = None;
        while let Some(arg) = args.next() {
            if arg == "--" {
                command = args.next();
                break;
            }
            if !arg.starts_with('-') || arg == "-" {
                command = Some(arg);
                break;
            }
            let takes_value = arg == "--config";
            flags.push(arg);
            if takes_value {
                if let Some(value) = args.next() {
                    flags.push(value);
                }
            }
        }
        let params = args.collect();

        let opt = Opt::from_iter_safe(flags)?;
        Ok(Self { opt, command, params })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Invocation {
        let argv = std::iter::once("ethtool").chain(args.iter().copied());
        Invocation::from_iter_safe(argv).unwrap()
    }

    #[test]
    fn test_no_arguments() {
        let invocation = parse(&[]);
        assert!(invocation.command.is_none());
        assert!(invocation.params.is_empty());
        assert!(!invocation.opt.json);
    }

    #[test]
    fn test_hyphenated_params_are_passed_through() {
        let invocation = parse(&["hash", "-n"]);
        assert_eq!(invocation.command.as_deref(), Some("hash"));
        assert_eq!(invocation.params, vec!["-n"]);

        let invocation = parse(&["hash", "-h"]);
        assert_eq!(invocation.params, vec!["-h"]);

        let invocation = parse(&["sign", "-h", "0x01"]);
        assert_eq!(invocation.command.as_deref(), Some("sign"));
        assert_eq!(invocation.params, vec!["-h", "0x01"]);
    }

    #[test]
    fn test_flag_after_command_is_a_param() {
        let invocation = parse(&["hash", "--json"]);
        assert!(!invocation.opt.json);
        assert_eq!(invocation.params, vec!["--json"]);

        let invocation = parse(&["verify", "msg", "--config", "x.toml"]);
        assert!(invocation.opt.config.is_none());
        assert_eq!(invocation.params, vec!["msg", "--config", "x.toml"]);
    }

    #[test]
    fn test_leading_flags() {
        let invocation = parse(&["--json", "hash", "hello"]);
        assert!(invocation.opt.json);
        assert_eq!(invocation.command.as_deref(), Some("hash"));
        assert_eq!(invocation.params, vec!["hello"]);

        let invocation = parse(&["--config", "ethtool.toml", "--json", "genKey"]);
        assert_eq!(invocation.opt.config, Some(PathBuf::from("ethtool.toml")));
        assert!(invocation.opt.json);
        assert_eq!(invocation.command.as_deref(), Some("genKey"));

        let invocation = parse(&["--config=ethtool.toml", "genKey"]);
        assert_eq!(invocation.opt.config, Some(PathBuf::from("ethtool.toml")));
    }

    #[test]
    fn test_double_dash_ends_flags() {
        let invocation = parse(&["--", "--json"]);
        assert!(!invocation.opt.json);
        assert_eq!(invocation.command.as_deref(), Some("--json"));
    }

    #[test]
    fn test_unknown_leading_flag_is_rejected() {
        let argv = ["ethtool", "--bogus", "hash", "x"];
        assert!(Invocation::from_iter_safe(argv).is_err());
    }

    #[test]
    fn test_help_flag_before_command() {
        let err = Invocation::from_iter_safe(["ethtool", "--help"]).unwrap_err();
        assert_eq!(err.kind, clap::ErrorKind::HelpDisplayed);
    }
}
