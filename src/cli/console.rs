//! Console rendering for operation reports.

use serde_json::{Map, Value};
use std::io::{self, Write};

use crate::config::{OutputConfig, OutputFormat};
use crate::crypto::encoding::encode_hex;
use crate::crypto::Address;
use crate::error::ToolError;
use crate::ops::{HashReport, KeyReport, RecoverReport, SignReport, VerifyReport};

pub const TOOL_BANNER: &str = "ethTool";

const USAGE: &[&str] = &[
    "ethTool [--config <path>] [--json] arg [params]",
    "arg:",
    "\t help",
    "\t genKey",
    "\t prvToPub\t privateKey",
    "\t hash\t msg",
    "\t sign\t msg privateKey",
    "\t verify\t msg signature address",
    "\t recover\t msg signature",
];

/// One piece of command output
#[derive(Debug, Clone)]
pub enum Line {
    /// A result value. `label` is the text-mode label; `None` means JSON only.
    Field {
        key: &'static str,
        label: Option<String>,
        value: Value,
    },
    /// Text-only status line
    Note(String),
}

impl Line {
    fn field(key: &'static str, label: impl Into<String>, value: impl Into<Value>) -> Self {
        Line::Field { key, label: Some(label.into()), value: value.into() }
    }

    fn json_only(key: &'static str, value: impl Into<Value>) -> Self {
        Line::Field { key, label: None, value: value.into() }
    }
}

/// Writes banners, usage text, reports and errors in the configured format
pub struct Console<'a, W: Write> {
    out: &'a mut W,
    config: &'a OutputConfig,
}

impl<'a, W: Write> Console<'a, W> {
    pub fn new(out: &'a mut W, config: &'a OutputConfig) -> Self {
        Self { out, config }
    }

    fn is_text(&self) -> bool {
        self.config.format == OutputFormat::Text
    }

    /// `========== <name> ==========` in text mode
    pub fn banner(&mut self, name: &str) -> io::Result<()> {
        if self.is_text() && self.config.banner {
            writeln!(self.out, "========== {} ==========", name)?;
        }
        Ok(())
    }

    pub fn usage(&mut self) -> io::Result<()> {
        if self.is_text() {
            for line in USAGE {
                writeln!(self.out, "{}", line)?;
            }
            Ok(())
        } else {
            let usage: Vec<Value> = USAGE.iter().map(|l| Value::from(l.trim())).collect();
            let mut object = Map::new();
            object.insert("usage".to_string(), Value::Array(usage));
            self.write_json(object)
        }
    }

    /// Print an operation's lines; in JSON mode they form one object
    pub fn report(&mut self, command: &str, lines: &[Line]) -> io::Result<()> {
        if self.is_text() {
            for line in lines {
                match line {
                    Line::Field { label: Some(label), value, .. } => {
                        writeln!(self.out, "{}: {}", label, text_value(value))?
                    }
                    Line::Field { label: None, .. } => {}
                    Line::Note(note) => writeln!(self.out, "{}", note)?,
                }
            }
            Ok(())
        } else {
            let mut object = Map::new();
            object.insert("command".to_string(), Value::from(command));
            for line in lines {
                if let Line::Field { key, value, .. } = line {
                    object.insert((*key).to_string(), value.clone());
                }
            }
            self.write_json(object)
        }
    }

    /// Print an error that aborted `command`, followed by any extra lines
    pub fn error(&mut self, command: &str, err: &ToolError, extra: &[Line]) -> io::Result<()> {
        let mut lines = vec![
            Line::Note(err.to_string()),
            Line::json_only("error", err.to_string()),
        ];
        lines.extend_from_slice(extra);
        self.report(command, &lines)
    }

    fn write_json(&mut self, object: Map<String, Value>) -> io::Result<()> {
        serde_json::to_writer(&mut *self.out, &Value::Object(object))?;
        writeln!(self.out)
    }

    fn hex(&self, bytes: &[u8]) -> String {
        encode_hex(bytes, self.config.hex_prefix)
    }

    fn address(&self, address: &Address) -> String {
        if self.config.checksum_address {
            address.to_checksum()
        } else {
            address.to_lower_hex()
        }
    }

    pub fn key_lines(&self, report: &KeyReport) -> Vec<Line> {
        let keypair = &report.keypair;
        vec![
            Line::field("private_key", "privateKey", self.hex(&keypair.secret_bytes())),
            Line::field("public_key", "publicKey", self.hex(keypair.public().as_bytes())),
            Line::field("address", "address", self.address(&keypair.address())),
        ]
    }

    pub fn hash_lines(&self, report: &HashReport) -> Vec<Line> {
        vec![
            Line::json_only("message", report.message.as_str()),
            Line::field(
                "digest",
                format!("hash of {}", report.message),
                self.hex(report.digest.as_bytes()),
            ),
        ]
    }

    pub fn sign_lines(&self, report: &SignReport) -> Vec<Line> {
        vec![
            Line::field("digest", "the hash of msg", self.hex(report.digest.as_bytes())),
            Line::field("signature", "signature", self.hex(report.signature.as_bytes())),
        ]
    }

    pub fn verify_lines(&self, report: &VerifyReport) -> Vec<Line> {
        let mut lines = vec![Line::json_only("digest", self.hex(report.digest.as_bytes()))];
        if report.verified {
            lines.push(Line::Note("verify success ^_^".to_string()));
        } else {
            lines.push(Line::Note("verify failed".to_string()));
            if let Some(recovered) = &report.recovered {
                lines.push(Line::field(
                    "recovered_address",
                    "get address from signature",
                    self.address(recovered),
                ));
            }
        }
        lines.push(verified_line(report.verified));
        lines
    }

    pub fn recover_lines(&self, report: &RecoverReport) -> Vec<Line> {
        vec![
            Line::field("digest", "the hash of msg", self.hex(report.digest.as_bytes())),
            Line::field("public_key", "publicKey", self.hex(report.public_key.as_bytes())),
            Line::field("address", "address", self.address(&report.address)),
        ]
    }
}

/// The verification result; rendered as `result: true|false` in text mode
pub fn verified_line(verified: bool) -> Line {
    Line::field("verified", "result", verified)
}

fn text_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
