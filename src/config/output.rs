use serde::{Serialize, Deserialize};
use std::str::FromStr;

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Banners and labelled lines
    Text,
    /// One JSON object per run
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,

    /// Print addresses with the EIP-55 mixed-case checksum
    pub checksum_address: bool,

    /// Prefix keys, digests and signatures with 0x
    pub hex_prefix: bool,

    /// Print ========== banners in text mode
    pub banner: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            checksum_address: true,
            hex_prefix: false,
            banner: true,
        }
    }
}
