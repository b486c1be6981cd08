use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::fields;
use crate::models::field::FieldCode;

/// Current config version. Bump this when changing the shape of
/// [`IntakeConfig`] and add the matching step in [`IntakeConfig::from_json_str`].
pub const CURRENT_VERSION: u32 = 1;

/// Largest encodable line, length prefix included.
pub const MAX_LINE_LEN: usize = 999;

/// `len3` + `code4`.
pub const LINE_OVERHEAD: usize = 7;

/// Byte alphabet used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Charset {
    /// Printable 7-bit ASCII (0x20–0x7E).
    Ascii,
    /// IBM codepage 437: printable ASCII plus 0x80–0xFE.
    #[default]
    Cp437,
}

impl Charset {
    /// Value of the charset field announcing this alphabet.
    pub fn record_code(self) -> &'static str {
        match self {
            Charset::Ascii => "1",
            Charset::Cp437 => "2",
        }
    }

    /// Whether `byte` may appear in transliterated output.
    pub fn permits(self, byte: u8) -> bool {
        match self {
            Charset::Ascii => (0x20..=0x7E).contains(&byte),
            Charset::Cp437 => (0x20..=0x7E).contains(&byte) || (0x80..=0xFE).contains(&byte),
        }
    }
}

/// Line terminator written after every record line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terminator {
    #[default]
    Lf,
    CrLf,
}

impl Terminator {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Terminator::Lf => b"\n",
            Terminator::CrLf => b"\r\n",
        }
    }

    pub fn width(self) -> usize {
        self.as_bytes().len()
    }
}

/// Settings of the record codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub terminator: Terminator,
    /// Whether a line's `len3` prefix counts its own terminator.
    pub length_counts_terminator: bool,
    /// The field holding the byte count of the whole record.
    pub total_length_code: FieldCode,
    /// Zero-padding width of the total length value.
    pub total_length_width: usize,
    /// The field closing every record.
    pub end_code: FieldCode,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            terminator: Terminator::Lf,
            length_counts_terminator: false,
            total_length_code: fields::TOTAL_LENGTH,
            total_length_width: 6,
            end_code: fields::END_OF_RECORD,
        }
    }
}

impl CodecConfig {
    /// Bytes a line adds to its own `len3` beyond code and value.
    pub fn counted_terminator_width(&self) -> usize {
        if self.length_counts_terminator {
            self.terminator.width()
        } else {
            0
        }
    }

    /// Largest value that still fits into one line.
    pub fn max_value_bytes(&self) -> usize {
        MAX_LINE_LEN - LINE_OVERHEAD - self.counted_terminator_width()
    }
}

/// The one immutable configuration value threaded into codec, wrapper
/// and renderer calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    pub config_version: u32,
    pub charset: Charset,
    /// Byte budget of one wrapped text-block value.
    pub max_line_bytes: usize,
    pub codec: CodecConfig,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            charset: Charset::Cp437,
            max_line_bytes: 70,
            codec: CodecConfig::default(),
        }
    }
}

impl IntakeConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        let max = self.codec.max_value_bytes();
        if self.max_line_bytes == 0 || self.max_line_bytes > max {
            return Err(CoreError::InvalidConfig(format!(
                "max_line_bytes must be between 1 and {max}, got {}",
                self.max_line_bytes
            )));
        }
        if self.codec.total_length_code == self.codec.end_code {
            return Err(CoreError::InvalidConfig(format!(
                "total length and end of record share code {}",
                self.codec.end_code
            )));
        }
        if self.codec.total_length_width > 9 {
            return Err(CoreError::InvalidConfig(format!(
                "total_length_width {} exceeds 9 digits",
                self.codec.total_length_width
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config, upgrading older versions.
    pub fn from_json_str(contents: &str) -> Result<Self, CoreError> {
        let json: serde_json::Value = serde_json::from_str(contents)?;
        let on_disk_version = match json.get("config_version").and_then(|v| v.as_u64()) {
            Some(version) => u32::try_from(version).map_err(|_| {
                CoreError::InvalidConfig(format!("config_version {version} is out of range"))
            })?,
            None => 0,
        };
        if on_disk_version > CURRENT_VERSION {
            return Err(CoreError::UnsupportedConfigVersion {
                found: on_disk_version,
                supported: CURRENT_VERSION,
            });
        }

        // v0 → v1 only stamped the version; every field keeps its default.
        let mut config: IntakeConfig = serde_json::from_value(json)?;
        config.config_version = CURRENT_VERSION;
        config.validate()?;
        Ok(config)
    }
}
