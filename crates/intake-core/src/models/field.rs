use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A 4-character alphanumeric field code (e.g. `3000`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldCode([u8; 4]);

impl FieldCode {
    /// Build a code from a literal. Only used for the reserved constants,
    /// which are checked by the `fields` tests.
    pub(crate) const fn from_static(bytes: &[u8; 4]) -> Self {
        Self(*bytes)
    }

    /// Validate raw bytes taken from a record line.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let code: [u8; 4] = bytes.try_into().ok()?;
        code.iter()
            .all(u8::is_ascii_alphanumeric)
            .then_some(Self(code))
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Always ASCII alphanumeric, see `from_bytes`.
        std::str::from_utf8(&self.0).unwrap_or("????")
    }
}

impl fmt::Debug for FieldCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldCode({})", self.as_str())
    }
}

impl fmt::Display for FieldCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes()).ok_or_else(|| CoreError::InvalidFieldCode(s.to_string()))
    }
}

impl TryFrom<String> for FieldCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldCode> for String {
    fn from(code: FieldCode) -> Self {
        code.as_str().to_string()
    }
}

/// One field of a record. The value is kept as wire bytes because the
/// record charset may be an 8-bit codepage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub code: FieldCode,
    pub value: Vec<u8>,
}

impl Field {
    pub fn new(code: FieldCode, value: impl Into<Vec<u8>>) -> Self {
        Self {
            code,
            value: value.into(),
        }
    }

    /// A field with no value, such as the end-of-record marker.
    pub fn empty(code: FieldCode) -> Self {
        Self::new(code, Vec::new())
    }
}
