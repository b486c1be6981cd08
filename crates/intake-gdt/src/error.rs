use thiserror::Error;

use intake_core::models::field::FieldCode;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("record has no total length field ({0})")]
    MissingTotalLength(FieldCode),

    #[error("line for field {code} is {len} bytes, the format allows at most 999")]
    LineTooLong { code: FieldCode, len: usize },

    #[error("total length did not settle after {passes} passes")]
    LengthDidNotConverge { passes: usize },
}
