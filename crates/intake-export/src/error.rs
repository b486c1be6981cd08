use thiserror::Error;

use intake_gdt::error::CodecError;

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("request record has no patient id (3000)")]
    MissingPatientId,

    #[error("record encoding failed: {0}")]
    Codec(#[from] CodecError),
}
