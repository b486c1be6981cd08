//! Reserved field codes of the device-data-transfer record format.
//!
//! Values are opaque to the codec; business meaning belongs to whoever
//! composes the record.

use crate::models::field::FieldCode;

// Record framing
pub const RECORD_TYPE: FieldCode = FieldCode::from_static(b"8000");
pub const TOTAL_LENGTH: FieldCode = FieldCode::from_static(b"8100");
pub const END_OF_RECORD: FieldCode = FieldCode::from_static(b"9999");

// Exchange identities, swapped between request and answer
pub const SENDER_ID: FieldCode = FieldCode::from_static(b"8315");
pub const RECEIVER_ID: FieldCode = FieldCode::from_static(b"8316");

pub const CHARSET: FieldCode = FieldCode::from_static(b"9206");
pub const FORMAT_VERSION: FieldCode = FieldCode::from_static(b"9218");
pub const DEVICE_TAG: FieldCode = FieldCode::from_static(b"8402");

// Patient master data
pub const PATIENT_ID: FieldCode = FieldCode::from_static(b"3000");
pub const LAST_NAME: FieldCode = FieldCode::from_static(b"3101");
pub const FIRST_NAME: FieldCode = FieldCode::from_static(b"3102");
pub const BIRTH_DATE: FieldCode = FieldCode::from_static(b"3103");
pub const HEIGHT_CM: FieldCode = FieldCode::from_static(b"3622");
pub const WEIGHT_KG: FieldCode = FieldCode::from_static(b"3623");
pub const PHONE_1: FieldCode = FieldCode::from_static(b"3626");
pub const PHONE_2: FieldCode = FieldCode::from_static(b"3618");
pub const EMAIL: FieldCode = FieldCode::from_static(b"3619");

// Result payload
pub const TEST_IDENT: FieldCode = FieldCode::from_static(b"6200");
pub const TEST_NAME: FieldCode = FieldCode::from_static(b"6201");
pub const TEXT_BLOCK: FieldCode = FieldCode::from_static(b"6228");

// Attachment metadata, repeated once per attachment
pub const ATTACHMENT_SEQ: FieldCode = FieldCode::from_static(b"6302");
pub const ATTACHMENT_TYPE: FieldCode = FieldCode::from_static(b"6303");
pub const ATTACHMENT_DESCRIPTION: FieldCode = FieldCode::from_static(b"6304");
pub const ATTACHMENT_FILENAME: FieldCode = FieldCode::from_static(b"6305");

/// Record type values carried in [`RECORD_TYPE`].
pub mod record_type {
    pub const REQUEST_DATA: &str = "6302";
    pub const TRANSMIT_DATA: &str = "6310";
}
