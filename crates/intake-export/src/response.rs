//! The outbound answer record.

use std::path::Path;

use intake_core::config::{Charset, IntakeConfig};
use intake_core::fields;
use intake_core::models::field::{Field, FieldCode};
use intake_gdt::charset::{clean_text, decode_cp437, transliterate};
use intake_gdt::codec::{DecodedRecord, encode};
use intake_questionnaire::flatten::SectionBlock;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ComposeError;
use crate::render::render_blocks;

/// Title of the block listing contact details that differ from the request.
pub const CONTACT_BLOCK_TITLE: &str = "Updated contact information";

const MAX_MEASUREMENT_CHARS: usize = 10;
const MAX_CONTACT_CHARS: usize = 70;
const MAX_COMPARED_CHARS: usize = 200;

/// Who the answer record claims to be, and what it falls back to when the
/// request leaves identity fields empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseIdentity {
    pub record_type: String,
    pub format_version: String,
    pub test_ident: String,
    pub test_name: String,
    /// Sender used when the request names no receiver.
    pub default_sender: String,
    /// Receiver used when the request names no sender.
    pub default_receiver: String,
    pub default_device_tag: String,
}

impl Default for ResponseIdentity {
    fn default() -> Self {
        Self {
            record_type: fields::record_type::TRANSMIT_DATA.to_string(),
            format_version: "02.10".to_string(),
            test_ident: "ANA1".to_string(),
            test_name: "Intake questionnaire".to_string(),
            default_sender: "INTAKE_GDT".to_string(),
            default_receiver: "PMS_GDT".to_string(),
            default_device_tag: "ALLG0".to_string(),
        }
    }
}

/// Measurements and contact details entered alongside the questionnaire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientUpdates {
    pub height_cm: String,
    pub weight_kg: String,
    pub phone1: String,
    pub phone2: String,
    pub email: String,
}

impl PatientUpdates {
    /// Whitespace collapsed, each value cut to its field's limit.
    pub fn cleaned(&self) -> Self {
        Self {
            height_cm: clean_text(&self.height_cm, MAX_MEASUREMENT_CHARS),
            weight_kg: clean_text(&self.weight_kg, MAX_MEASUREMENT_CHARS),
            phone1: clean_text(&self.phone1, MAX_CONTACT_CHARS),
            phone2: clean_text(&self.phone2, MAX_CONTACT_CHARS),
            email: clean_text(&self.email, MAX_CONTACT_CHARS),
        }
    }

    fn fields(&self) -> [(FieldCode, &str); 5] {
        [
            (fields::HEIGHT_CM, self.height_cm.as_str()),
            (fields::WEIGHT_KG, self.weight_kg.as_str()),
            (fields::PHONE_1, self.phone1.as_str()),
            (fields::PHONE_2, self.phone2.as_str()),
            (fields::EMAIL, self.email.as_str()),
        ]
    }
}

/// One file referenced by the answer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// File type tag, e.g. `JPG`.
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
    pub filename: String,
}

impl Attachment {
    /// An attachment typed by its upper-cased file extension.
    pub fn from_filename(filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let kind = Path::new(&filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_uppercase)
            .unwrap_or_default();
        Self {
            kind,
            description: None,
            filename,
        }
    }
}

/// Everything an answer record is built from besides identity and config.
#[derive(Debug, Clone, Copy)]
pub struct ResponseParts<'a> {
    pub request: &'a DecodedRecord,
    pub patient: &'a PatientUpdates,
    pub blocks: &'a [SectionBlock],
    pub attachments: &'a [Attachment],
}

/// The block announcing contact details that changed, if any did.
///
/// A value counts as changed when it is non-empty after normalization and
/// differs from the normalized request value.
pub fn contact_changes(request: &DecodedRecord, patient: &PatientUpdates) -> Option<SectionBlock> {
    let patient = patient.cleaned();
    let entries = [
        ("Phone 1", fields::PHONE_1, &patient.phone1),
        ("Phone 2", fields::PHONE_2, &patient.phone2),
        ("E-mail", fields::EMAIL, &patient.email),
    ];

    let bullets: Vec<String> = entries
        .into_iter()
        .filter(|(_, code, value)| {
            let new = clean_text(value, MAX_COMPARED_CHARS);
            let old = clean_text(&request.text_or_empty(*code), MAX_COMPARED_CHARS);
            !new.is_empty() && new != old
        })
        .map(|(label, _, value)| format!("{label}: {value}"))
        .collect();

    (!bullets.is_empty()).then(|| SectionBlock {
        title: CONTACT_BLOCK_TITLE.to_string(),
        bullets,
    })
}

/// Build the ordered fields of the answer record.
///
/// Identity values from the request are copied byte for byte when the
/// configured charset is CP437 and re-encoded otherwise, so every byte
/// matches the announced charset. New text is transliterated into
/// `config.charset`. The total length field carries a zero placeholder
/// until [`encode`] patches it.
pub fn compose(
    parts: ResponseParts<'_>,
    identity: &ResponseIdentity,
    config: &IntakeConfig,
) -> Result<Vec<Field>, ComposeError> {
    let request = parts.request;
    let patient_id = request
        .get(fields::PATIENT_ID)
        .filter(|id| !id.is_empty())
        .ok_or(ComposeError::MissingPatientId)?;

    let text = |value: &str| transliterate(value, config.charset);
    let copied = |value: &[u8]| match config.charset {
        Charset::Cp437 => value.to_vec(),
        Charset::Ascii => text(&decode_cp437(value)),
    };
    let request_or = |code: FieldCode, default: &str| match request.get(code) {
        Some(value) if !value.is_empty() => copied(value),
        _ => text(default),
    };

    let mut out = vec![
        Field::new(fields::RECORD_TYPE, text(&identity.record_type)),
        Field::new(
            config.codec.total_length_code,
            "0".repeat(config.codec.total_length_width),
        ),
        Field::new(
            fields::SENDER_ID,
            request_or(fields::RECEIVER_ID, &identity.default_sender),
        ),
        Field::new(
            fields::RECEIVER_ID,
            request_or(fields::SENDER_ID, &identity.default_receiver),
        ),
        Field::new(fields::CHARSET, config.charset.record_code()),
        Field::new(fields::FORMAT_VERSION, text(&identity.format_version)),
        Field::new(fields::PATIENT_ID, copied(patient_id)),
    ];

    for code in [fields::LAST_NAME, fields::FIRST_NAME, fields::BIRTH_DATE] {
        if let Some(value) = request.get(code).filter(|v| !v.is_empty()) {
            out.push(Field::new(code, copied(value)));
        }
    }
    out.push(Field::new(
        fields::DEVICE_TAG,
        request_or(fields::DEVICE_TAG, &identity.default_device_tag),
    ));

    let patient = parts.patient.cleaned();
    for (code, value) in patient.fields() {
        if !value.is_empty() {
            out.push(Field::new(code, text(value)));
        }
    }

    out.push(Field::new(fields::TEST_IDENT, text(&identity.test_ident)));
    out.push(Field::new(fields::TEST_NAME, text(&identity.test_name)));

    let contact = contact_changes(request, &patient);
    if let Some(block) = &contact {
        out.extend(render_blocks(std::slice::from_ref(block), config));
    }
    out.extend(render_blocks(parts.blocks, config));

    for (index, attachment) in parts.attachments.iter().enumerate() {
        out.push(Field::new(
            fields::ATTACHMENT_SEQ,
            format!("{:06}", index + 1),
        ));
        out.push(Field::new(fields::ATTACHMENT_TYPE, text(&attachment.kind)));
        if let Some(description) = attachment.description.as_deref().filter(|d| !d.is_empty()) {
            out.push(Field::new(fields::ATTACHMENT_DESCRIPTION, text(description)));
        }
        out.push(Field::new(
            fields::ATTACHMENT_FILENAME,
            text(&attachment.filename),
        ));
    }

    out.push(Field::empty(config.codec.end_code));

    info!(
        fields = out.len(),
        blocks = parts.blocks.len(),
        attachments = parts.attachments.len(),
        contact_changed = contact.is_some(),
        "response composed"
    );
    Ok(out)
}

/// [`compose`] and encode in one step: the bytes to persist.
pub fn write_response(
    parts: ResponseParts<'_>,
    identity: &ResponseIdentity,
    config: &IntakeConfig,
) -> Result<Vec<u8>, ComposeError> {
    let fields = compose(parts, identity, config)?;
    Ok(encode(&fields, &config.codec)?)
}
