use intake_core::config::{Charset, CodecConfig, IntakeConfig};
use intake_core::fields;
use intake_core::models::field::{Field, FieldCode};
use intake_export::error::ComposeError;
use intake_export::response::{
    Attachment, PatientUpdates, ResponseIdentity, ResponseParts, compose, contact_changes,
    write_response,
};
use intake_gdt::charset::decode_cp437;
use intake_gdt::codec::{DecodedRecord, decode, encode_lines};
use intake_questionnaire::flatten::SectionBlock;
use pretty_assertions::assert_eq;

fn request(entries: &[(FieldCode, &[u8])]) -> DecodedRecord {
    let fields: Vec<Field> = entries
        .iter()
        .map(|(code, value)| Field::new(*code, *value))
        .collect();
    decode(&encode_lines(&fields, &CodecConfig::default()).unwrap())
}

fn full_request() -> DecodedRecord {
    request(&[
        (fields::RECORD_TYPE, &b"6302"[..]),
        (fields::SENDER_ID, &b"PMS"[..]),
        (fields::RECEIVER_ID, &b"TABLET"[..]),
        (fields::PATIENT_ID, &b"42"[..]),
        (fields::LAST_NAME, &b"M\x81ller"[..]),
        (fields::FIRST_NAME, &b"Anna"[..]),
        (fields::BIRTH_DATE, &b"01021980"[..]),
        (fields::DEVICE_TAG, &b""[..]),
        (fields::PHONE_1, &b"0171 555"[..]),
    ])
}

fn pairs(fields: &[Field]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|f| (f.code.to_string(), decode_cp437(&f.value)))
        .collect()
}

fn value<'a>(fields: &'a [Field], code: FieldCode) -> Option<&'a [u8]> {
    fields
        .iter()
        .find(|f| f.code == code)
        .map(|f| f.value.as_slice())
}

fn run(
    request: &DecodedRecord,
    patient: &PatientUpdates,
    blocks: &[SectionBlock],
    attachments: &[Attachment],
) -> Result<Vec<Field>, ComposeError> {
    let parts = ResponseParts {
        request,
        patient,
        blocks,
        attachments,
    };
    compose(parts, &ResponseIdentity::default(), &IntakeConfig::default())
}

#[test]
fn full_answer_record_in_order() {
    let patient = PatientUpdates {
        height_cm: " 172 ".into(),
        email: "anna@example.org".into(),
        ..PatientUpdates::default()
    };
    let blocks = [SectionBlock {
        title: "Symptoms".into(),
        bullets: vec!["Cough".into()],
    }];
    let attachments = [Attachment::from_filename("selfie.jpg")];

    let fields = run(&full_request(), &patient, &blocks, &attachments).unwrap();

    let expected: Vec<(String, String)> = [
        ("8000", "6310"),
        ("8100", "000000"),
        ("8315", "TABLET"),
        ("8316", "PMS"),
        ("9206", "2"),
        ("9218", "02.10"),
        ("3000", "42"),
        ("3101", "Müller"),
        ("3102", "Anna"),
        ("3103", "01021980"),
        ("8402", "ALLG0"),
        ("3622", "172"),
        ("3619", "anna@example.org"),
        ("6200", "ANA1"),
        ("6201", "Intake questionnaire"),
        ("6228", "---"),
        ("6228", "Updated contact information"),
        ("6228", "========"),
        ("6228", "- E-mail: anna@example.org"),
        ("6228", "---"),
        ("6228", "Symptoms"),
        ("6228", "========"),
        ("6228", "- Cough"),
        ("6302", "000001"),
        ("6303", "JPG"),
        ("6305", "selfie.jpg"),
        ("9999", ""),
    ]
    .iter()
    .map(|(c, v)| (c.to_string(), v.to_string()))
    .collect();

    assert_eq!(pairs(&fields), expected);
}

#[test]
fn request_names_are_copied_byte_for_byte() {
    let fields = run(&full_request(), &PatientUpdates::default(), &[], &[]).unwrap();
    assert_eq!(value(&fields, fields::LAST_NAME), Some(&b"M\x81ller"[..]));
}

#[test]
fn sender_and_receiver_fall_back_to_defaults() {
    let req = request(&[(fields::PATIENT_ID, &b"7"[..]), (fields::SENDER_ID, &b""[..])]);
    let fields = run(&req, &PatientUpdates::default(), &[], &[]).unwrap();
    assert_eq!(value(&fields, fields::SENDER_ID), Some(&b"INTAKE_GDT"[..]));
    assert_eq!(value(&fields, fields::RECEIVER_ID), Some(&b"PMS_GDT"[..]));
}

#[test]
fn optional_request_fields_are_skipped_when_absent() {
    let req = request(&[(fields::PATIENT_ID, &b"7"[..])]);
    let fields = run(&req, &PatientUpdates::default(), &[], &[]).unwrap();
    for code in [fields::LAST_NAME, fields::FIRST_NAME, fields::BIRTH_DATE, fields::TEXT_BLOCK] {
        assert_eq!(value(&fields, code), None, "{code}");
    }
    assert_eq!(fields.last().map(|f| f.code), Some(fields::END_OF_RECORD));
}

#[test]
fn missing_patient_id_is_rejected() {
    let absent = request(&[(fields::LAST_NAME, &b"Doe"[..])]);
    let err = run(&absent, &PatientUpdates::default(), &[], &[]).unwrap_err();
    assert!(matches!(err, ComposeError::MissingPatientId));

    let empty = request(&[(fields::PATIENT_ID, &b""[..])]);
    let err = run(&empty, &PatientUpdates::default(), &[], &[]).unwrap_err();
    assert!(matches!(err, ComposeError::MissingPatientId));
}

#[test]
fn unchanged_contacts_produce_no_block() {
    let patient = PatientUpdates {
        phone1: "  0171   555 ".into(),
        ..PatientUpdates::default()
    };
    assert_eq!(contact_changes(&full_request(), &patient), None);
}

#[test]
fn changed_contacts_are_listed_in_fixed_order() {
    let patient = PatientUpdates {
        phone1: "0171 999".into(),
        phone2: "030 123".into(),
        email: "a@b.de".into(),
        ..PatientUpdates::default()
    };
    let block = contact_changes(&full_request(), &patient).unwrap();
    assert_eq!(block.title, "Updated contact information");
    assert_eq!(
        block.bullets,
        vec!["Phone 1: 0171 999", "Phone 2: 030 123", "E-mail: a@b.de"]
    );
}

#[test]
fn attachments_are_numbered_in_order() {
    let attachments = [
        Attachment {
            kind: "JPG".into(),
            description: Some("Attachment 1".into()),
            filename: "a.jpg".into(),
        },
        Attachment::from_filename("b.png"),
    ];
    let fields = run(&full_request(), &PatientUpdates::default(), &[], &attachments).unwrap();
    let tail: Vec<(String, String)> = pairs(&fields)
        .into_iter()
        .skip_while(|(code, _)| code != "6302")
        .collect();
    let expected: Vec<(String, String)> = [
        ("6302", "000001"),
        ("6303", "JPG"),
        ("6304", "Attachment 1"),
        ("6305", "a.jpg"),
        ("6302", "000002"),
        ("6303", "PNG"),
        ("6305", "b.png"),
        ("9999", ""),
    ]
    .iter()
    .map(|(c, v)| (c.to_string(), v.to_string()))
    .collect();
    assert_eq!(tail, expected);
}

#[test]
fn attachment_kind_from_extension() {
    assert_eq!(Attachment::from_filename("scan.Pdf").kind, "PDF");
    assert_eq!(Attachment::from_filename("noext").kind, "");
}

#[test]
fn ascii_charset_is_announced_and_applied() {
    let config = IntakeConfig {
        charset: Charset::Ascii,
        ..IntakeConfig::default()
    };
    let identity = ResponseIdentity {
        test_name: "Anamnese Größe".into(),
        ..ResponseIdentity::default()
    };
    let req = full_request();
    let patient = PatientUpdates::default();
    let parts = ResponseParts {
        request: &req,
        patient: &patient,
        blocks: &[],
        attachments: &[],
    };
    let fields = compose(parts, &identity, &config).unwrap();
    assert_eq!(value(&fields, fields::CHARSET), Some(&b"1"[..]));
    assert_eq!(value(&fields, fields::TEST_NAME), Some(&b"Anamnese Groesse"[..]));
}

#[test]
fn ascii_record_re_encodes_request_values() {
    let config = IntakeConfig {
        charset: Charset::Ascii,
        ..IntakeConfig::default()
    };
    let req = request(&[
        (fields::SENDER_ID, &b"PRAXIS_\x94"[..]),
        (fields::PATIENT_ID, &b"42"[..]),
        (fields::LAST_NAME, &b"M\x81ller"[..]),
        (fields::FIRST_NAME, &b"J\x94rg"[..]),
    ]);
    let patient = PatientUpdates::default();
    let blocks = [SectionBlock {
        title: "Übelkeit".into(),
        bullets: vec!["seit März".into()],
    }];
    let parts = ResponseParts {
        request: &req,
        patient: &patient,
        blocks: &blocks,
        attachments: &[],
    };
    let fields = compose(parts, &ResponseIdentity::default(), &config).unwrap();

    assert_eq!(value(&fields, fields::LAST_NAME), Some(&b"Mueller"[..]));
    assert_eq!(value(&fields, fields::FIRST_NAME), Some(&b"Joerg"[..]));
    assert_eq!(value(&fields, fields::RECEIVER_ID), Some(&b"PRAXIS_oe"[..]));
    for field in &fields {
        for byte in &field.value {
            assert!(
                Charset::Ascii.permits(*byte),
                "field {} carries byte {byte:#04x}",
                field.code
            );
        }
    }
}

#[test]
fn written_record_declares_its_own_length() {
    let req = full_request();
    let patient = PatientUpdates::default();
    let blocks = [SectionBlock {
        title: "Allergies".into(),
        bullets: vec!["Pollen".into(), "Nuts".into()],
    }];
    let parts = ResponseParts {
        request: &req,
        patient: &patient,
        blocks: &blocks,
        attachments: &[],
    };
    let config = IntakeConfig::default();
    let identity = ResponseIdentity::default();

    let bytes = write_response(parts, &identity, &config).unwrap();
    let decoded = decode(&bytes);
    assert_eq!(
        decoded.text(fields::TOTAL_LENGTH),
        Some(format!("{:06}", bytes.len()))
    );
    assert!(bytes.ends_with(b"0079999\n"));
    assert_eq!(write_response(parts, &identity, &config).unwrap(), bytes);
}

#[test]
fn identity_and_attachments_read_from_json_with_defaults() {
    let identity: ResponseIdentity =
        serde_json::from_str(r#"{"test_ident": "ANA2", "test_name": "History"}"#).unwrap();
    assert_eq!(identity.test_ident, "ANA2");
    assert_eq!(identity.test_name, "History");
    assert_eq!(identity.format_version, "02.10");
    assert_eq!(identity.default_sender, "INTAKE_GDT");

    let attachment: Attachment =
        serde_json::from_str(r#"{"kind": "JPG", "filename": "a.jpg"}"#).unwrap();
    assert_eq!(attachment.description, None);

    let patient: PatientUpdates = serde_json::from_str(r#"{"phone1": "0171"}"#).unwrap();
    assert_eq!(patient.phone1, "0171");
    assert_eq!(patient.email, "");
}
