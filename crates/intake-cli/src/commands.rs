//! Handlers behind the subcommands. File I/O happens here and nowhere
//! else; everything in between is the library crates.

use std::collections::BTreeMap;
use std::path::Path;

use eyre::{WrapErr, eyre};
use intake_core::models::answer::AnswerSet;
use intake_export::response::{PatientUpdates, ResponseParts, write_response};
use intake_gdt::codec::{DecodedRecord, decode};
use intake_questionnaire::answers::ingest;
use intake_questionnaire::error::SchemaError;
use intake_questionnaire::flatten::flatten;
use intake_questionnaire::schema::Schema;
use serde::Deserialize;
use tracing::info;

use crate::cli::{DecodeArgs, RespondArgs};
use crate::config::CliConfig;

/// Contents of an answer file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnswerFile {
    /// Question id → submitted value.
    pub answers: serde_json::Value,
    pub patient: PatientUpdates,
}

/// What `respond` wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondSummary {
    pub bytes: usize,
    pub blocks: usize,
}

pub fn read_record(path: &Path) -> eyre::Result<DecodedRecord> {
    let bytes = std::fs::read(path)
        .wrap_err_with(|| format!("failed to read record at {}", path.display()))?;
    Ok(decode(&bytes))
}

/// `intake decode`: one `CODE value` line per field, or a JSON object.
pub fn decode_command(args: &DecodeArgs) -> eyre::Result<String> {
    let record = read_record(&args.file)?;

    if args.json {
        let map: BTreeMap<String, String> = record
            .iter()
            .filter_map(|(code, _)| record.text(code).map(|text| (code.to_string(), text)))
            .collect();
        return Ok(serde_json::to_string_pretty(&map)?);
    }

    let lines: Vec<String> = record
        .iter()
        .map(|(code, _)| format!("{code} {}", record.text_or_empty(code)))
        .collect();
    Ok(lines.join("\n"))
}

/// Load a schema, choosing the parser by file extension.
///
/// Read failures are errors here; parse and validation failures are handed
/// back so the flattener can report the schema as unavailable.
pub fn load_schema(path: &Path) -> eyre::Result<Result<Schema, SchemaError>> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read schema at {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("yaml" | "yml") => Ok(Schema::from_yaml_str(&contents)),
        Some("json") => Ok(Schema::from_json_str(&contents)),
        _ => Err(eyre!(
            "unsupported schema file {}: expected .yaml, .yml or .json",
            path.display()
        )),
    }
}

pub fn read_answers(path: &Path) -> eyre::Result<AnswerFile> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read answers at {}", path.display()))?;
    serde_json::from_str(&contents)
        .wrap_err_with(|| format!("answers at {} are not valid JSON", path.display()))
}

/// `intake respond`: request + schema + answers → answer record on disk.
pub fn respond_command(args: &RespondArgs, config: &CliConfig) -> eyre::Result<RespondSummary> {
    let request = read_record(&args.request)?;
    let schema = load_schema(&args.schema)?;
    let submission = read_answers(&args.answers)?;

    let answers = match &schema {
        Ok(schema) => ingest(schema, &submission.answers),
        Err(_) => AnswerSet::new(),
    };
    let blocks = flatten(schema.as_ref(), &answers)?;

    let parts = ResponseParts {
        request: &request,
        patient: &submission.patient,
        blocks: &blocks,
        attachments: &args.attachments,
    };
    let bytes = write_response(parts, &config.response, &config.intake)?;

    std::fs::write(&args.out, &bytes)
        .wrap_err_with(|| format!("failed to write answer record to {}", args.out.display()))?;

    info!(
        out = %args.out.display(),
        bytes = bytes.len(),
        blocks = blocks.len(),
        "answer record written"
    );
    Ok(RespondSummary {
        bytes: bytes.len(),
        blocks: blocks.len(),
    })
}
