use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use intake_export::response::Attachment;

#[derive(Parser, Debug)]
#[command(name = "intake", version, about = "Questionnaire answers to device data transfer records")]
pub struct Cli {
    #[arg(long, global = true, help = "JSON configuration file (defaults apply when omitted)")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the fields of a record file.
    Decode(DecodeArgs),
    /// Write the answer record for a request.
    Respond(RespondArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DecodeArgs {
    pub file: PathBuf,
    #[arg(long, help = "Output machine-readable JSON")]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RespondArgs {
    #[arg(long, help = "Request record to answer")]
    pub request: PathBuf,
    #[arg(long, help = "Questionnaire schema (.yaml, .yml or .json)")]
    pub schema: PathBuf,
    #[arg(long, help = "Answer file: {\"answers\": {...}, \"patient\": {...}}")]
    pub answers: PathBuf,
    #[arg(long, help = "Where to write the answer record")]
    pub out: PathBuf,
    #[arg(
        long = "attachment",
        value_name = "FILENAME[=DESCRIPTION]",
        value_parser = parse_attachment,
        help = "Referenced file with an optional description, repeatable"
    )]
    pub attachments: Vec<Attachment>,
}

/// `scan.jpg` or `scan.jpg=Wound, left forearm`. The first `=` separates
/// the description.
pub fn parse_attachment(value: &str) -> Result<Attachment, String> {
    let (filename, description) = match value.split_once('=') {
        Some((filename, description)) => (filename.trim(), Some(description.trim())),
        None => (value.trim(), None),
    };
    if filename.is_empty() {
        return Err(format!("attachment {value:?} has no filename"));
    }

    let mut attachment = Attachment::from_filename(filename);
    attachment.description = description
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    Ok(attachment)
}
