use anyhow::Context;
use dpath::Finder;
use dpath_json::parse_literal;

use crate::util::{emit, read_document};

#[derive(clap::Args)]
pub struct Args {
    /// Path to JSON file to update (use - for stdin)
    pub file: String,
    /// Dotted path of the list to append to
    pub path: String,
    /// Value to append, parsed as JSON or taken as a plain string
    pub value: String,
    /// Save the result back to FILE instead of printing it
    #[arg(short, long)]
    pub in_place: bool,
    /// Pretty print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let mut document = read_document(&args.file)?;
    Finder::new(&mut document)
        .update(args.path.as_str())
        .append(parse_literal(&args.value))
        .with_context(|| format!("Error appending to {}", args.path))?;
    emit(&document, &args.file, args.pretty, args.in_place)
}
