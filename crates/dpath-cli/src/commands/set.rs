use anyhow::Context;
use dpath::write;
use dpath_json::parse_literal;

use crate::util::{build_path, emit, read_document};

#[derive(clap::Args)]
pub struct Args {
    /// Path to JSON file to update (use - for stdin)
    pub file: String,
    /// Dotted path to write, e.g. `address.0.city`
    pub path: String,
    /// Value to write, parsed as JSON or taken as a plain string
    pub value: String,
    /// Select the element of the list at PATH whose sub-path equals VALUE (`sub.path=VALUE`)
    #[arg(short = 'w', long = "where")]
    pub filter: Option<String>,
    /// Path to continue with from the element picked by --where
    #[arg(long, requires = "filter")]
    pub then: Option<String>,
    /// Save the result back to FILE instead of printing it
    #[arg(short, long)]
    pub in_place: bool,
    /// Pretty print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let mut document = read_document(&args.file)?;
    let path = build_path(&args.path, args.filter.as_deref(), args.then.as_deref())?;

    write(&mut document, path, parse_literal(&args.value))
        .with_context(|| format!("Error writing {}", args.path))?;
    emit(&document, &args.file, args.pretty, args.in_place)
}
