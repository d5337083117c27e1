use anyhow::Context;
use dpath::{Options, resolve_with};
use dpath_json::parse_literal;

use crate::util::{build_path, emit, read_document};

#[derive(clap::Args)]
pub struct Args {
    /// Path to JSON file to read (use - for stdin)
    pub file: String,
    /// Dotted path to resolve, e.g. `name.0.family`
    pub path: String,
    /// Select the element of the list at PATH whose sub-path equals VALUE (`sub.path=VALUE`)
    #[arg(short = 'w', long = "where")]
    pub filter: Option<String>,
    /// Path to continue with from the element picked by --where
    #[arg(long, requires = "filter")]
    pub then: Option<String>,
    /// Value to print when the path does not resolve
    #[arg(short, long)]
    pub default: Option<String>,
    /// Pretty print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let document = read_document(&args.file)?;
    let path = build_path(&args.path, args.filter.as_deref(), args.then.as_deref())?;

    let mut options = Options::default();
    if let Some(default) = &args.default {
        options = options.with_default(parse_literal(default));
    }
    let value = resolve_with(&document, path, &options)
        .with_context(|| format!("Error resolving {}", args.path))?;
    emit(value, &args.file, args.pretty, false)
}
