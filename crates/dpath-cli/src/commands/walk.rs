use anyhow::Context;
use dpath_json::value_to_json;

use crate::util::read_document;

#[derive(clap::Args)]
pub struct Args {
    /// Path to JSON file to walk (use - for stdin)
    pub file: String,
    /// Dotted path to follow
    pub path: String,
}

/// Prints `<remaining path>\t<value as JSON>` per step. Branches that fail are
/// logged and skipped.
pub fn run(args: Args) -> anyhow::Result<()> {
    let document = read_document(&args.file)?;
    let steps = dpath::walk(&document, args.path.as_str())
        .with_context(|| format!("Error parsing path {}", args.path))?;
    for step in steps {
        match step {
            Ok(step) => {
                let json = value_to_json(step.value).context("Error converting to JSON")?;
                println!("{}\t{json}", step.remaining);
            }
            Err(e) => tracing::warn!(error = %e, "branch skipped"),
        }
    }
    Ok(())
}
