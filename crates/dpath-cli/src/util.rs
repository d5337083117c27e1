use std::fs;
use std::io::{self, Read};

use anyhow::{Context, bail};
use dpath::{PathExpr, Value};

/// Read input from file path or stdin.
/// - `None` or `Some("-")` reads from stdin
/// - `Some(path)` reads from file
pub fn read_input(file: Option<&str>) -> anyhow::Result<String> {
    match file {
        None | Some("-") => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Error reading from stdin")?;
            Ok(buffer)
        }
        Some(path) => fs::read_to_string(path).with_context(|| format!("Error reading {path}")),
    }
}

/// Helper to get display path for error messages
pub fn display_path(file: &str) -> &str {
    if file == "-" { "<stdin>" } else { file }
}

pub fn read_document(file: &str) -> anyhow::Result<Value> {
    let contents = read_input(Some(file))?;
    dpath_json::from_str(&contents)
        .with_context(|| format!("Error parsing JSON from {}", display_path(file)))
}

/// Prints `value` as JSON, or saves it back to `file` when `in_place` is set.
pub fn emit(value: &Value, file: &str, pretty: bool, in_place: bool) -> anyhow::Result<()> {
    let text = dpath_json::to_string(value, pretty).context("Error converting to JSON")?;
    if !in_place {
        println!("{text}");
        return Ok(());
    }
    if file == "-" {
        bail!("--in-place needs a file, not stdin");
    }
    fs::write(file, text + "\n").with_context(|| format!("Error writing {file}"))?;
    tracing::debug!(file, "document saved");
    Ok(())
}

/// Builds `path`, then `[sub=value]` when `filter` is given, then `then`.
pub fn build_path(
    path: &str,
    filter: Option<&str>,
    then: Option<&str>,
) -> anyhow::Result<Vec<PathExpr>> {
    let mut exprs = vec![PathExpr::from(path)];
    if let Some(filter) = filter {
        exprs.push(dpath_json::parse_where(filter)?);
    }
    if let Some(then) = then {
        exprs.push(PathExpr::from(then));
    }
    Ok(exprs)
}
