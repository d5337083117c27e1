use dpath::{Options, merge};

use crate::util::{emit, read_document};

#[derive(clap::Args)]
pub struct Args {
    /// Left document; its keys decide the shape of the result
    pub left: String,
    /// Right document; its truthy values win
    pub right: String,
    /// Field whose lists are unioned instead of overwritten (repeatable)
    #[arg(short, long = "merge-field")]
    pub merge_fields: Vec<String>,
    /// Pretty print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let left = read_document(&args.left)?;
    let right = read_document(&args.right)?;
    let options = Options::default().with_fields_to_be_merged(args.merge_fields);
    emit(&merge(&left, &right, &options), &args.left, args.pretty, false)
}
