use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands {
    automod::dir!(pub "src/commands");
}
mod util;

#[derive(Parser)]
#[command(name = "dpath", about = "Read and write JSON documents by path")]
struct Cli {
    /// Log at debug level, overriding RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at a path
    Get(commands::get::Args),
    /// Write a value at a path, creating missing containers
    Set(commands::set::Args),
    /// Append a value to the list at a path
    Append(commands::append::Args),
    /// Print every value met while walking a path
    Walk(commands::walk::Args),
    /// Merge the right document into the shape of the left one
    Merge(commands::merge::Args),
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Get(args) => commands::get::run(args),
        Commands::Set(args) => commands::set::run(args),
        Commands::Append(args) => commands::append::run(args),
        Commands::Walk(args) => commands::walk::run(args),
        Commands::Merge(args) => commands::merge::run(args),
    };
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
