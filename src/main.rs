use std::io::Read;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use l4mermaid::{Direction, Options};

#[derive(Parser)]
#[command(name = "l4mermaid", about = "Draw the syntax tree of an L4 program as a Mermaid flowchart")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    file: Option<std::path::PathBuf>,

    /// Flowchart direction
    #[arg(long, short = 'd', value_enum, default_value_t = DirectionArg::Td)]
    direction: DirectionArg,

    /// Log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Td,
    Lr,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Td => Direction::TopDown,
            DirectionArg::Lr => Direction::LeftRight,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let input = match cli.file {
        Some(path) => std::fs::read_to_string(&path).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to read {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| {
                eprintln!("ERROR: failed to read stdin: {e}");
                std::process::exit(1);
            });
            buf
        }
    };

    let options = Options {
        direction: cli.direction.into(),
    };
    match l4mermaid::l4_to_mermaid_with_options(&input, &options) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    }
}
