//! planbench workbench binary

use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use planbench::loader::load_dataset;
use planbench::repl::Repl;

#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Cost-based query plan workbench over an IMDB-style dataset")]
struct Cli {
    #[arg(long, default_value = "0.1/imdb_schema.txt", env = "PLANBENCH_SCHEMA")]
    schema: PathBuf,
    #[arg(long, default_value = "0.1", env = "PLANBENCH_DATA_DIR")]
    data_dir: PathBuf,
    #[arg(long, default_value = "output", env = "PLANBENCH_OUTPUT_DIR")]
    output_dir: PathBuf,
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Cli {
        schema,
        data_dir,
        output_dir,
    } = Cli::parse();

    tracing::info!(schema = %schema.display(), data_dir = %data_dir.display(), "Starting planbench");

    let schema = match load_dataset(&schema, &data_dir) {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("Error loading data: {}", e);
            return ExitCode::FAILURE;
        }
    };
    println!("Data loaded successfully.");

    let repl = Repl::new(&schema, output_dir);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    if let Err(e) = repl.run(&mut BufReader::new(stdin.lock()), &mut stdout.lock()) {
        eprintln!("I/O error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
