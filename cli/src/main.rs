use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use msg_schema_compiler::{compile_to, parse_schema, schema_to_json, Mode, SchemaError};

#[derive(Parser)]
#[command(name = "msg-schema")]
#[command(about = "Generate C structures or reflection tables from message schemas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the C structure declarations
    #[command(alias = "struct")]
    Layout {
        /// Input schema file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate the reflection tables for the message runtime
    Schema {
        /// Input schema file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the parsed schema as JSON
    Inspect {
        /// Input schema file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn read_input(input: Option<&PathBuf>) -> Result<String, SchemaError> {
    match input {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn write_output(output: Option<&PathBuf>, text: &str) -> Result<(), SchemaError> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            tracing::info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn generate(mode: Mode, input: Option<&PathBuf>, output: Option<&PathBuf>) -> Result<(), SchemaError> {
    let text = read_input(input)?;
    // Compile fully before touching the output so a failure writes nothing.
    let artifact = compile_to(&text, mode)?;
    write_output(output, &artifact)
}

fn run(cli: &Cli) -> Result<(), SchemaError> {
    match &cli.command {
        Commands::Layout { input, output } => generate(Mode::Layout, input.as_ref(), output.as_ref()),
        Commands::Schema { input, output } => generate(Mode::Schema, input.as_ref(), output.as_ref()),
        Commands::Inspect { input } => {
            let text = read_input(input.as_ref())?;
            let schema = parse_schema(&text)?;
            let json = schema_to_json(&schema)?;
            write_output(None, &format!("{}\n", json))
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
