//! CLI tool to parse a fixed-width data file into typed columns.
//!
//! Usage:
//!   fixedcols <input.dat> --layout <fields.layout>
//!   fixedcols <input.dat> --field i32:6:id --field str:7:name --json
//!
//! Set `RUST_LOG` to control log output on stderr.

use clap::Parser;
use fixedcols::{FieldSpec, ParseError, Schema, parse, read_whole_file};
use fixedcols_cli::{render_json, render_rows};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Parse fixed-width records into typed columns and print them.
#[derive(Parser)]
#[command(name = "fixedcols")]
struct Cli {
    /// Input data file (fixed-width records)
    input: String,

    /// Layout file with one `TYPE WIDTH [NAME]` per line
    #[arg(short, long, conflicts_with = "field")]
    layout: Option<String>,

    /// Inline field as TYPE:WIDTH[:NAME], repeatable
    #[arg(short, long, required_unless_present = "layout")]
    field: Vec<FieldSpec>,

    /// Print a JSON object of name -> values instead of rows
    #[arg(long)]
    json: bool,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Log paths, sizes and timings on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn load_schema(cli: &Cli) -> Result<Schema, String> {
    match &cli.layout {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("Error reading layout file '{path}': {e}"))?;
            Schema::from_layout(&text).map_err(|e| format!("Error in layout file '{path}': {e}"))
        }
        None => Ok(cli.field.iter().cloned().collect()),
    }
}

/// Parse error message, naming the field for conversion failures.
fn describe(err: &ParseError, schema: &Schema) -> String {
    match err {
        ParseError::FailedToParse { field, .. } => match schema.fields().get(*field) {
            Some(spec) => format!("{err} ({} {})", schema.field_name(*field), spec.ty),
            None => err.to_string(),
        },
        _ => err.to_string(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let schema = match load_schema(&cli) {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let width = match schema.validate() {
        Ok(width) => width,
        Err(e) => {
            eprintln!("Schema error: {e}");
            process::exit(1);
        }
    };
    debug!(fields = schema.len(), width, "schema loaded");

    let buffer = match read_whole_file(&cli.input) {
        Ok(buffer) => buffer,
        Err(e) => {
            eprintln!("Error reading input file: {e}");
            process::exit(1);
        }
    };
    info!(input = %cli.input, bytes = buffer.len(), "input loaded");

    let start = Instant::now();
    let parsed = match parse(&buffer, &schema) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Parse error: {}", describe(&e, &schema));
            process::exit(1);
        }
    };
    drop(buffer);
    info!(
        rows = parsed.rows(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "parsed"
    );

    let output = if cli.json {
        render_json(&parsed)
    } else {
        render_rows(&parsed)
    };

    if let Some(out_path) = &cli.output {
        if let Some(parent) = Path::new(out_path.as_str()).parent()
            && !parent.as_os_str().is_empty()
            && fs::create_dir_all(parent).is_err()
        {
            eprintln!("Error creating output directory for '{out_path}'");
            process::exit(1);
        }
        if let Err(e) = fs::write(out_path, &output) {
            eprintln!("Error writing output file '{out_path}': {e}");
            process::exit(1);
        }
        debug!(output = %out_path, "output written");
    } else {
        if let Err(e) = io::stdout().write_all(output.as_bytes()) {
            eprintln!("Error writing output: {e}");
            process::exit(1);
        }
        if !output.is_empty() && !output.ends_with('\n') {
            println!();
        }
    }
}
