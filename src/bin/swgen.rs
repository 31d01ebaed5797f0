//! swgen CLI
//!
//! Command-line interface for inferring and generating OpenAPI annotation
//! definitions from sample JSON payloads.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use swgen::{
    generate, infer_sample, load_sample_auto, render_operation, EmitOutcome, FsEmitter,
    GenerateOptions, OperationOptions, Role,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swgen")]
#[command(about = "Infer OpenAPI annotation schemas from sample JSON payloads")]
#[command(version)]
struct Cli {
    /// Log inference and emission progress to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the inferred field groups as JSON
    Infer {
        /// Sample source: file path, URL (http:// or https://), or - for stdin
        sample: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Generate annotated definitions for every inferred group
    Generate {
        /// Sample source: file path, URL (http:// or https://), or - for stdin
        sample: String,

        /// Entity name, used for the root definition and the output directory
        #[arg(long, short)]
        entity: String,

        /// Class name prefix, usually the HTTP method (e.g. Get, Post)
        #[arg(long, short)]
        prefix: String,

        /// Payload role: request or response
        #[arg(long, short)]
        role: String,

        /// Base directory for generated files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Output the generation report as JSON (for automation)
        #[arg(long)]
        json: bool,
    },

    /// Print the path operation annotation for a route
    Operation {
        /// Route template, e.g. /users/{id}
        path: String,

        /// Entity name used in the request and response references
        #[arg(long, short)]
        entity: String,

        /// HTTP method (e.g. get, post)
        #[arg(long, short)]
        method: String,

        /// Response status codes; a leading code below 300 is the success response
        #[arg(long, value_delimiter = ',', default_value = "200")]
        codes: Vec<u16>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Infer {
            sample,
            output,
            pretty,
        } => run_infer(&sample, output, pretty),

        Commands::Generate {
            sample,
            entity,
            prefix,
            role,
            out_dir,
            json,
        } => run_generate(GenerateArgs {
            sample,
            entity,
            prefix,
            role,
            out_dir,
            json_output: json,
        }),

        Commands::Operation {
            path,
            entity,
            method,
            codes,
        } => {
            let options = OperationOptions::new(path, entity, &method).codes(codes);
            print!("{}", render_operation(&options));
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_infer(sample_source: &str, output: Option<PathBuf>, pretty: bool) -> Result<(), u8> {
    let sample = load_sample_auto(sample_source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let result = infer_sample(&sample).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let json_output = if pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}

struct GenerateArgs {
    sample: String,
    entity: String,
    prefix: String,
    role: String,
    out_dir: PathBuf,
    json_output: bool,
}

fn run_generate(args: GenerateArgs) -> Result<(), u8> {
    let GenerateArgs {
        sample: sample_source,
        entity,
        prefix,
        role,
        out_dir,
        json_output,
    } = args;

    // Role is checked before anything is loaded or written
    let role: Role = role.parse().map_err(|e: swgen::GenerateError| {
        report_error(json_output, &e.to_string());
        e.exit_code() as u8
    })?;

    let sample = load_sample_auto(&sample_source).map_err(|e| {
        report_error(json_output, &e.to_string());
        e.exit_code() as u8
    })?;

    let options = GenerateOptions::new(entity, &prefix, role);
    let mut emitter = FsEmitter::new(&out_dir);

    let report = generate(&sample, &options, &mut emitter).map_err(|e| {
        report_error(json_output, &e.to_string());
        e.exit_code() as u8
    })?;

    if json_output {
        let output = serde_json::json!({
            "ok": true,
            "report": report,
        });
        println!("{}", output);
    } else {
        for outcome in &report.definitions {
            match outcome {
                EmitOutcome::Written(path) => println!("written  {}", path.display()),
                EmitOutcome::Skipped(path) => println!("skipped  {}", path.display()),
            }
        }
        println!(
            "{} written, {} skipped in {}",
            report.written(),
            report.skipped(),
            report.output_dir.display()
        );
    }

    Ok(())
}

/// Output an error message in plain text or JSON format.
fn report_error(json_output: bool, msg: &str) {
    if json_output {
        println!("{}", serde_json::json!({ "ok": false, "error": msg }));
    } else {
        eprintln!("Error: {}", msg);
    }
}
