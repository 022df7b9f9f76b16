//! Voidwake content checker CLI.
//!
//! Loads a content directory through both front ends and reports what it
//! found. Exit status is nonzero when any file failed.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use voidwake_loader::load_directory;
use voidwake_model::ContentRegistry;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    roots: Vec<PathBuf>,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    match run(args) {
        Ok(clean) => {
            if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, String> {
    let mut config = CliConfig::default();
    for arg in args.into_iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            other if other.starts_with('-') => {
                return Err(format!("unknown option: {other}"));
            }
            path => config.roots.push(PathBuf::from(path)),
        }
    }
    Ok(config)
}

fn run(args: Vec<String>) -> Result<bool, Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(true);
    }
    if config.show_version {
        println!("vcs-check {}", env!("CARGO_PKG_VERSION"));
        return Ok(true);
    }
    if config.roots.is_empty() {
        print_help();
        return Err("no content directory given".into());
    }

    let mut clean = true;
    let mut registry = ContentRegistry::new();
    for root in &config.roots {
        let report = load_directory(root, &mut registry)?;
        println!(
            "{}: {} files, {} definitions, {} failures",
            root.display(),
            report.files,
            report.definitions,
            report.failures.len()
        );
        for failure in &report.failures {
            println!("  {}: {}", failure.path.display(), failure.error);
        }
        clean &= report.is_clean();
    }
    Ok(clean)
}

fn print_help() {
    println!("Usage: vcs-check [OPTIONS] <CONTENT_DIR>...");
    println!();
    println!("Options:");
    println!("  -h, --help     Print this help");
    println!("  -V, --version  Print the version");
    println!();
    println!("Set RUST_LOG to control diagnostic output, e.g. RUST_LOG=debug.");
}
