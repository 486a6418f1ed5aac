use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{ArgAction, Parser};
use log::{debug, info};

use hera_info::file_utils;
use hera_info::{FileCollector, HeaderScanner, ScanError, ScanOptions, ScanReport, is_hera_file};

/// Print the class label stored in the header of hera files
#[derive(Debug, Parser)]
#[command(name = "hera_info", version)]
struct Cli {
    /// Hera files to inspect (directories need --recursive)
    #[arg(required = true, value_name = "HERA_FILE")]
    paths: Vec<PathBuf>,

    /// Descend into directory arguments
    #[arg(short, long)]
    recursive: bool,

    /// Only scan walked files with this extension (repeatable)
    #[arg(short, long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Print one JSON report per file instead of text
    #[arg(long)]
    json: bool,

    /// Only check each file for the hera signature line
    #[arg(short, long, conflicts_with = "json")]
    detect: bool,

    /// TOML file overriding the scan options
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed, everything else is a usage error
            let _ = e.print();
            process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .init();
}

/// Scan every requested file and return the process exit code
fn run(cli: &Cli) -> Result<i32> {
    let options = match &cli.config {
        Some(path) => file_utils::load_options(path)?,
        None => ScanOptions::default(),
    };
    let scanner = HeaderScanner::new(options);
    debug!("Scan options: {:?}", scanner.options());

    let mut collector = if cli.recursive {
        FileCollector::recursive()
    } else {
        FileCollector::new()
    };
    for ext in &cli.extensions {
        collector.add_extension(ext);
    }
    let files = collector.collect_files(&cli.paths)?;

    if cli.detect {
        return detect(&files);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut skipped = 0usize;

    for path in &files {
        // The reader is dropped, closing the file, at the end of each iteration
        let mut reader = file_utils::open_reader(path)?;

        match scanner.scan(&mut reader) {
            Ok(header) => {
                if cli.json {
                    writeln!(out, "{}", serde_json::to_string(&ScanReport::found(path, &header))?)?;
                } else {
                    write!(out, "{}\n\t=> {}\n\n", path.display(), header.label())?;
                }
            }
            Err(e) if e.is_skip() => {
                if let ScanError::TerminatorNotFound = e {
                    eprintln!("[ERROR] {}", e);
                }
                eprintln!("[SKIP] {}", path.display());
                if cli.json {
                    writeln!(out, "{}", serde_json::to_string(&ScanReport::skipped(path, &e))?)?;
                }
                skipped += 1;
            }
            Err(e) => {
                return Err(anyhow::Error::new(e).context(format!("failed to scan {}", path.display())));
            }
        }
    }
    out.flush()?;

    info!("Scanned {} files, {} skipped", files.len(), skipped);
    Ok(if skipped > 0 { 1 } else { 0 })
}

/// Report which files carry the hera signature
fn detect(files: &[PathBuf]) -> Result<i32> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut unknown = 0usize;

    for path in files {
        if is_hera_file(path)? {
            writeln!(out, "{} => hera file", path.display())?;
        } else {
            writeln!(out, "{} => unknown/raw file", path.display())?;
            unknown += 1;
        }
    }
    out.flush()?;

    info!("Checked {} files, {} without signature", files.len(), unknown);
    Ok(if unknown > 0 { 1 } else { 0 })
}
