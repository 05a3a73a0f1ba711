// Binary entry point for the sync CLI.
use anyhow::{Result, bail};
use simplelog::{ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::sync::Arc;
use todobridge::config::SyncConfig;
use todobridge::coordinator::SyncCoordinator;
use todobridge::store::DirStore;

const CONFIG_FILENAME: &str = ".todobridge.toml";

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        todobridge::cli::print_help("todobridge");
        return Ok(());
    }

    let mut command: Option<String> = None;
    let mut root = PathBuf::from(".");
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--root" | "-r" => {
                if i + 1 < args.len() {
                    root = PathBuf::from(&args[i + 1]);
                    i += 1; // Also consumed the value
                }
            }
            "--verbose" | "-v" => {
                verbose = true;
            }
            arg if !arg.starts_with('-') => {
                if command.is_none() {
                    command = Some(arg.to_string());
                }
            }
            _ => { /* Ignore unknown flags */ }
        }
        i += 1;
    }

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        LogConfig::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let config = SyncConfig::load(&root.join(CONFIG_FILENAME))?;
    let store = Arc::new(DirStore::new(&root, &config));
    let coordinator = SyncCoordinator::new(store, config);

    let report = match command.as_deref() {
        Some("pull") => coordinator.sync_from_documents()?,
        Some("push") => coordinator.sync_from_line_file()?,
        Some(other) => bail!("Unknown command '{}' (try --help)", other),
        None => {
            todobridge::cli::print_help("todobridge");
            return Ok(());
        }
    };

    if report.written.is_empty() {
        println!("Already up to date.");
    } else {
        println!("Wrote {} file(s).", report.written.len());
    }
    for warning in &report.warnings {
        println!("warning: {}", warning);
    }
    Ok(())
}
