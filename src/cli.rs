use std::path::Path;

use crate::config::AppConfig;
use crate::data::loader::load_from_path;
use crate::data::store::read_table;
use crate::data::{clean, DatasetKind};
use crate::error::Result;
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Clean,
    Validate,
}

const USAGE: &str = "usage: tuition <serve|clean|validate>";

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("clean") => Some(Command::Clean),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Clean) => handle_clean(args),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn handle_serve() -> i32 {
    let config = AppConfig::from_env();
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("failed to start runtime: {err}");
            return 1;
        }
    };
    match runtime.block_on(server::run_server(config)) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

/// `<courses|degrees> <path>` shared by `clean` and `validate`.
fn dataset_args<'a>(args: &'a [String], command: &str) -> std::result::Result<(DatasetKind, &'a Path), i32> {
    let (Some(kind), Some(path)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: tuition {command} <courses|degrees> <path>");
        return Err(2);
    };
    match kind.parse::<DatasetKind>() {
        Ok(kind) => Ok((kind, Path::new(path))),
        Err(err) => {
            eprintln!("{err}");
            eprintln!("usage: tuition {command} <courses|degrees> <path>");
            Err(2)
        }
    }
}

fn handle_clean(args: &[String]) -> i32 {
    let (kind, path) = match dataset_args(args, "clean") {
        Ok(parsed) => parsed,
        Err(code) => return code,
    };
    let dataset = match load_from_path(path, kind) {
        Ok(dataset) => dataset,
        Err(err) => {
            eprintln!("clean failed: {err}");
            return 1;
        }
    };
    match serde_json::to_string_pretty(&dataset) {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(err) => {
            eprintln!("clean failed: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let (kind, path) = match dataset_args(args, "validate") {
        Ok(parsed) => parsed,
        Err(code) => return code,
    };
    match validate_file(path, kind) {
        Ok((rows_read, rows_kept)) => {
            println!("validation ok: rows_read={rows_read} rows_kept={rows_kept}");
            0
        }
        Err(err) => {
            eprintln!("validation failed: {err}");
            1
        }
    }
}

fn validate_file(path: &Path, kind: DatasetKind) -> Result<(usize, usize)> {
    let table = read_table(path)?;
    let records = clean(&table, kind)?;
    Ok((table.len(), records.len()))
}
