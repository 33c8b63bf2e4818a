use clap::{Arg, ArgAction, Command};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;

use projectfile::formatting::{self, Identity};
use projectfile::language::Document;
use projectfile::parsing;
use projectfile::rendering::Terminal;
use projectfile::settings;

mod problem;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("projectfile")
        .version(VERSION)
        .propagate_version(true)
        .about("Check, format, and inspect Projectfiles.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit debug logging to standard error."),
        )
        .subcommand(
            Command::new("check")
                .about("Syntax-check the given Projectfile")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The Projectfile to check. Use - to read from standard input."),
                ),
        )
        .subcommand(
            Command::new("format")
                .about("Code format the given Projectfile")
                .arg(
                    Arg::new("raw-control-chars")
                        .short('R')
                        .long("raw-control-chars")
                        .action(ArgAction::SetTrue)
                        .help("Emit ANSI escape codes for syntax highlighting even if output is redirected to a pipe or file."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The Projectfile to format. Use - to read from standard input."),
                ),
        )
        .subcommand(
            Command::new("dump")
                .about("Print the parsed Projectfile as JSON")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The Projectfile to parse. Use - to read from standard input."),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Load, validate, and print the user settings")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .help("Read settings from this file rather than ~/.prc"),
                ),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    debug!("Starting {}", VERSION);

    let code = match matches.subcommand() {
        Some(("check", submatches)) => match submatches.get_one::<String>("filename") {
            Some(filename) => check(Path::new(filename)),
            None => usage(),
        },
        Some(("format", submatches)) => {
            let raw = submatches.get_flag("raw-control-chars");
            match submatches.get_one::<String>("filename") {
                Some(filename) => format(Path::new(filename), raw),
                None => usage(),
            }
        }
        Some(("dump", submatches)) => match submatches.get_one::<String>("filename") {
            Some(filename) => dump(Path::new(filename)),
            None => usage(),
        },
        Some(("settings", submatches)) => {
            show_settings(submatches.get_one::<String>("file").map(Path::new))
        }
        Some(_) => usage(),
        None => usage(),
    };

    std::process::exit(code);
}

fn usage() -> i32 {
    eprintln!("usage: projectfile [COMMAND] ...");
    eprintln!("Try '--help' for more information.");
    1
}

/// Read and parse, printing a diagnostic on failure. The full form of a
/// parsing error goes to a terminal, the concise one elsewhere.
fn read_and_parse(filename: &Path, full: bool, f: impl FnOnce(Document) -> i32) -> i32 {
    let content = match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            return 1;
        }
    };

    match parsing::parse(filename, &content) {
        Ok(document) => f(document),
        Err(error) => {
            if full {
                eprintln!("{}", problem::full_parsing_error(&error, filename, &Terminal));
            } else {
                eprintln!("{}", problem::concise_parsing_error(&error, filename, &Identity));
            }
            1
        }
    }
}

fn check(filename: &Path) -> i32 {
    read_and_parse(filename, true, |document| {
        info!("Checked {}", filename.display());
        println!(
            "{}: {} ({} commands)",
            "ok".bright_green(),
            filename.display(),
            document
                .commands
                .command_count()
        );
        0
    })
}

fn format(filename: &Path, raw: bool) -> i32 {
    let highlight = raw
        || std::io::stdout()
            .is_terminal();

    read_and_parse(filename, std::io::stderr().is_terminal(), |document| {
        let result = if highlight {
            formatting::render(&Terminal, &document)
        } else {
            formatting::render(&Identity, &document)
        };

        print!("{}", result);
        0
    })
}

fn dump(filename: &Path) -> i32 {
    read_and_parse(filename, std::io::stderr().is_terminal(), |document| {
        match serde_json::to_string_pretty(&document) {
            Ok(json) => {
                println!("{}", json);
                0
            }
            Err(error) => {
                eprintln!("{}: {}", "error".bright_red(), error);
                1
            }
        }
    })
}

fn show_settings(file: Option<&Path>) -> i32 {
    let result = match file {
        Some(path) => settings::load_from(path),
        None => settings::load(),
    };

    let settings = match result {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("{}: {}", "error".bright_red(), error);
            return 1;
        }
    };

    match serde_json::to_string_pretty(&settings) {
        Ok(json) => {
            println!("{}", json);
            debug!("Projects directory {}", settings.projects_dir().display());
            0
        }
        Err(error) => {
            eprintln!("{}: {}", "error".bright_red(), error);
            1
        }
    }
}
