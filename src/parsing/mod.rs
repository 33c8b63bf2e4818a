//! parser for the Projectfile format

use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::language::{Document, LoadingError};
use crate::parsing::parser::ParsingError;

pub mod classify;
pub mod header;
pub mod parser;
pub mod version;

pub use parser::{split_lines, step, Parser, State, SyntaxError};

/// Read a file and return an owned String. We pass that ownership back to the
/// caller so that any ParsingError returned by parse() below can borrow the
/// offending line from it. A filename of `-` reads standard input.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    if filename.to_str() == Some("-") {
        let mut content = String::new();
        return match std::io::stdin().read_to_string(&mut content) {
            Ok(_) => Ok(content),
            Err(error) => {
                debug!(?error);
                Err(LoadingError {
                    problem: "Failed reading standard input".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                })
            }
        };
    }

    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Parse text into a Document object, or return the first error
/// encountered.
pub fn parse<'i>(filename: &Path, content: &'i str) -> Result<Document, ParsingError<'i>> {
    debug!("Parsing {}", filename.display());

    match parser::parse_text(content) {
        Ok(document) => {
            let commands = document
                .commands
                .command_count();
            let aliases = document
                .commands
                .alias_count();

            debug!(
                "Found {} variable{}, {} command{}, {} alias{}",
                document
                    .variables
                    .len(),
                if document
                    .variables
                    .len()
                    == 1
                {
                    ""
                } else {
                    "s"
                },
                commands,
                if commands == 1 { "" } else { "s" },
                aliases,
                if aliases == 1 { "" } else { "es" }
            );
            Ok(document)
        }
        Err(error) => {
            debug!(line = error.line, "error: {}", error.kind);
            Err(error)
        }
    }
}
