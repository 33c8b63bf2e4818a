//! Command headers, the lines that open a new command declaration.

use crate::language::{AliasSpec, CommandSpec, Entry};
use crate::parsing::classify::is_name;
use crate::parsing::parser::SyntaxError;

/// A parsed header line: the canonical name, any alternative names, and the
/// optional dependency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub aliases: Vec<String>,
    pub dependencies: Option<Vec<String>>,
}

impl Header {
    /// The entries this header contributes to the command table: the command
    /// itself followed by one alias entry per alternative name.
    pub fn into_entries(self) -> Vec<(String, Entry)> {
        let mut entries = vec![(
            self.name
                .clone(),
            Entry::Command(CommandSpec {
                finished: false,
                dependencies: self.dependencies,
                ..Default::default()
            }),
        )];

        for alias in self.aliases {
            entries.push((
                alias,
                Entry::Alias(AliasSpec {
                    alias_of: self
                        .name
                        .clone(),
                }),
            ));
        }

        entries
    }
}

/// Headers are of the form
///
/// ```text
/// name|alias|alias: [dependency, dependency]
/// ```
///
/// where the aliases and the bracketed list are optional, and whitespace
/// around the punctuation is not significant. The line must not be
/// indented.
pub fn parse_command_header(line: &str) -> Result<Header, SyntaxError> {
    if line.starts_with([' ', '\t']) {
        if line.contains(':') {
            return Err(SyntaxError::CommandHeaderIndentation);
        } else {
            return Err(SyntaxError::CommandHeaderSyntax);
        }
    }

    let (before, after) = line
        .split_once(':')
        .ok_or(SyntaxError::CommandHeaderMissingColon)?;

    let before = before.trim();
    if before.is_empty() {
        return Err(SyntaxError::CommandHeaderColon);
    }

    let after = after.trim();
    let dependencies = if after.is_empty() {
        None
    } else if after.starts_with(['[', ']']) {
        Some(parse_dependencies(after)?)
    } else {
        return Err(SyntaxError::CommandHeaderColon);
    };

    let mut names = parse_alternatives(before)?.into_iter();

    // split() always yields at least one piece, and every piece was checked
    // to be non-empty.
    let name = names
        .next()
        .ok_or(SyntaxError::CommandHeaderInvalidAlternative)?;

    Ok(Header {
        name,
        aliases: names.collect(),
        dependencies,
    })
}

fn parse_alternatives(content: &str) -> Result<Vec<String>, SyntaxError> {
    content
        .split('|')
        .map(|alternative| {
            let alternative = alternative.trim();
            if is_name(alternative) {
                Ok(alternative.to_string())
            } else {
                Err(SyntaxError::CommandHeaderInvalidAlternative)
            }
        })
        .collect()
}

/// Expects the whole of a trimmed `[a, b, c]` list.
fn parse_dependencies(content: &str) -> Result<Vec<String>, SyntaxError> {
    let inner = content
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or(SyntaxError::CommandHeaderInvalidDependencyList)?;

    if inner.contains(['[', ']']) {
        return Err(SyntaxError::CommandHeaderInvalidDependencyList);
    }

    let inner = inner.trim();
    if inner.is_empty() {
        return Err(SyntaxError::CommandHeaderEmptyDependencyList);
    }

    inner
        .split(',')
        .map(|dependency| {
            let dependency = dependency.trim();
            if is_name(dependency) {
                Ok(dependency.to_string())
            } else {
                Err(SyntaxError::CommandHeaderInvalidDependencyList)
            }
        })
        .collect()
}
