//! Code formatter for Projectfiles

use tracing::warn;

use crate::formatting::*;
use crate::language::*;

const INDENT: &str = "    ";

pub fn format_with_renderer(document: &Document) -> Vec<(Syntax, String)> {
    let mut output = Formatter::new();

    output.format_version(&document.version);

    if let Some(description) = &document.description {
        output.add_fragment_reference(Syntax::Newline, "\n");
        output.format_comment(description, "", true);
    }

    if !document
        .variables
        .is_empty()
    {
        output.add_fragment_reference(Syntax::Newline, "\n");
        for (name, value) in document
            .variables
            .iter()
        {
            output.format_variable(name, value);
        }
    }

    let entries: Vec<(&str, &Entry)> = document
        .commands
        .iter()
        .collect();

    let mut i = 0;
    while i < entries.len() {
        let (name, entry) = entries[i];
        i += 1;

        match entry {
            Entry::Command(command) => {
                // aliases are written into the header of the command they
                // directly follow
                let mut aliases = Vec::new();
                while let Some((alias, Entry::Alias(spec))) = entries.get(i) {
                    if spec.alias_of != name {
                        break;
                    }
                    aliases.push(*alias);
                    i += 1;
                }

                output.add_fragment_reference(Syntax::Newline, "\n");
                output.format_command(name, &aliases, command);
            }
            Entry::Alias(spec) => {
                warn!(
                    "Alias '{}' of '{}' is not attached to its command; omitted",
                    name, spec.alias_of
                );
            }
        }
    }

    output.fragments
}

struct Formatter {
    fragments: Vec<(Syntax, String)>,
}

impl Formatter {
    fn new() -> Formatter {
        Formatter {
            fragments: Vec::new(),
        }
    }

    fn add_fragment_reference(&mut self, syntax: Syntax, content: &str) {
        self.fragments
            .push((syntax, content.to_string()));
    }

    fn add_fragment(&mut self, syntax: Syntax, content: String) {
        self.fragments
            .push((syntax, content));
    }

    fn format_version(&mut self, version: &Version) {
        self.add_fragment_reference(Syntax::Keyword, "from");
        self.add_fragment_reference(Syntax::Neutral, " ");
        self.add_fragment(Syntax::Version, format!("v{}", version));
        self.add_fragment_reference(Syntax::Newline, "\n");
    }

    /// Paragraph breaks are stored as "\n\n"; each paragraph goes out on a
    /// line of its own with a blank line between.
    fn format_comment(&mut self, description: &str, indent: &str, close: bool) {
        self.add_fragment_reference(Syntax::Indent, indent);
        self.add_fragment_reference(Syntax::Delimiter, "\"\"\"");
        self.add_fragment_reference(Syntax::Newline, "\n");

        if !description.is_empty() {
            for (i, paragraph) in description
                .split("\n\n")
                .enumerate()
            {
                if i > 0 {
                    self.add_fragment_reference(Syntax::Newline, "\n");
                }
                if !paragraph.is_empty() {
                    self.add_fragment_reference(Syntax::Indent, indent);
                    self.add_fragment_reference(Syntax::Description, paragraph);
                    self.add_fragment_reference(Syntax::Newline, "\n");
                }
            }
        }

        if close {
            self.add_fragment_reference(Syntax::Indent, indent);
            self.add_fragment_reference(Syntax::Delimiter, "\"\"\"");
            self.add_fragment_reference(Syntax::Newline, "\n");
        }
    }

    fn format_variable(&mut self, name: &str, value: &str) {
        self.add_fragment_reference(Syntax::Variable, name);
        self.add_fragment_reference(Syntax::Operator, " = ");
        self.add_fragment(Syntax::Value, quote_value(value));
        self.add_fragment_reference(Syntax::Newline, "\n");
    }

    fn format_command(&mut self, name: &str, aliases: &[&str], command: &CommandSpec) {
        self.add_fragment_reference(Syntax::Declaration, name);
        for alias in aliases {
            self.add_fragment_reference(Syntax::Punctuation, "|");
            self.add_fragment_reference(Syntax::Alias, alias);
        }
        self.add_fragment_reference(Syntax::Punctuation, ":");

        if let Some(dependencies) = &command.dependencies {
            self.add_fragment_reference(Syntax::Neutral, " ");
            self.add_fragment_reference(Syntax::Punctuation, "[");
            for (i, dependency) in dependencies
                .iter()
                .enumerate()
            {
                if i > 0 {
                    self.add_fragment_reference(Syntax::Punctuation, ", ");
                }
                self.add_fragment_reference(Syntax::Dependency, dependency);
            }
            self.add_fragment_reference(Syntax::Punctuation, "]");
        }
        self.add_fragment_reference(Syntax::Newline, "\n");

        // closing a comment opens the pre block, so an empty one stands in
        // for a pre block that was opened but never written to. A comment
        // left open at the end of the file stays open.
        let pre = command
            .pre
            .as_deref();
        let post = command
            .post
            .as_deref();
        match (&command.description, pre, post) {
            (Some(description), _, _) => self.format_comment(description, INDENT, pre.is_some()),
            (None, Some([]), None) => self.format_comment("", INDENT, true),
            _ => {}
        }

        for line in pre.unwrap_or_default() {
            self.format_shell(line);
        }

        if let Some(post) = post {
            self.add_fragment_reference(Syntax::Divisor, "===");
            self.add_fragment_reference(Syntax::Newline, "\n");
            for line in post {
                self.format_shell(line);
            }
        }
    }

    fn format_shell(&mut self, line: &str) {
        self.add_fragment_reference(Syntax::Indent, INDENT);
        self.add_fragment_reference(Syntax::Shell, line);
        self.add_fragment_reference(Syntax::Newline, "\n");
    }
}

/// Values are written bare unless reading them back would lose something:
/// surrounding whitespace, emptiness, or quote characters at either end.
/// Within quotes a backslash before either kind of quote is an escape, so
/// both kinds are escaped.
fn quote_value(value: &str) -> String {
    let bare = !value.is_empty()
        && value.trim() == value
        && !value.starts_with(['"', '\''])
        && !value.ends_with(['"', '\'']);

    if bare {
        value.to_string()
    } else {
        let escaped = value
            .replace('"', "\\\"")
            .replace('\'', "\\'");
        format!("\"{}\"", escaped)
    }
}
