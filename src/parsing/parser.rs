use std::fmt;

use tracing::{debug, trace, warn};

use crate::language::{CommandSpec, Document};
use crate::parsing::classify::*;
use crate::parsing::header::parse_command_header;
use crate::parsing::version::parse_version;

/// Every way a Projectfile can be malformed. The line recognizers don't
/// know which line they are looking at, so these carry no position; the
/// driver wraps them in a ParsingError.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxError {
    VersionMissing,
    VersionFormat,
    VersionIndentation,
    VariableIndentation,
    VariableQuoteAfter,
    VariableQuoteBefore,
    CommandHeaderIndentation,
    CommandHeaderSyntax,
    CommandHeaderMissingColon,
    CommandHeaderColon,
    CommandHeaderInvalidAlternative,
    CommandHeaderEmptyDependencyList,
    CommandHeaderInvalidDependencyList,
    CommandHeaderUnexpectedUnindented,
    CommentDelimiterUnexpected,
    CommandDelimiterUnexpected,
}

impl SyntaxError {
    pub fn message(&self) -> &'static str {
        match self {
            SyntaxError::VersionMissing => "missing version declaration",
            SyntaxError::VersionFormat => "invalid version format",
            SyntaxError::VersionIndentation => "version declaration must not be indented",
            SyntaxError::VariableIndentation => "variable declaration must not be indented",
            SyntaxError::VariableQuoteAfter => "missing closing quote in variable value",
            SyntaxError::VariableQuoteBefore => "missing opening quote in variable value",
            SyntaxError::CommandHeaderIndentation => "command header must not be indented",
            SyntaxError::CommandHeaderSyntax => "invalid command header",
            SyntaxError::CommandHeaderMissingColon => "missing colon in command header",
            SyntaxError::CommandHeaderColon => "invalid content around colon in command header",
            SyntaxError::CommandHeaderInvalidAlternative => "invalid alternative command name",
            SyntaxError::CommandHeaderEmptyDependencyList => "empty dependency list",
            SyntaxError::CommandHeaderInvalidDependencyList => "invalid dependency list",
            SyntaxError::CommandHeaderUnexpectedUnindented => {
                "unexpected unindented line in command body"
            }
            SyntaxError::CommentDelimiterUnexpected => "unexpected comment delimiter",
            SyntaxError::CommandDelimiterUnexpected => "unexpected command divisor",
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for SyntaxError {}

/// A SyntaxError located in the source: the 1-origin line number and the
/// text of the line that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingError<'i> {
    pub kind: SyntaxError,
    pub line: usize,
    pub content: &'i str,
}

impl<'i> ParsingError<'i> {
    pub fn message(&self) -> &'static str {
        self.kind
            .message()
    }
}

impl<'i> fmt::Display for ParsingError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for ParsingError<'_> {}

/// Where in a Projectfile the parser currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Start,
    BeforeCommands,
    MainComment,
    Variables,
    Command,
    CommandComment,
    Pre,
    Post,
}

/// Feed one line to the state machine, updating the document and returning
/// the state the next line is to be read in.
pub fn step(state: State, document: &mut Document, line: &str) -> Result<State, SyntaxError> {
    match state {
        State::Start => state_start(document, line),
        State::BeforeCommands => state_before_commands(document, line),
        State::MainComment => state_main_comment(document, line),
        State::Variables => state_variables(document, line),
        State::Command => state_command(document, line),
        State::CommandComment => state_command_comment(document, line),
        State::Pre => state_pre(document, line),
        State::Post => state_post(document, line),
    }
}

fn state_start(document: &mut Document, line: &str) -> Result<State, SyntaxError> {
    if is_blank(line) {
        return Ok(State::Start);
    }

    match parse_version(line)? {
        Some(version) => {
            document.version = version;
            Ok(State::BeforeCommands)
        }
        None => Err(SyntaxError::VersionMissing),
    }
}

fn state_before_commands(document: &mut Document, line: &str) -> Result<State, SyntaxError> {
    if is_blank(line) {
        return Ok(State::BeforeCommands);
    }

    if is_comment_delimiter(line) {
        document.description = Some(String::new());
        return Ok(State::MainComment);
    }

    declaration(document, line)
}

fn state_main_comment(document: &mut Document, line: &str) -> Result<State, SyntaxError> {
    if is_comment_delimiter(line) {
        return Ok(State::Variables);
    }

    let description = document
        .description
        .get_or_insert_with(String::new);

    if is_blank(line) {
        paragraph_break(description);
    } else {
        append_text(description, trimmed(line));
    }

    Ok(State::MainComment)
}

fn state_variables(document: &mut Document, line: &str) -> Result<State, SyntaxError> {
    if is_blank(line) {
        return Ok(State::Variables);
    }

    if is_comment_delimiter(line) {
        return Err(SyntaxError::CommentDelimiterUnexpected);
    }

    declaration(document, line)
}

/// A variable, or else a command header. Whichever error the header parser
/// reports wins if the line is neither.
fn declaration(document: &mut Document, line: &str) -> Result<State, SyntaxError> {
    if let Some((name, value)) = parse_variable(line)? {
        document
            .variables
            .insert(name, value);
        return Ok(State::Variables);
    }

    open_command(document, line)
}

fn state_command(document: &mut Document, line: &str) -> Result<State, SyntaxError> {
    if is_blank(line) {
        return Ok(State::Command);
    }

    if is_comment_delimiter(line) {
        return Ok(State::CommandComment);
    }

    if is_divisor(line) {
        with_current(document, |command| {
            command.pre = Some(Vec::new());
            command.post = Some(Vec::new());
        });
        return Ok(State::Post);
    }

    if let Some(content) = indented(line) {
        with_current(document, |command| {
            command.pre = Some(vec![content.to_string()]);
        });
        return Ok(State::Pre);
    }

    // a bare header directly following another closes the previous one just
    // as it would from within a pre or post block.
    match open_command(document, line) {
        Ok(state) => Ok(state),
        Err(_) => Err(SyntaxError::CommandHeaderUnexpectedUnindented),
    }
}

fn state_command_comment(document: &mut Document, line: &str) -> Result<State, SyntaxError> {
    if is_comment_delimiter(line) {
        with_current(document, |command| {
            command.pre = Some(Vec::new());
        });
        return Ok(State::Pre);
    }

    let blank = is_blank(line);
    with_current(document, |command| {
        if blank {
            if let Some(description) = &mut command.description {
                paragraph_break(description);
            }
        } else {
            let description = command
                .description
                .get_or_insert_with(String::new);
            append_text(description, trimmed(line));
        }
    });

    Ok(State::CommandComment)
}

fn state_pre(document: &mut Document, line: &str) -> Result<State, SyntaxError> {
    if is_blank(line) {
        return Ok(State::Pre);
    }

    if is_comment_delimiter(line) {
        return Err(SyntaxError::CommentDelimiterUnexpected);
    }

    if is_divisor(line) {
        with_current(document, |command| {
            command.post = Some(Vec::new());
        });
        return Ok(State::Post);
    }

    if let Some(content) = indented(line) {
        with_current(document, |command| {
            command
                .pre
                .get_or_insert_with(Vec::new)
                .push(content.to_string());
        });
        return Ok(State::Pre);
    }

    open_command(document, line)
}

fn state_post(document: &mut Document, line: &str) -> Result<State, SyntaxError> {
    if is_blank(line) {
        return Ok(State::Post);
    }

    if is_comment_delimiter(line) {
        return Err(SyntaxError::CommentDelimiterUnexpected);
    }

    if is_divisor(line) {
        return Err(SyntaxError::CommandDelimiterUnexpected);
    }

    if let Some(content) = indented(line) {
        with_current(document, |command| {
            command
                .post
                .get_or_insert_with(Vec::new)
                .push(content.to_string());
        });
        return Ok(State::Post);
    }

    open_command(document, line)
}

/// Parse a header line, close whatever command is still open, and add the
/// new command and its aliases. The header is parsed first so that a
/// malformed line leaves the document untouched.
fn open_command(document: &mut Document, line: &str) -> Result<State, SyntaxError> {
    let header = parse_command_header(line)?;

    finish_current(document);

    let name = header
        .name
        .clone();

    for (name, entry) in header.into_entries() {
        document
            .commands
            .insert(name, entry);
    }

    // an alternative spelled the same as the command replaces it
    if document
        .current_command()
        .is_none()
    {
        warn!("Command '{}' is shadowed by its own alias; its body will be dropped", name);
    }

    Ok(State::Command)
}

pub(crate) fn finish_current(document: &mut Document) {
    if let Some(command) = document.current_command_mut() {
        command.finished = true;
    }
}

fn with_current<F>(document: &mut Document, f: F)
where
    F: FnOnce(&mut CommandSpec),
{
    match document.current_command_mut() {
        Some(command) => f(command),
        None => debug!("No open command to attach line to; dropped"),
    }
}

/// A blank line inside a comment separates paragraphs. Only the first blank
/// line after some text counts; any further ones are ignored, as are blank
/// lines before any text at all.
fn paragraph_break(description: &mut String) {
    if !description.is_empty() && !description.ends_with("\n\n") {
        description.push_str("\n\n");
    }
}

fn append_text(description: &mut String, text: &str) {
    if !description.is_empty() && !description.ends_with("\n\n") {
        description.push(' ');
    }
    description.push_str(text);
}

/// Incremental driver for the state machine. Lines are fed in one at a time
/// and the finished Document is taken out at the end.
#[derive(Debug)]
pub struct Parser {
    document: Document,
    state: State,
    count: usize,
}

impl Parser {
    pub fn new() -> Parser {
        Parser {
            document: Document::new(),
            state: State::Start,
            count: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn read_line<'i>(&mut self, line: &'i str) -> Result<(), ParsingError<'i>> {
        self.count += 1;

        let next = step(self.state, &mut self.document, line).map_err(|kind| ParsingError {
            kind,
            line: self.count,
            content: line,
        })?;

        if next != self.state {
            trace!(line = self.count, from = ?self.state, to = ?next);
        }
        self.state = next;

        Ok(())
    }

    /// End of input. The command still open is closed; a file that never
    /// got as far as its `from` line is rejected.
    pub fn finish<'i>(mut self) -> Result<Document, ParsingError<'i>> {
        if self.state == State::Start {
            return Err(ParsingError {
                kind: SyntaxError::VersionMissing,
                line: self
                    .count
                    .max(1),
                content: "",
            });
        }

        finish_current(&mut self.document);

        Ok(self.document)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new()
    }
}

/// Split text on universal newline boundaries (`\n`, `\r\n` and a lone
/// `\r`), dropping the terminators. A trailing terminator does not produce
/// an extra empty line.
pub fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = content;

    while !rest.is_empty() {
        match rest.find(['\n', '\r']) {
            Some(i) => {
                lines.push(&rest[..i]);
                let width = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + width..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }

    lines
}

/// Parse the full text of a Projectfile, stopping at the first error.
pub fn parse_text(content: &str) -> Result<Document, ParsingError<'_>> {
    let mut parser = Parser::new();

    for line in split_lines(content) {
        parser.read_line(line)?;
    }

    parser.finish()
}
