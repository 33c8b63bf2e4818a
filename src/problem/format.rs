use super::messages::generate_error_message;
use owo_colors::OwoColorize;
use projectfile::{formatting::Render, language::LoadingError, parsing::parser::ParsingError};
use serde::Serialize;
use std::path::Path;
use tinytemplate::TinyTemplate;
use tracing::debug;

static TEMPLATE: &'static str = r#"
{label}: {filename}:{line} {problem}

{blank} {bar}
{number} {bar} {code}
{blank} {bar} {caret}

{details}
"#;

#[derive(Serialize)]
struct Context {
    label: String,
    filename: String,
    line: usize,
    problem: String,
    blank: String,
    bar: String,
    number: String,
    code: String,
    caret: String,
    details: String,
}

/// Format a parsing error with full details including the offending line
/// of source and an explanation of what was expected.
pub fn full_parsing_error<'i>(
    error: &ParsingError<'i>,
    filename: &Path,
    renderer: &dyn Render,
) -> String {
    let (problem, details) = generate_error_message(error, renderer);

    let line = error.line;
    let width = 3.max(
        line.to_string()
            .len(),
    );

    // point at where the line's content starts, which is where all of the
    // line-level problems are detected.
    let column = error
        .content
        .len()
        - error
            .content
            .trim_start()
            .len()
        + 1;

    let context = Context {
        label: "error"
            .bright_red()
            .to_string(),
        filename: filename
            .to_string_lossy()
            .to_string(),
        line,
        problem: problem
            .bold()
            .to_string(),
        blank: " ".repeat(width),
        bar: '|'
            .bright_blue()
            .to_string(),
        number: format!("{:>width$}", line.bright_blue()),
        code: error
            .content
            .to_string(),
        caret: format!("{:>column$}", '^'.bright_red()),
        details,
    };

    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);

    let result = tt
        .add_template("error", TEMPLATE)
        .and_then(|_| tt.render("error", &context));

    match result {
        Ok(report) => report
            .trim_ascii()
            .to_string(),
        Err(error) => {
            debug!(?error);
            format!(
                "{}: {}:{} {}",
                context.label, context.filename, context.line, context.problem
            )
        }
    }
}

/// Format a parsing error with concise single-line output
pub fn concise_parsing_error<'i>(
    error: &ParsingError<'i>,
    filename: &Path,
    renderer: &dyn Render,
) -> String {
    let (problem, _) = generate_error_message(error, renderer);

    format!(
        "{}: {}:{} {}",
        "error".bright_red(),
        filename.to_string_lossy(),
        error.line,
        problem.bold(),
    )
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    if error
        .details
        .is_empty()
    {
        format!(
            "{}: {}: {}",
            "error".bright_red(),
            error
                .filename
                .display(),
            error
                .problem
                .bold()
        )
    } else {
        format!(
            "{}: {}: {} ({})",
            "error".bright_red(),
            error
                .filename
                .display(),
            error
                .problem
                .bold(),
            error.details
        )
    }
}
