use crate::problem::present::{present_example, Present};
use projectfile::{
    formatting::{Render, Syntax},
    language::*,
    parsing::{parser::ParsingError, SyntaxError},
};

/// Generate problem and detail messages for parsing errors, illustrating
/// the correct form with small example documents.
pub fn generate_error_message(error: &ParsingError, renderer: &dyn Render) -> (String, String) {
    let problem = capitalize(error.message());

    let details = match error.kind {
        SyntaxError::VersionMissing => {
            let version = Version::new(1, 0, 0);
            format!(
                r#"
A Projectfile must start with a declaration of the minimum version of the
tool it was written for, before any comment, variable or command:

    {}

Blank lines may precede it, but nothing else.
                "#,
                version.present(renderer)
            )
        }
        SyntaxError::VersionFormat => {
            let version = Version::new(2, 11, 0);
            format!(
                r#"
The version is three dot-separated whole numbers, major, minor, and patch.
The leading {} is optional. For example:

    {}
                "#,
                renderer.style(Syntax::Version, "v"),
                version.present(renderer)
            )
        }
        SyntaxError::VersionIndentation => format!(
            r#"
The {} line declaring the required version must start at the beginning of
the line.
            "#,
            renderer.style(Syntax::Keyword, "from")
        ),
        SyntaxError::VariableIndentation => format!(
            r#"
Variables are declared at the top level, before any commands, and must not
be indented. Indented lines only make sense within the body of a command:

{}
            "#,
            present_example(&variables_example(), renderer, false)
        ),
        SyntaxError::VariableQuoteAfter => format!(
            r#"
A value that starts with a quote runs until the matching closing quote,
which must end the line. Quotes inside the value can be escaped with a
backslash:

{}
            "#,
            present_example(&quoted_example(), renderer, false)
        ),
        SyntaxError::VariableQuoteBefore => format!(
            r#"
This value ends in a quote but does not start with one. Either quote the
whole value or remove the trailing quote:

{}
            "#,
            present_example(&quoted_example(), renderer, false)
        ),
        SyntaxError::CommandHeaderIndentation => format!(
            r#"
Command headers must start at the beginning of the line. Only the lines of
the command's body are indented:

{}
            "#,
            present_example(&command_example(), renderer, false)
        ),
        SyntaxError::CommandHeaderSyntax | SyntaxError::CommandHeaderUnexpectedUnindented => {
            format!(
                r#"
Within a command every line of shell script is indented. A line that starts
at the beginning of the line must be the header of the next command, which
is a name followed by a colon:

{}
                "#,
                present_example(&command_example(), renderer, false)
            )
        }
        SyntaxError::CommandHeaderMissingColon | SyntaxError::CommandHeaderColon => format!(
            r#"
A command header is the command's name, any alternative names separated by
{}, then a colon. The only thing allowed after the colon is an optional list
of dependencies:

{}
            "#,
            renderer.style(Syntax::Punctuation, "|"),
            present_example(&header_example(), renderer, false)
        ),
        SyntaxError::CommandHeaderInvalidAlternative => format!(
            r#"
Command names and their alternatives are made of letters, digits,
underscores, dots, and dashes. Alternatives are separated by {} and none of
them may be empty:

{}
            "#,
            renderer.style(Syntax::Punctuation, "|"),
            present_example(&header_example(), renderer, false)
        ),
        SyntaxError::CommandHeaderEmptyDependencyList => format!(
            r#"
If a command has no dependencies leave the brackets out altogether rather
than writing an empty list:

{}
            "#,
            present_example(&command_example(), renderer, false)
        ),
        SyntaxError::CommandHeaderInvalidDependencyList => format!(
            r#"
Dependencies are listed after the colon, within a single pair of square
brackets, separated by commas. Each is the name of another command:

{}
            "#,
            present_example(&header_example(), renderer, false)
        ),
        SyntaxError::CommentDelimiterUnexpected => format!(
            r#"
A comment can only appear at the top of the file, after the version line,
or directly after a command's header before any of its script:

{}
            "#,
            present_example(&commented_example(), renderer, true)
        ),
        SyntaxError::CommandDelimiterUnexpected => format!(
            r#"
The {} divisor separates the script run before a command's dependencies
from the script run after them. It can only appear once per command:

{}
            "#,
            renderer.style(Syntax::Divisor, "==="),
            present_example(&divided_example(), renderer, false)
        ),
    };

    (
        problem,
        details
            .trim_ascii()
            .to_string(),
    )
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars)
            .collect(),
        None => String::new(),
    }
}

fn variables_example() -> Document {
    let mut document = Document::new();
    document.variables = Variables::from([("compiler", "gcc"), ("flags", "-O2 -Wall")]);
    document
}

fn quoted_example() -> Document {
    let mut document = Document::new();
    document.variables =
        Variables::from([("greeting", "  hello, world  "), ("motto", "say \"cheese\"")]);
    document
}

fn command(pre: &[&str], post: Option<&[&str]>, dependencies: Option<&[&str]>) -> Entry {
    let strings = |lines: &[&str]| {
        lines
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
    };

    Entry::Command(CommandSpec {
        finished: true,
        dependencies: dependencies.map(strings),
        description: None,
        pre: Some(strings(pre)),
        post: post.map(strings),
    })
}

fn command_example() -> Document {
    let mut document = Document::new();
    document.commands = Commands::from([
        ("build", command(&["make all"], None, None)),
        ("clean", command(&["make clean"], None, None)),
    ]);
    document
}

fn header_example() -> Document {
    let mut document = Document::new();
    document.commands = Commands::from([
        ("test", command(&["make test"], None, Some(&["build", "lint"]))),
        (
            "t",
            Entry::Alias(AliasSpec {
                alias_of: "test".to_string(),
            }),
        ),
    ]);
    document
}

fn divided_example() -> Document {
    let mut document = Document::new();
    document.commands = Commands::from([(
        "deploy",
        command(&["echo starting"], Some(&["echo deployed"]), Some(&["build"])),
    )]);
    document
}

fn commented_example() -> Document {
    let mut document = Document::new();
    document.version = Version::new(1, 0, 0);
    document.description = Some("Build tasks for this project.".to_string());

    let build = CommandSpec {
        finished: true,
        description: Some("Compile everything.".to_string()),
        pre: Some(vec!["make all".to_string()]),
        ..Default::default()
    };

    document.commands = Commands::from([("build", Entry::Command(build))]);
    document
}
