use std::path::Path;

use projectfile::language::*;
use projectfile::parsing::{self, Parser, State, SyntaxError};

fn strings(list: &[&str]) -> Vec<String> {
    list.iter()
        .map(|s| s.to_string())
        .collect()
}

fn parse(content: &str) -> Document {
    parsing::parse(Path::new("-"), content)
        .unwrap_or_else(|e| panic!("Failed to parse: {}", e))
}

#[test]
fn build_and_test() {
    let document = parse(
        r#"from v1.0.0
build:
  echo building
===
  echo done
test: [build]
  echo testing
"#,
    );

    assert_eq!(document.version, Version::new(1, 0, 0));
    assert_eq!(
        document.commands,
        Commands::from([
            (
                "build",
                Entry::Command(CommandSpec {
                    finished: true,
                    pre: Some(strings(&["echo building"])),
                    post: Some(strings(&["echo done"])),
                    ..Default::default()
                })
            ),
            (
                "test",
                Entry::Command(CommandSpec {
                    finished: true,
                    dependencies: Some(strings(&["build"])),
                    pre: Some(strings(&["echo testing"])),
                    ..Default::default()
                })
            ),
        ])
    );
}

#[test]
fn full_document() {
    let document = parse(
        r#"
from v2.0.1
"""
Main description
of the project.

Second paragraph.
"""
a = 1
b = "two words "

deploy|d: [build, test]
    """
    Ship it.
    """
    ./deploy.sh
"#,
    );

    assert_eq!(document.version, Version::new(2, 0, 1));
    assert_eq!(
        document
            .description
            .as_deref(),
        Some("Main description of the project.\n\nSecond paragraph.")
    );
    assert_eq!(document.variables, Variables::from([("a", "1"), ("b", "two words ")]));
    assert_eq!(
        document.resolve("d"),
        Some(&CommandSpec {
            finished: true,
            dependencies: Some(strings(&["build", "test"])),
            description: Some("Ship it.".to_string()),
            pre: Some(strings(&["./deploy.sh"])),
            post: None,
        })
    );
    assert_eq!(
        document
            .commands
            .get("d"),
        Some(&Entry::Alias(AliasSpec {
            alias_of: "deploy".to_string()
        }))
    );
}

#[test]
fn line_endings() {
    let unix = parse("from v1.0.0\nbuild:\n    make\n");
    let windows = parse("from v1.0.0\r\nbuild:\r\n    make\r\n");
    let classic = parse("from v1.0.0\rbuild:\r    make\r");

    assert_eq!(unix, windows);
    assert_eq!(unix, classic);
}

#[test]
fn redeclared_names_overwrite_in_place() {
    let document = parse(
        r#"from v1.0.0
x = first
y = other
x = second
"#,
    );

    assert_eq!(document.variables, Variables::from([("x", "second"), ("y", "other")]));
}

#[test]
fn incremental_parsing() {
    let mut parser = Parser::new();
    assert_eq!(parser.state(), State::Start);

    parser
        .read_line("from v3.2.1")
        .unwrap();
    assert_eq!(parser.state(), State::BeforeCommands);

    parser
        .read_line("build:")
        .unwrap();
    assert_eq!(parser.state(), State::Command);
    assert!(parser
        .document()
        .current_command()
        .is_some());

    parser
        .read_line("    make")
        .unwrap();
    assert_eq!(parser.state(), State::Pre);

    let document = parser
        .finish()
        .unwrap();
    assert!(document
        .current_command()
        .is_none());
}

#[test]
fn empty_input() {
    let error = parsing::parse(Path::new("-"), "").unwrap_err();
    assert_eq!(error.kind, SyntaxError::VersionMissing);
    assert_eq!(error.line, 1);

    let error = parsing::parse(Path::new("-"), "\n\n   \n").unwrap_err();
    assert_eq!(error.kind, SyntaxError::VersionMissing);
    assert_eq!(error.line, 3);
}
