use std::path::Path;

use projectfile::parsing::{self, SyntaxError};

/// Parse input expected to fail, returning the error kind and the line
/// number it was reported against.
fn failure(content: &str) -> (SyntaxError, usize, String) {
    match parsing::parse(Path::new("-"), content) {
        Ok(document) => panic!("Expected failure, got {:?}", document),
        Err(error) => (error.kind, error.line, error.content.to_string()),
    }
}

#[test]
fn version_errors() {
    assert_eq!(failure("build:\n    make\n").0, SyntaxError::VersionMissing);
    assert_eq!(failure("a = b\n").0, SyntaxError::VersionMissing);
    assert_eq!(failure("\"\"\"\n").0, SyntaxError::VersionMissing);
    assert_eq!(failure("  build:\n").0, SyntaxError::VersionMissing);

    assert_eq!(
        failure("from v1.2\n"),
        (SyntaxError::VersionFormat, 1, "from v1.2".to_string())
    );
    assert_eq!(
        failure("\n\n  from v1.2.3\n"),
        (SyntaxError::VersionIndentation, 3, "  from v1.2.3".to_string())
    );
}

#[test]
fn variable_errors() {
    assert_eq!(
        failure("from v1.0.0\n  name = value\n"),
        (SyntaxError::VariableIndentation, 2, "  name = value".to_string())
    );
    assert_eq!(
        failure("from v1.0.0\nname = \"value\n").0,
        SyntaxError::VariableQuoteAfter
    );
    assert_eq!(
        failure("from v1.0.0\nname = \"value\" extra\n").0,
        SyntaxError::VariableQuoteAfter
    );
    assert_eq!(
        failure("from v1.0.0\nname = value'\n").0,
        SyntaxError::VariableQuoteBefore
    );
}

#[test]
fn header_errors() {
    let cases = [
        ("from v1.0.0\n  build:\n", SyntaxError::CommandHeaderIndentation),
        ("from v1.0.0\nbuild\n", SyntaxError::CommandHeaderMissingColon),
        ("from v1.0.0\n:build\n", SyntaxError::CommandHeaderColon),
        ("from v1.0.0\nbuild: test\n", SyntaxError::CommandHeaderColon),
        ("from v1.0.0\nbuild||b:\n", SyntaxError::CommandHeaderInvalidAlternative),
        ("from v1.0.0\nbuild: []\n", SyntaxError::CommandHeaderEmptyDependencyList),
        ("from v1.0.0\nbuild: [a,,b]\n", SyntaxError::CommandHeaderInvalidDependencyList),
        ("from v1.0.0\nbuild: [a\n", SyntaxError::CommandHeaderInvalidDependencyList),
    ];

    for (content, expected) in cases {
        let (kind, line, _) = failure(content);
        assert_eq!(kind, expected, "{:?}", content);
        assert_eq!(line, 2, "{:?}", content);
    }
}

#[test]
fn body_errors() {
    assert_eq!(
        failure("from v1.0.0\nbuild:\nmake\n"),
        (SyntaxError::CommandHeaderUnexpectedUnindented, 3, "make".to_string())
    );
    assert_eq!(
        failure("from v1.0.0\nbuild:\n    make\nmake install\n").0,
        SyntaxError::CommandHeaderMissingColon
    );
    assert_eq!(
        failure("from v1.0.0\n\"\"\"\ncomment\n\"\"\"\n\"\"\"\n"),
        (SyntaxError::CommentDelimiterUnexpected, 5, "\"\"\"".to_string())
    );
    assert_eq!(
        failure("from v1.0.0\nbuild:\n    make\n    \"\"\"\n").0,
        SyntaxError::CommentDelimiterUnexpected
    );
    assert_eq!(
        failure("from v1.0.0\nbuild:\n===\n    a\n===\n"),
        (SyntaxError::CommandDelimiterUnexpected, 5, "===".to_string())
    );
}

#[test]
fn first_error_wins() {
    let (kind, line, _) = failure("from v1.0.0\nbuild: []\n  name = value\nfrom v1\n");
    assert_eq!(kind, SyntaxError::CommandHeaderEmptyDependencyList);
    assert_eq!(line, 2);
}
