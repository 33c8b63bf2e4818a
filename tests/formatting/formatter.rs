use std::fs;
use std::path::Path;

use projectfile::formatting::*;
use projectfile::language::*;
use projectfile::parsing;
use projectfile::rendering::Terminal;

/// Formatting a parsed document and parsing the result again must give
/// back the same document.
#[test]
fn ensure_reparse_identical() {
    let dir = Path::new("tests/samples/");

    let entries = fs::read_dir(dir).expect("Failed to read samples directory");

    let mut count = 0;
    for entry in entries {
        let path = entry
            .expect("Failed to read directory entry")
            .path();

        if path
            .extension()
            .and_then(|s| s.to_str())
            != Some("pf")
        {
            continue;
        }

        let content = parsing::load(&path)
            .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", path, e));
        let document = parsing::parse(&path, &content)
            .unwrap_or_else(|e| panic!("Failed to parse file {:?}: {}", path, e));

        let result = render(&Identity, &document);
        let reparsed = parsing::parse(&path, &result).unwrap_or_else(|e| {
            panic!("Formatted {:?} failed to parse: {}\n{}", path, e, result)
        });

        assert_eq!(document, reparsed, "{:?}", path);

        // and formatting is stable from there on
        assert_eq!(render(&Identity, &reparsed), result, "{:?}", path);

        count += 1;
    }

    assert!(count > 0, "No .pf files found in samples directory");
}

#[test]
fn quoted_values_survive() {
    let mut document = Document::new();
    document.version = Version::new(1, 0, 0);
    document.variables = Variables::from([
        ("plain", "value"),
        ("padded", "  value  "),
        ("quoted", "say \"hi\""),
        ("single", "'single'"),
        ("empty", ""),
        ("backslash_single", "x\\'"),
        ("backslash_double", " a\\\"b"),
        ("padded_backslash", " a\\'b"),
    ]);

    let text = render(&Identity, &document);
    let reparsed = parsing::parse(Path::new("-"), &text).unwrap();

    assert_eq!(reparsed, document);
}

#[test]
fn escaped_quotes_reparse_identical() {
    let content = r#"from v1.0.0
v = "x\\'"
w = ' a\\'b'
"#;
    let document = parsing::parse(Path::new("-"), content).unwrap();
    assert_eq!(
        document
            .variables
            .get("v"),
        Some("x\\'")
    );
    assert_eq!(
        document
            .variables
            .get("w"),
        Some(" a\\'b")
    );

    let text = render(&Identity, &document);
    let reparsed = parsing::parse(Path::new("-"), &text).unwrap();

    assert_eq!(reparsed, document);
}

#[test]
fn terminal_output_has_same_text() {
    let content = "from v1.0.0\n\nbuild|b: [setup]\n    make\n===\n    echo done\n";
    let document = parsing::parse(Path::new("-"), content).unwrap();

    let plain = render(&Identity, &document);
    let highlighted = render(&Terminal, &document);

    assert_eq!(plain, content);
    assert_ne!(highlighted, plain);

    let re = regex::Regex::new(r"\x1b\[[0-9;]*m").unwrap();
    assert_eq!(re.replace_all(&highlighted, ""), plain);
}
