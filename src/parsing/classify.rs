//! Recognizers for the individual line shapes of a Projectfile. Each one
//! looks at a single line (without its terminator) and knows nothing about
//! where in the file that line sits; deciding whether a shape is allowed at
//! a given point is the state machine's job.

use crate::parsing::parser::SyntaxError;

pub fn is_blank(line: &str) -> bool {
    line.chars()
        .all(|c| c == ' ' || c == '\t')
}

/// Returns the trimmed content of a line that starts with at least one
/// space or tab, or None for a line with zero indentation.
pub fn indented(line: &str) -> Option<&str> {
    if line.starts_with([' ', '\t']) {
        Some(line.trim())
    } else {
        None
    }
}

pub fn is_comment_delimiter(line: &str) -> bool {
    line.trim() == "\"\"\""
}

pub fn is_divisor(line: &str) -> bool {
    line.trim() == "==="
}

pub fn trimmed(line: &str) -> &str {
    line.trim()
}

/// Names of variables, commands, aliases and dependencies all share this
/// character set.
pub fn is_name(content: &str) -> bool {
    let re = regex!(r"^[\w.\-]+$");
    re.is_match(content)
}

/// Variable assignments are of the form
///
/// ```text
/// name = value
/// ```
///
/// at zero indentation. The value is either everything up to the trailing
/// whitespace, or a single or double quoted string. Lines that don't have
/// this shape at all return Ok(None).
pub fn parse_variable(line: &str) -> Result<Option<(String, String)>, SyntaxError> {
    let re = regex!(r"^(\s*)([\w.\-]+)\s*=\s*(.*?)\s*$");

    let cap = match re.captures(line) {
        Some(cap) => cap,
        None => return Ok(None),
    };

    if !cap[1].is_empty() {
        return Err(SyntaxError::VariableIndentation);
    }

    let name = cap[2].to_string();
    let value = parse_value(&cap[3])?;

    Ok(Some((name, value)))
}

fn parse_value(raw: &str) -> Result<String, SyntaxError> {
    let mut chars = raw
        .chars()
        .peekable();

    let quote = match chars.peek() {
        Some(&c) if c == '"' || c == '\'' => c,
        _ => {
            // a closing quote that was never opened
            if raw.ends_with(['"', '\'']) {
                return Err(SyntaxError::VariableQuoteBefore);
            }
            return Ok(raw.to_string());
        }
    };
    chars.next();

    let mut value = String::new();
    loop {
        match chars.next() {
            None => return Err(SyntaxError::VariableQuoteAfter),
            Some('\\') => match chars.peek() {
                Some(&c) if c == '"' || c == '\'' => {
                    value.push(c);
                    chars.next();
                }
                _ => value.push('\\'),
            },
            Some(c) if c == quote => break,
            Some(c) => value.push(c),
        }
    }

    // the closing quote has to be the last thing on the line
    if chars
        .next()
        .is_some()
    {
        return Err(SyntaxError::VariableQuoteAfter);
    }

    Ok(value)
}
