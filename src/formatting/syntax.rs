//! Renderers for colourizing Projectfile source

/// Types of content that can be rendered with different styles
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Syntax {
    Neutral, // default
    Indent,
    Newline,
    Keyword,
    Version,
    Delimiter,
    Description,
    Variable,
    Operator,
    Value,
    Declaration,
    Alias,
    Dependency,
    Punctuation,
    Shell,
    Divisor,
}

/// Trait for different rendering backends (the no-op no-markup one, and
/// ANSI escapes for terminal colouring)
pub trait Render {
    /// Apply styling to content with the specified syntax type
    fn style(&self, content_type: Syntax, content: &str) -> String;
}

/// Returns content unchanged, with no markup applied
pub struct Identity;

impl Render for Identity {
    fn style(&self, _syntax: Syntax, content: &str) -> String {
        content.to_string()
    }
}
