//! Turning a Document back into Projectfile text

pub mod formatter;
mod syntax;

pub use syntax::*;

use crate::language::Document;

/// We do the code formatting in two passes. First we convert the Document
/// into a Vec of "fragments" (Syntax tag, String pairs). Then second we
/// apply the specified renderer to each pair to result in a plain or
/// highlighted String.
pub fn render<R>(renderer: &R, document: &Document) -> String
where
    R: Render + ?Sized,
{
    // Pass 1: Format Document to tagged fragments
    let fragments = formatter::format_with_renderer(document);

    // Pass 2: Render tagged fragments to final output
    render_to_string(renderer, fragments)
}

/// Pass 2: apply markup to fragments via style() and combine.
fn render_to_string<R>(renderer: &R, fragments: Vec<(Syntax, String)>) -> String
where
    R: Render + ?Sized,
{
    let mut output = String::new();

    for (syntax, content) in fragments {
        let rendered = renderer.style(syntax, &content);
        output.push_str(&rendered);
    }

    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }

    output
}
