use projectfile::{
    formatting::{self, Render},
    language::*,
};

/// Trait for model types that can present themselves via a renderer
pub trait Present {
    /// Present this value using the given renderer
    fn present(&self, renderer: &dyn Render) -> String;
}

impl Present for Document {
    fn present(&self, renderer: &dyn Render) -> String {
        formatting::render(renderer, self)
    }
}

impl Present for Version {
    fn present(&self, renderer: &dyn Render) -> String {
        let mut document = Document::new();
        document.version = self.clone();

        formatting::render(renderer, &document)
            .trim_end()
            .to_string()
    }
}

/// Render the lines of an example document as a block indented by four
/// spaces, leaving out the version line unless asked for.
pub fn present_example(document: &Document, renderer: &dyn Render, version: bool) -> String {
    let text = document.present(renderer);

    text.lines()
        .skip(if version { 0 } else { 2 })
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("    {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
