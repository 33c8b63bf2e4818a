//! Renderers for colourizing Projectfiles

use crate::formatting::*;
use owo_colors::OwoColorize;

/// Embellish fragments with ANSI escapes to create syntax highlighting in
/// terminal output.
pub struct Terminal;

impl Render for Terminal {
    fn style(&self, syntax: Syntax, content: &str) -> String {
        match syntax {
            Syntax::Neutral => content.to_string(),
            Syntax::Indent => content.to_string(),
            Syntax::Newline => "\n".to_string(),
            Syntax::Keyword => content // keyword.control - #75507b (purple) bold
                .color(owo_colors::Rgb(0x75, 0x50, 0x7b))
                .bold()
                .to_string(),
            Syntax::Version => content // constant.numeric - #ad7fa8 (purple) bold
                .color(owo_colors::Rgb(0xad, 0x7f, 0xa8))
                .bold()
                .to_string(),
            Syntax::Delimiter => content // punctuation.definition.comment - #999999
                .color(owo_colors::Rgb(0x99, 0x99, 0x99))
                .to_string(),
            Syntax::Description => content // comment - #8f8f8f
                .color(owo_colors::Rgb(0x8f, 0x8f, 0x8f))
                .to_string(),
            Syntax::Variable => content // variable.other - #729fcf (light blue) bold
                .color(owo_colors::Rgb(0x72, 0x9f, 0xcf))
                .bold()
                .to_string(),
            Syntax::Operator => content // keyword.operator - #cc0000 (red) bold
                .color(owo_colors::Rgb(204, 0, 0))
                .bold()
                .to_string(),
            Syntax::Value => content // string - #4e9a06 (green) bold
                .color(owo_colors::Rgb(0x4e, 0x9a, 0x06))
                .bold()
                .to_string(),
            Syntax::Declaration => content // entity.name.function - #3465a4 (blue) bold
                .color(owo_colors::Rgb(0x34, 0x65, 0xa4))
                .bold()
                .to_string(),
            Syntax::Alias => content
                .color(owo_colors::Rgb(0x3b, 0x5d, 0x7d))
                .bold()
                .to_string(),
            Syntax::Dependency => content // entity.name.type - #8f5902 (brown) bold
                .color(owo_colors::Rgb(0x8f, 0x59, 0x02))
                .bold()
                .to_string(),
            Syntax::Punctuation => content
                .color(owo_colors::Rgb(153, 153, 153))
                .bold()
                .to_string(),
            Syntax::Shell => content.to_string(),
            Syntax::Divisor => content // storage.type - #c4a000 (yellow) bold
                .color(owo_colors::Rgb(0xc4, 0xa0, 0x00))
                .bold()
                .to_string(),
        }
    }
}
