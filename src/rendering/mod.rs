//! Output backends for the formatter

mod terminal;

pub use terminal::Terminal;
