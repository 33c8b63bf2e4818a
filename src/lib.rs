//! Reading and writing Projectfiles, the declaration format listing a
//! project's variables and the shell commands that build, test, and
//! otherwise operate on it.

#[macro_use]
mod regex;

pub mod formatting;
pub mod language;
pub mod parsing;
pub mod rendering;
pub mod settings;
