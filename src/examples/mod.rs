//! Complete example grammars exercising both engines end to end: a JSON
//! parser built on the lexer/parser pair, and a command language built on
//! the rule engine with fuzzy matching and completion.

pub mod command;
pub mod json;

#[cfg(test)]
mod __tests__;
