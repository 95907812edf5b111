use crate::{Location, Position, Token};
use std::fmt::{Debug, Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A hard lexing failure, pinned to the position where the lexer stopped.
pub struct LexError {
    pub position: Position,
    pub message: String,
}

impl LexError {
    pub fn new(position: Position, message: String) -> Self {
        Self { position, message }
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "LexError at {}: {}", self.position, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A hard parsing failure: where it happened, what went wrong, the token in
/// hand when it did, and an optional rendering of the user state.
pub struct ParseError<T> {
    pub location: Location,
    pub message: String,
    pub found: Option<Token<T>>,
    pub state_note: Option<String>,
}

impl<T> ParseError<T> {
    pub fn new(location: Location, message: String) -> Self {
        Self {
            location,
            message,
            found: None,
            state_note: None,
        }
    }

    pub fn with_found(mut self, token: Token<T>) -> Self {
        self.found = Some(token);
        self
    }

    pub fn with_state_note(mut self, note: String) -> Self {
        self.state_note = Some(note);
        self
    }
}

impl<T> From<LexError> for ParseError<T> {
    fn from(err: LexError) -> Self {
        ParseError::new(Location::at(err.position), err.message)
    }
}

impl<T: Debug> Display for ParseError<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SyntaxError at {}: {}", self.location, self.message)?;
        if let Some(token) = &self.found {
            write!(f, " (found {})", token)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod __tests__ {
    use super::{LexError, ParseError};
    use crate::{Location, Position};

    #[test]
    fn lex_errors_become_one_point_parse_errors() {
        let lex = LexError::new(Position::new(2, 7), "unterminated string literal".into());
        let parse: ParseError<u8> = lex.into();
        assert_eq!(parse.location, Location::at(Position::new(2, 7)));
        assert_eq!(parse.message, "unterminated string literal");
        assert!(parse.found.is_none());
    }
}
