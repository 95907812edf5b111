use super::{ILexeme, LexemeLogger, LexerState, Pattern};
use crate::{LexError, Log, PValue};
use once_cell::unsync::OnceCell;
use regex::Regex;
use std::fmt::Debug;

impl<TToken: Debug + Copy> Pattern<TToken> {
    /// Create a [Pattern] utility for an anchored regular expression.
    /// # Arguments
    /// * `kind` - The token kind to emit on a match.
    /// * `expression` - A regex anchored with `^`.
    pub fn new(kind: TToken, expression: &str) -> Result<Self, String> {
        if !expression.starts_with('^') {
            return Err(format!(
                "Pattern expression '{}' should match the beginning of input ('^').",
                expression
            ));
        }
        let regexp = Regex::new(expression).map_err(|err| err.to_string())?;
        Ok(Self {
            kind,
            regexp,
            log: OnceCell::new(),
        })
    }

    /// Set a log label to debug the lexeme.
    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), String> {
        self.assign_log(log)
    }
}

impl<TToken> LexemeLogger for Pattern<TToken> {
    fn log_cell(&self) -> &OnceCell<Log<&'static str>> {
        &self.log
    }
}

impl<TToken: Debug + Copy> ILexeme for Pattern<TToken> {
    type Token = TToken;

    fn scan(&self, state: &mut LexerState<Self::Token>) -> PValue<(), LexError> {
        match self.regexp.find(state.remaining()) {
            Some(found) if found.end() > 0 => {
                state.advance_bytes(found.end());
                let emitted = state.emit(self.kind, true);
                self.log_token(state);
                emitted
            }
            _ => {
                self.log_miss(state.position());
                PValue::Backtrack
            }
        }
    }
}

#[cfg(test)]
mod __tests__ {
    use super::Pattern;
    use crate::lexer::{ILexeme, LexerState};

    #[test]
    fn unanchored_expressions_are_rejected() {
        assert!(Pattern::new(0i8, r"[a-z]+").is_err());
        assert!(Pattern::new(0i8, r"^[a-z]+").is_ok());
    }

    #[test]
    fn match_is_buffered_and_emitted() {
        let lexeme = Pattern::new(0i8, r"^[a-z]+").unwrap();
        let mut state = LexerState::new("abc99", 4);
        assert!(lexeme.scan(&mut state).is_ok());
        assert_eq!(state.emitted()[0].token.text.to_string(), "abc");
        assert_eq!(state.remaining(), "99");
    }
}
