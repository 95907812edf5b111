use super::{ILexeme, LexerState, Whitespace};
use crate::{LexError, PValue};
use std::fmt::Debug;

impl<TToken> Whitespace<TToken> {
    /// Consume whitespace silently.
    pub fn skip() -> Self {
        Self { kind: None }
    }

    /// Consume whitespace and keep it as a token.
    pub fn keep(kind: TToken) -> Self {
        Self { kind: Some(kind) }
    }
}

impl<TToken: Debug + Copy> ILexeme for Whitespace<TToken> {
    type Token = TToken;

    fn scan(&self, state: &mut LexerState<Self::Token>) -> PValue<(), LexError> {
        if state.take_while(char::is_whitespace).is_backtrack() {
            return PValue::Backtrack;
        }
        match self.kind {
            Some(kind) => state.emit(kind, true),
            None => {
                state.skip_buffer();
                PValue::Ok(())
            }
        }
    }
}
