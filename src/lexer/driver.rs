use super::{ILexeme, Lexer, LexerState};
use crate::{LexError, LocatedToken, Log, PValue};
use once_cell::unsync::OnceCell;
use std::fmt::Debug;
use std::rc::Rc;

impl<TToken: Debug + Copy> Lexer<TToken> {
    /// Create a lexer from a sequence of lexeme utilities. At every input
    /// position the utilities are tried in the given order; the first
    /// success wins.
    pub fn new(lexemes: Vec<Rc<dyn ILexeme<Token = TToken>>>) -> Self {
        Self {
            lexemes,
            log: OnceCell::new(),
        }
    }

    /// Set a log label to debug the whole lexer run.
    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), String> {
        self.log
            .set(log)
            .map_err(|err| format!("Log label {} is already assigned.", err))
    }

    /// Run the lexer to exhaustion over `input`. The emitted tokens are
    /// returned together with the final state, so a caller can inspect the
    /// unconsumed remainder and the final position.
    pub fn lex<'c>(
        &self,
        input: &'c str,
        tab_width: usize,
    ) -> (
        PValue<Vec<LocatedToken<TToken>>, LexError>,
        LexerState<'c, TToken>,
    ) {
        let mut state = LexerState::new(input, tab_width);

        'input: while !state.at_end() {
            for lexeme in &self.lexemes {
                match lexeme.scan(&mut state) {
                    PValue::Ok(()) => {
                        debug_assert!(
                            state.buffer().is_empty(),
                            "lexeme left residue in the buffer"
                        );
                        continue 'input;
                    }
                    PValue::Backtrack => {
                        let _: PValue<(), LexError> = state.rewind();
                    }
                    PValue::Fail(err) => {
                        self.log_failure(&err);
                        return (PValue::Fail(err), state);
                    }
                }
            }
            let culprit = state.remaining().chars().next().unwrap_or(' ');
            let err = LexError::new(
                state.position(),
                format!("unrecognized character {:?}", culprit),
            );
            self.log_failure(&err);
            return (PValue::Fail(err), state);
        }

        #[cfg(debug_assertions)]
        if let Some(label) = self.log.get() {
            if label.covers(&Log::Matches(())) {
                println!(
                    "[{}; Lexer]: {} tokens, ended at {}",
                    label,
                    state.token_count(),
                    state.position()
                );
            }
        }
        let tokens = state.emitted().to_vec();
        (PValue::Ok(tokens), state)
    }

    fn log_failure(&self, _err: &LexError) {
        #[cfg(debug_assertions)]
        if let Some(label) = self.log.get() {
            if label.covers(&Log::Failures(())) {
                println!("[{}; Lexer]: {}", label, _err);
            }
        }
    }
}
