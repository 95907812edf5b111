use super::{ILexeme, LexemeLogger, LexerState, Numbers};
use crate::{LexError, Log, PValue};
use once_cell::unsync::OnceCell;
use std::fmt::Debug;

const RADIX_PREFIXES: [&str; 4] = ["0x", "0X", "0b", "0B"];

impl<TToken: Debug + Copy> Numbers<TToken> {
    /// Create a [Numbers] utility with the token kinds for the four literal
    /// shapes: base-prefixed (`0xFF`, `0b101`), integer (`42`), decimal
    /// (`3.14`) and scientific (`6.02e23`).
    pub fn new(prefixed: TToken, integer: TToken, decimal: TToken, scientific: TToken) -> Self {
        Self {
            prefixed,
            integer,
            decimal,
            scientific,
            log: OnceCell::new(),
        }
    }

    /// Set a log label to debug the lexeme.
    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), String> {
        self.assign_log(log)
    }

    fn has_fraction(rest: &str) -> bool {
        let mut chars = rest.chars();
        chars.next() == Some('.') && chars.next().map_or(false, |c| c.is_ascii_digit())
    }

    /// An exponent is only taken when it is complete: `e`/`E`, an optional
    /// sign, and at least one digit. `2e` stays an integer plus an
    /// identifier for someone else to lex. Returns the byte offset of the
    /// first exponent digit.
    fn exponent_head(rest: &str) -> Option<usize> {
        let mut chars = rest.char_indices();
        match chars.next() {
            Some((_, 'e')) | Some((_, 'E')) => {}
            _ => return None,
        }
        match chars.next() {
            Some((_, '+')) | Some((_, '-')) => match chars.next() {
                Some((index, c)) if c.is_ascii_digit() => Some(index),
                _ => None,
            },
            Some((index, c)) if c.is_ascii_digit() => Some(index),
            _ => None,
        }
    }
}

impl<TToken> LexemeLogger for Numbers<TToken> {
    fn log_cell(&self) -> &OnceCell<Log<&'static str>> {
        &self.log
    }
}

impl<TToken: Debug + Copy> ILexeme for Numbers<TToken> {
    type Token = TToken;

    fn scan(&self, state: &mut LexerState<Self::Token>) -> PValue<(), LexError> {
        for prefix in RADIX_PREFIXES {
            if state.match_str(prefix).is_ok() {
                // hex digit class regardless of radix; `0b2` is the
                // parser's to reject
                let _ = state.take_while(|c| c.is_ascii_hexdigit());
                let emitted = state.emit(self.prefixed, true);
                self.log_token(state);
                return emitted;
            }
        }

        if state.take_while(|c| c.is_ascii_digit()).is_backtrack() {
            return PValue::Backtrack;
        }

        let mut kind = self.integer;
        if Self::has_fraction(state.remaining()) {
            let _ = state.match_char('.');
            let _ = state.take_while(|c| c.is_ascii_digit());
            kind = self.decimal;
        }
        if let Some(first_digit) = Self::exponent_head(state.remaining()) {
            state.advance_bytes(first_digit);
            let _ = state.take_while(|c| c.is_ascii_digit());
            kind = self.scientific;
        }
        let emitted = state.emit(kind, true);
        self.log_token(state);
        emitted
    }
}

#[cfg(test)]
mod __tests__ {
    use super::Numbers;
    use crate::lexer::{ILexeme, LexerState};
    use crate::TokenText;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Num {
        Radix,
        Int,
        Dec,
        Sci,
    }

    fn lexeme() -> Numbers<Num> {
        Numbers::new(Num::Radix, Num::Int, Num::Dec, Num::Sci)
    }

    fn scan_one(input: &str) -> (Num, String, String) {
        let mut state = LexerState::new(input, 4);
        assert!(lexeme().scan(&mut state).is_ok(), "failed on {:?}", input);
        let token = &state.emitted()[0].token;
        (
            token.kind,
            token.text.to_string(),
            state.remaining().to_string(),
        )
    }

    #[test]
    fn shapes_pick_their_kinds() {
        assert_eq!(scan_one("42"), (Num::Int, "42".into(), "".into()));
        assert_eq!(scan_one("0xFF "), (Num::Radix, "0xFF".into(), " ".into()));
        assert_eq!(scan_one("0b101"), (Num::Radix, "0b101".into(), "".into()));
        assert_eq!(scan_one("3.14"), (Num::Dec, "3.14".into(), "".into()));
        assert_eq!(scan_one("6.02e23"), (Num::Sci, "6.02e23".into(), "".into()));
        assert_eq!(scan_one("2e-8"), (Num::Sci, "2e-8".into(), "".into()));
    }

    #[test]
    fn radix_digits_are_not_validated() {
        assert_eq!(scan_one("0b2"), (Num::Radix, "0b2".into(), "".into()));
    }

    #[test]
    fn incomplete_suffixes_are_left_alone() {
        assert_eq!(scan_one("1.x"), (Num::Int, "1".into(), ".x".into()));
        assert_eq!(scan_one("2e"), (Num::Int, "2".into(), "e".into()));
        assert_eq!(scan_one("2e+"), (Num::Int, "2".into(), "e+".into()));
    }

    #[test]
    fn no_digits_means_backtrack() {
        let mut state = LexerState::new("abc", 4);
        assert!(lexeme().scan(&mut state).is_backtrack());
        assert_eq!(state.buffer(), "");
    }

    #[test]
    fn single_digit_stores_as_char() {
        let mut state = LexerState::new("7", 4);
        assert!(lexeme().scan(&mut state).is_ok());
        assert_eq!(state.emitted()[0].token.text, TokenText::Char('7'));
    }
}
