use super::{ILexeme, LexemeLogger, LexerState, QuotedChar, QuotedString};
use crate::{LexError, Log, PValue};
use once_cell::unsync::OnceCell;
use std::fmt::Debug;

impl<TToken: Debug + Copy> QuotedString<TToken> {
    /// A `"`-delimited, `\`-escaped string literal.
    pub fn new(kind: TToken) -> Self {
        Self::with_delimiters(kind, '"', '\\')
    }

    pub fn with_delimiters(kind: TToken, quote: char, escape: char) -> Self {
        Self {
            quote,
            escape,
            kind,
            log: OnceCell::new(),
        }
    }

    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), String> {
        self.assign_log(log)
    }
}

impl<TToken> LexemeLogger for QuotedString<TToken> {
    fn log_cell(&self) -> &OnceCell<Log<&'static str>> {
        &self.log
    }
}

impl<TToken: Debug + Copy> ILexeme for QuotedString<TToken> {
    type Token = TToken;

    fn scan(&self, state: &mut LexerState<Self::Token>) -> PValue<(), LexError> {
        if state.match_char(self.quote).is_backtrack() {
            return PValue::Backtrack;
        }
        match state.scan_delimited(self.escape, self.quote) {
            PValue::Ok(true) => {
                let emitted = state.emit(self.kind, true);
                self.log_token(state);
                emitted
            }
            PValue::Ok(false) => state.fail("unterminated string literal"),
            PValue::Backtrack => PValue::Backtrack,
            PValue::Fail(err) => PValue::Fail(err),
        }
    }
}

impl<TToken: Debug + Copy> QuotedChar<TToken> {
    /// A `'`-delimited, `\`-escaped character literal. Termination policy
    /// matches [QuotedString]: running out of input is a hard failure.
    pub fn new(kind: TToken) -> Self {
        Self::with_delimiters(kind, '\'', '\\')
    }

    pub fn with_delimiters(kind: TToken, quote: char, escape: char) -> Self {
        Self {
            quote,
            escape,
            kind,
            log: OnceCell::new(),
        }
    }

    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), String> {
        self.assign_log(log)
    }
}

impl<TToken> LexemeLogger for QuotedChar<TToken> {
    fn log_cell(&self) -> &OnceCell<Log<&'static str>> {
        &self.log
    }
}

impl<TToken: Debug + Copy> ILexeme for QuotedChar<TToken> {
    type Token = TToken;

    fn scan(&self, state: &mut LexerState<Self::Token>) -> PValue<(), LexError> {
        if state.match_char(self.quote).is_backtrack() {
            return PValue::Backtrack;
        }
        match state.scan_delimited(self.escape, self.quote) {
            PValue::Ok(true) => {
                let emitted = state.emit(self.kind, true);
                self.log_token(state);
                emitted
            }
            PValue::Ok(false) => state.fail("unterminated character literal"),
            PValue::Backtrack => PValue::Backtrack,
            PValue::Fail(err) => PValue::Fail(err),
        }
    }
}

#[cfg(test)]
mod __tests__ {
    use super::{QuotedChar, QuotedString};
    use crate::lexer::{ILexeme, LexerState};

    #[test]
    fn escaped_quotes_stay_inside_the_literal() {
        let lexeme = QuotedString::new(0i8);
        let mut state = LexerState::new(r#""say \"hi\"" rest"#, 4);
        assert!(lexeme.scan(&mut state).is_ok());
        assert_eq!(state.emitted()[0].token.text.to_string(), r#""say \"hi\"""#);
        assert_eq!(state.remaining(), " rest");
    }

    #[test]
    fn unterminated_literals_fail_hard() {
        let string = QuotedString::new(0i8);
        let mut state = LexerState::new(r#""open"#, 4);
        assert!(string.scan(&mut state).is_fail());

        let character = QuotedChar::new(0i8);
        let mut state = LexerState::new("'x", 4);
        assert!(character.scan(&mut state).is_fail());
    }
}
