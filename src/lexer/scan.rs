use super::LexerState;
use crate::{LexError, PValue};

impl<'c, T> LexerState<'c, T> {
    /// Scan forward until an unescaped `term`, buffering everything on the
    /// way including the terminator. `Ok(true)` when the terminator was
    /// seen, `Ok(false)` when the input ran out first; the caller decides
    /// which of those is an error.
    pub fn scan_delimited(&mut self, escape: char, term: char) -> PValue<bool, LexError> {
        loop {
            if self.at_end() {
                return PValue::Ok(false);
            }
            if self.match_char(term).is_ok() {
                return PValue::Ok(true);
            }
            if self.match_char(escape).is_ok() {
                // whatever the escape protects, terminator included
                let _ = self.take_any();
                continue;
            }
            let _ = self.take_while(|c| c != term && c != escape);
        }
    }

    /// String-terminator variant of [scan_delimited](LexerState::scan_delimited).
    /// The bulk-scan predicate is chosen from the first characters of the
    /// escape and terminator, so the inner loop runs over plain characters
    /// and only the boundaries pay for a full string match.
    pub fn scan_delimited_str(&mut self, escape: &str, term: &str) -> PValue<bool, LexError> {
        let term_head = term.chars().next();
        let escape_head = escape.chars().next();
        loop {
            if self.at_end() {
                return PValue::Ok(false);
            }
            if !term.is_empty() && self.match_str(term).is_ok() {
                return PValue::Ok(true);
            }
            if !escape.is_empty() && self.match_str(escape).is_ok() {
                let _ = self.take_any();
                continue;
            }
            let bulk = self.take_while(|c| Some(c) != term_head && Some(c) != escape_head);
            if bulk.is_backtrack() {
                // the next character heads a marker but completed neither
                let _ = self.take_any();
            }
        }
    }
}

#[cfg(test)]
mod __tests__ {
    use crate::lexer::LexerState;
    use crate::PValue;

    #[test]
    fn delimited_scan_honors_escapes() {
        let mut state: LexerState<i8> = LexerState::new(r#"a \" b" rest"#, 4);
        assert_eq!(state.scan_delimited('\\', '"'), PValue::Ok(true));
        assert_eq!(state.buffer(), r#"a \" b""#);
        assert_eq!(state.remaining(), " rest");
    }

    #[test]
    fn delimited_scan_reports_missing_terminator() {
        let mut state: LexerState<i8> = LexerState::new("never closed", 4);
        assert_eq!(state.scan_delimited('\\', '"'), PValue::Ok(false));
        assert!(state.at_end());
    }

    #[test]
    fn string_terminator_scan_skips_false_heads() {
        let mut state: LexerState<i8> = LexerState::new("a * b *not* c */ tail", 4);
        assert_eq!(state.scan_delimited_str("", "*/"), PValue::Ok(true));
        assert_eq!(state.buffer(), "a * b *not* c */");
        assert_eq!(state.remaining(), " tail");
    }
}
