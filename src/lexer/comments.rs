use super::{BlockComment, ILexeme, LexemeLogger, LexerState, LineComment};
use crate::{LexError, Log, PValue};
use once_cell::unsync::OnceCell;
use std::fmt::Debug;

impl<TToken: Debug + Copy> LineComment<TToken> {
    /// Create a [LineComment] utility opened by any of `markers`. With a
    /// `None` kind the comment is consumed silently; otherwise it is kept
    /// as a token.
    pub fn new(markers: Vec<&str>, kind: Option<TToken>) -> Self {
        let mut markers: Vec<String> = markers.into_iter().map(String::from).collect();
        markers.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        markers.dedup();
        Self {
            markers,
            kind,
            log: OnceCell::new(),
        }
    }

    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), String> {
        self.assign_log(log)
    }
}

impl<TToken> LexemeLogger for LineComment<TToken> {
    fn log_cell(&self) -> &OnceCell<Log<&'static str>> {
        &self.log
    }
}

impl<TToken: Debug + Copy> ILexeme for LineComment<TToken> {
    type Token = TToken;

    fn scan(&self, state: &mut LexerState<Self::Token>) -> PValue<(), LexError> {
        for marker in &self.markers {
            if state.match_str(marker).is_ok() {
                let _ = state.take_until(|c| c == '\n');
                return match self.kind {
                    Some(kind) => {
                        let emitted = state.emit(kind, true);
                        self.log_token(state);
                        emitted
                    }
                    None => {
                        state.skip_buffer();
                        PValue::Ok(())
                    }
                };
            }
        }
        PValue::Backtrack
    }
}

impl<TToken: Debug + Copy> BlockComment<TToken> {
    pub fn new(open: &str, close: &str, kind: Option<TToken>) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
            kind,
            log: OnceCell::new(),
        }
    }

    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), String> {
        self.assign_log(log)
    }
}

impl<TToken> LexemeLogger for BlockComment<TToken> {
    fn log_cell(&self) -> &OnceCell<Log<&'static str>> {
        &self.log
    }
}

impl<TToken: Debug + Copy> ILexeme for BlockComment<TToken> {
    type Token = TToken;

    fn scan(&self, state: &mut LexerState<Self::Token>) -> PValue<(), LexError> {
        if state.match_str(&self.open).is_backtrack() {
            return PValue::Backtrack;
        }
        match state.scan_delimited_str("", &self.close) {
            PValue::Ok(true) => match self.kind {
                Some(kind) => {
                    let emitted = state.emit(kind, true);
                    self.log_token(state);
                    emitted
                }
                None => {
                    state.skip_buffer();
                    PValue::Ok(())
                }
            },
            PValue::Ok(false) => state.fail(format!(
                "unterminated block comment; expected '{}'",
                self.close
            )),
            PValue::Backtrack => PValue::Backtrack,
            PValue::Fail(err) => PValue::Fail(err),
        }
    }
}
