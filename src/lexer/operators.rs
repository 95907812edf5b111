use super::{ILexeme, LexemeLogger, LexerState, Operators};
use crate::{LexError, Log, PValue};
use once_cell::unsync::OnceCell;
use std::fmt::Debug;

impl<TToken: Debug + Copy> Operators<TToken> {
    /// Create an [Operators] utility from a whitespace-separated operator
    /// list. The list is deduplicated and ordered longest first (ties
    /// lexically), which guarantees that `+=` lexes as one token and never
    /// as `+` followed by `=`.
    pub fn new(kind: TToken, operators: &str) -> Self {
        let mut fields: Vec<String> = operators.split_whitespace().map(String::from).collect();
        fields.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        fields.dedup();
        Self {
            kind,
            fields,
            log: OnceCell::new(),
        }
    }

    /// Set a log label to debug the lexeme.
    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), String> {
        self.assign_log(log)
    }
}

impl<TToken> LexemeLogger for Operators<TToken> {
    fn log_cell(&self) -> &OnceCell<Log<&'static str>> {
        &self.log
    }
}

impl<TToken: Debug + Copy> ILexeme for Operators<TToken> {
    type Token = TToken;

    fn scan(&self, state: &mut LexerState<Self::Token>) -> PValue<(), LexError> {
        for operator in &self.fields {
            if state.match_str(operator).is_ok() {
                let emitted = state.emit(self.kind, true);
                self.log_token(state);
                return emitted;
            }
        }
        self.log_miss(state.position());
        PValue::Backtrack
    }
}

#[cfg(test)]
mod __tests__ {
    use super::Operators;

    #[test]
    fn operators_are_ordered_longest_first() {
        let operators = Operators::new(0i8, "+ += - -= == = ==");
        assert_eq!(
            operators.fields,
            vec!["+=", "-=", "==", "+", "-", "="]
        );
    }
}
