use super::{ILexeme, LexemeLogger, LexerState, Identifiers};
use crate::{LexError, Log, PValue};
use once_cell::unsync::OnceCell;
use std::fmt::Debug;

impl<TToken: Debug + Copy> Identifiers<TToken> {
    pub fn new(kind: TToken) -> Self {
        Self {
            kind,
            keywords: Vec::new(),
            log: OnceCell::new(),
        }
    }

    /// Create an [Identifiers] utility with a keyword table. A scanned word
    /// equal to a keyword is emitted under the keyword's kind instead of
    /// the identifier kind.
    pub fn with_keywords(kind: TToken, keywords: Vec<(&str, TToken)>) -> Self {
        let mut keywords: Vec<(String, TToken)> = keywords
            .into_iter()
            .map(|(word, token)| (word.to_string(), token))
            .collect();
        keywords.sort_by(|a, b| a.0.cmp(&b.0));
        Self {
            kind,
            keywords,
            log: OnceCell::new(),
        }
    }

    /// Set a log label to debug the lexeme.
    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), String> {
        self.assign_log(log)
    }
}

impl<TToken> LexemeLogger for Identifiers<TToken> {
    fn log_cell(&self) -> &OnceCell<Log<&'static str>> {
        &self.log
    }
}

impl<TToken: Debug + Copy> ILexeme for Identifiers<TToken> {
    type Token = TToken;

    fn scan(&self, state: &mut LexerState<Self::Token>) -> PValue<(), LexError> {
        if state
            .match_char_if(|c| c.is_alphabetic() || c == '_')
            .is_backtrack()
        {
            return PValue::Backtrack;
        }
        let _ = state.take_while(|c| c.is_alphanumeric() || c == '_');

        let word = state.buffer();
        let kind = match self
            .keywords
            .binary_search_by(|(keyword, _)| keyword.as_str().cmp(word))
        {
            Ok(index) => self.keywords[index].1,
            Err(_) => self.kind,
        };
        let emitted = state.emit(kind, true);
        self.log_token(state);
        emitted
    }
}

#[cfg(test)]
mod __tests__ {
    use super::Identifiers;
    use crate::lexer::{ILexeme, LexerState};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Word {
        Ident,
        If,
        Else,
    }

    fn lexeme() -> Identifiers<Word> {
        Identifiers::with_keywords(Word::Ident, vec![("if", Word::If), ("else", Word::Else)])
    }

    #[test]
    fn keywords_shadow_identifiers() {
        let mut state = LexerState::new("if", 4);
        assert!(lexeme().scan(&mut state).is_ok());
        assert_eq!(state.emitted()[0].token.kind, Word::If);
    }

    #[test]
    fn keyword_prefixes_stay_identifiers() {
        let mut state = LexerState::new("iffy_1", 4);
        assert!(lexeme().scan(&mut state).is_ok());
        assert_eq!(state.emitted()[0].token.kind, Word::Ident);
        assert_eq!(state.emitted()[0].token.text.to_string(), "iffy_1");
    }

    #[test]
    fn digits_cannot_lead() {
        let mut state = LexerState::new("1abc", 4);
        assert!(lexeme().scan(&mut state).is_backtrack());
    }
}
