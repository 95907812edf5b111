use super::LexerState;
use crate::{LexError, LocatedToken, PValue, Position, Token, TokenText};

impl<'c, T> LexerState<'c, T> {
    pub fn new(text: &'c str, tab_width: usize) -> Self {
        Self {
            text,
            cursor: 0,
            buffer: String::new(),
            tab_width,
            line: 1,
            column: 1,
            token_counter: 0,
            emitted: Vec::new(),
        }
    }

    /// The position of the first not-yet-accounted character; characters
    /// sitting in the buffer have not advanced it yet.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// The input remaining beyond the buffer.
    pub fn remaining(&self) -> &'c str {
        &self.text[self.cursor..]
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn token_count(&self) -> usize {
        self.token_counter
    }

    pub fn emitted(&self) -> &[LocatedToken<T>] {
        &self.emitted
    }

    pub fn into_tokens(self) -> Vec<LocatedToken<T>> {
        self.emitted
    }

    pub fn at_end(&self) -> bool {
        self.cursor == self.text.len()
    }

    /// Peek at the first remaining character without consuming it.
    pub fn peek_char(&self) -> PValue<char, LexError> {
        match self.remaining().chars().next() {
            Some(c) => PValue::Ok(c),
            None => PValue::Backtrack,
        }
    }

    /// Move the maximal non-empty prefix satisfying `predicate` into the
    /// buffer; backtrack when the first character already refuses.
    pub fn take_while<F: Fn(char) -> bool>(&mut self, predicate: F) -> PValue<(), LexError> {
        let matched = self
            .remaining()
            .char_indices()
            .find(|(_, c)| !predicate(*c))
            .map_or_else(|| self.remaining().len(), |(index, _)| index);
        if matched == 0 {
            PValue::Backtrack
        } else {
            self.advance_bytes(matched);
            PValue::Ok(())
        }
    }

    /// Dual of [take_while](LexerState::take_while): characters *not*
    /// satisfying `predicate`.
    pub fn take_until<F: Fn(char) -> bool>(&mut self, predicate: F) -> PValue<(), LexError> {
        self.take_while(|c| !predicate(c))
    }

    /// Move `value` into the buffer if the input starts with it.
    pub fn match_str(&mut self, value: &str) -> PValue<(), LexError> {
        if self.remaining().starts_with(value) {
            self.advance_bytes(value.len());
            PValue::Ok(())
        } else {
            PValue::Backtrack
        }
    }

    pub fn match_char(&mut self, value: char) -> PValue<char, LexError> {
        self.match_char_if(|c| c == value)
    }

    pub fn match_char_if<F: Fn(char) -> bool>(&mut self, predicate: F) -> PValue<char, LexError> {
        match self.remaining().chars().next() {
            Some(c) if predicate(c) => {
                self.advance_bytes(c.len_utf8());
                PValue::Ok(c)
            }
            _ => PValue::Backtrack,
        }
    }

    /// Consume any single character.
    pub fn take_any(&mut self) -> PValue<char, LexError> {
        self.match_char_if(|_| true)
    }

    pub(crate) fn advance_bytes(&mut self, count: usize) {
        let taken = &self.text[self.cursor..self.cursor + count];
        self.buffer.push_str(taken);
        self.cursor += count;
    }

    /// Form a token from the buffer, record it at the current position and
    /// advance the position over the buffered characters. Backtracks on an
    /// empty buffer; no zero-width tokens are emitted.
    pub fn emit(&mut self, kind: T, keep_text: bool) -> PValue<(), LexError> {
        if self.buffer.is_empty() {
            return PValue::Backtrack;
        }
        let text = if keep_text {
            TokenText::from_buffer(&self.buffer)
        } else {
            TokenText::Empty
        };
        self.emitted
            .push(LocatedToken::new(self.line, self.column, Token::new(kind, text)));
        self.token_counter += 1;
        self.consume_buffer();
        PValue::Ok(())
    }

    /// Discard the buffer without emitting, still advancing the position.
    pub fn skip_buffer(&mut self) {
        self.consume_buffer();
    }

    /// Hand the buffer back to the input and backtrack. The buffered
    /// characters were taken verbatim from the input, so this is cursor
    /// arithmetic; the position accounting never saw them.
    pub fn rewind<A>(&mut self) -> PValue<A, LexError> {
        self.cursor -= self.buffer.len();
        self.buffer.clear();
        PValue::Backtrack
    }

    /// Succeed when no input remains.
    pub fn eof(&self) -> PValue<(), LexError> {
        if self.at_end() {
            PValue::Ok(())
        } else {
            PValue::Backtrack
        }
    }

    /// A hard failure at the current position.
    pub fn fail<A, M: Into<String>>(&self, message: M) -> PValue<A, LexError> {
        PValue::Fail(LexError::new(self.position(), message.into()))
    }

    fn consume_buffer(&mut self) {
        for c in self.buffer.chars() {
            match c {
                '\t' => self.column += self.tab_width,
                '\n' => {
                    self.line += 1;
                    self.column = 1;
                }
                c if c.is_control() => {}
                _ => self.column += 1,
            }
        }
        self.buffer.clear();
    }
}
