use super::ParserState;
use crate::{Line, Location, LocatedToken, ParseError, Position, PValue};

impl<S, T: Clone> ParserState<S, T> {
    pub fn new(lines: Vec<Line<T>>, user: S) -> Self {
        Self {
            user,
            lines,
            line_index: 0,
            token_index: 0,
            lookahead: None,
            last_position: Position::origin(),
        }
    }

    pub fn user(&self) -> &S {
        &self.user
    }

    /// Mutable access to the caller state. Mutations survive backtracking;
    /// a combinator that speculates must restore what it changed.
    pub fn user_mut(&mut self) -> &mut S {
        &mut self.user
    }

    pub fn set_user(&mut self, user: S) {
        self.user = user;
    }

    fn pull(&mut self) -> Option<LocatedToken<T>> {
        while let Some(line) = self.lines.get(self.line_index) {
            if let Some((column, token)) = line.tokens.get(self.token_index) {
                let located = LocatedToken::new(line.number, *column, token.clone());
                self.token_index += 1;
                return Some(located);
            }
            self.line_index += 1;
            self.token_index = 0;
        }
        None
    }

    /// The next token without consuming it; fills and reuses the lookahead
    /// slot, so peeking is idempotent.
    pub fn peek(&mut self) -> PValue<LocatedToken<T>, ParseError<T>> {
        if self.lookahead.is_none() {
            self.lookahead = self.pull();
        }
        match &self.lookahead {
            Some(token) => PValue::Ok(token.clone()),
            None => PValue::Backtrack,
        }
    }

    /// The next token, consumed. Empties the lookahead slot.
    pub fn shift(&mut self) -> PValue<LocatedToken<T>, ParseError<T>> {
        let next = match self.lookahead.take() {
            Some(token) => Some(token),
            None => self.pull(),
        };
        match next {
            Some(token) => {
                self.last_position = token.position();
                PValue::Ok(token)
            }
            None => PValue::Backtrack,
        }
    }

    /// Restore a token to the front of the stream. The slot holds one
    /// token; pushing twice without a shift in between loses the first.
    pub fn push_back(&mut self, token: LocatedToken<T>) {
        debug_assert!(self.lookahead.is_none(), "pushback slot already occupied");
        self.lookahead = Some(token);
    }

    /// The position of the next unconsumed token, or of the last consumed
    /// one when the stream is exhausted.
    pub fn cursor(&mut self) -> Position {
        match self.peek() {
            PValue::Ok(token) => token.position(),
            _ => self.last_position,
        }
    }

    pub fn at_end(&mut self) -> bool {
        self.peek().is_backtrack()
    }

    /// A hard failure at the cursor, carrying the token in hand.
    pub fn failure(&mut self, message: String) -> ParseError<T> {
        let location = Location::at(self.cursor());
        let mut err = ParseError::new(location, message);
        if let PValue::Ok(token) = self.peek() {
            err = err.with_found(token.token);
        }
        err
    }
}

#[cfg(test)]
mod __tests__ {
    use super::ParserState;
    use crate::{Line, LocatedToken, Position, Token, TokenText};

    fn stream() -> Vec<Line<u8>> {
        Line::regroup(vec![
            LocatedToken::new(1, 1, Token::new(1u8, TokenText::Char('a'))),
            LocatedToken::new(1, 3, Token::new(2u8, TokenText::Char('b'))),
            LocatedToken::new(2, 1, Token::new(3u8, TokenText::Char('c'))),
        ])
    }

    #[test]
    fn peek_is_idempotent() {
        let mut state = ParserState::new(stream(), ());
        let first = state.peek().ok().unwrap();
        let second = state.peek().ok().unwrap();
        assert_eq!(first, second);
        assert_eq!(state.shift().ok().unwrap(), first);
    }

    #[test]
    fn shift_then_push_back_restores_the_stream() {
        let mut state = ParserState::new(stream(), ());
        let token = state.shift().ok().unwrap();
        state.push_back(token.clone());
        assert_eq!(state.peek().ok().unwrap(), token);
    }

    #[test]
    fn cursor_tracks_lines_and_exhaustion() {
        let mut state = ParserState::new(stream(), ());
        assert_eq!(state.cursor(), Position::new(1, 1));
        let _ = state.shift();
        let _ = state.shift();
        assert_eq!(state.cursor(), Position::new(2, 1));
        let _ = state.shift();
        assert!(state.at_end());
        assert_eq!(state.cursor(), Position::new(2, 1));
    }
}
