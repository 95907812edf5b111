//! A module of token-stream parser combinators with single-token lookahead
//! and compiled alternation.
//!
//! A [Parser] is a first-class value in one of three shapes: a plain
//! function over the [ParserState], a dispatch table keyed by token kind,
//! or a dispatch table keyed by token text. [or](Parser::or) merges two
//! same-shape tables into one, combining colliding branches with `or`
//! again, so an alternation whose branches each begin with a distinct
//! token compiles into a single indexed lookup instead of a linear
//! try-each chain — and a lookup miss backtracks *without consuming the
//! token*. Sequencing with [and_then](Parser::and_then) and
//! [map](Parser::map) distributes into table entries, so the compiled form
//! survives composition.
//!
//! # Example
//!
//! ```
//! use lang_pk::parser::{Parser, ParserState};
//! use lang_pk::{Line, LocatedToken, PValue, Token, TokenText};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
//! enum Tok {
//!     Word,
//!     Number,
//! }
//!
//! // an alternation over two distinct token kinds: one merged table
//! let item: Parser<(), Tok, &'static str> = Parser::kind(Tok::Word)
//!     .map(|_| "word")
//!     .or(&Parser::kind(Tok::Number).map(|_| "number"));
//!
//! let stream = vec![LocatedToken::new(1, 1, Token::new(Tok::Number, TokenText::Char('7')))];
//! let mut state = ParserState::new(Line::regroup(stream), ());
//! assert_eq!(item.run(&mut state), PValue::Ok("number"));
//! ```

mod combinator;
mod dispatch;
mod state;

#[cfg(test)]
mod __tests__;

use crate::{Line, LocatedToken, ParseError, Position, PValue};
use std::rc::Rc;

/// The state a parser run threads through its combinators: the remaining
/// token stream regrouped into lines, a single-token lookahead slot, and
/// an opaque caller state.
///
/// The caller state is read and written through
/// [user](ParserState::user) / [user_mut](ParserState::user_mut);
/// backtracking does *not* roll those mutations back.
pub struct ParserState<S, T> {
    user: S,
    lines: Vec<Line<T>>,
    line_index: usize,
    token_index: usize,
    lookahead: Option<LocatedToken<T>>,
    last_position: Position,
}

pub(crate) type ParserFn<S, T, A> =
    Rc<dyn Fn(&mut ParserState<S, T>) -> PValue<A, ParseError<T>>>;

pub(crate) enum ParserKind<S, T, A> {
    /// A plain parsing function.
    Thunk(ParserFn<S, T, A>),
    /// Branches discriminated by the kind of the next token; sorted and
    /// binary-searched.
    KindMap(Rc<Vec<(T, Parser<S, T, A>)>>),
    /// Branches discriminated by the text of the next token.
    TextMap(Rc<Vec<(String, Parser<S, T, A>)>>),
}

/// A composable parser over a located token stream, producing an `A`.
///
/// See the [module documentation](self) for the dispatch-table compilation
/// that makes wide alternations cheap.
pub struct Parser<S, T, A> {
    pub(crate) kind: ParserKind<S, T, A>,
}

impl<S, T, A> Clone for Parser<S, T, A> {
    fn clone(&self) -> Self {
        let kind = match &self.kind {
            ParserKind::Thunk(f) => ParserKind::Thunk(f.clone()),
            ParserKind::KindMap(entries) => ParserKind::KindMap(entries.clone()),
            ParserKind::TextMap(entries) => ParserKind::TextMap(entries.clone()),
        };
        Parser { kind }
    }
}
