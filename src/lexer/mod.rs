//! A module of lexeme utilities which scan the input through a buffered,
//! backtrack-safe [LexerState] and emit located tokens.
//!
//! Every primitive either commits characters from the input into the state's
//! buffer or leaves the state untouched and returns
//! [Backtrack](crate::PValue::Backtrack). Buffered characters become a token
//! through [emit](LexerState::emit), are discarded through
//! [skip_buffer](LexerState::skip_buffer), or are handed back to the input
//! through [rewind](LexerState::rewind); only the first two advance the
//! line/column accounting.
//!
//! A [Lexer] strings a sequence of lexeme utilities together: at every input
//! position the first utility that scans successfully wins, a utility that
//! backtracks is rewound before the next one runs, and a utility that fails
//! hard aborts the whole run.
//!
//! # Example
//!
//! ```
//! use lang_pk::lexer::{Identifiers, Lexer, Numbers, Operators, Whitespace};
//! use lang_pk::{PValue, TokenText};
//! use std::rc::Rc;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
//! enum Tok {
//!     Ident,
//!     Radix,
//!     Int,
//!     Dec,
//!     Sci,
//!     Op,
//! }
//!
//! let lexer = Lexer::new(vec![
//!     Rc::new(Whitespace::skip()),
//!     Rc::new(Identifiers::new(Tok::Ident)),
//!     Rc::new(Numbers::new(Tok::Radix, Tok::Int, Tok::Dec, Tok::Sci)),
//!     Rc::new(Operators::new(Tok::Op, "+ += - -= = ==")),
//! ]);
//!
//! let (result, state) = lexer.lex("total += 0xFF", 4);
//! match result {
//!     PValue::Ok(tokens) => {
//!         let kinds: Vec<Tok> = tokens.iter().map(|t| t.token.kind).collect();
//!         assert_eq!(kinds, vec![Tok::Ident, Tok::Op, Tok::Radix]);
//!         assert_eq!(tokens[1].token.text, TokenText::Str("+=".to_string()));
//!         assert_eq!((tokens[2].line, tokens[2].column), (1, 10));
//!     }
//!     other => panic!("lexing failed: {:?}", other),
//! }
//! assert!(state.at_end());
//! ```

mod comments;
mod driver;
mod identifiers;
mod literals;
mod numbers;
mod operators;
mod pattern;
mod scan;
mod state;
mod whitespace;

#[cfg(test)]
mod __tests__;

use crate::{LexError, Log, PValue};
use crate::{LocatedToken, Position};
use once_cell::unsync::OnceCell;
use regex::Regex;
use std::fmt::Debug;
use std::rc::Rc;

/// The mutable state a lexer run threads through every lexeme utility.
///
/// Characters move from the remaining input into `buffer` through the
/// matching primitives; [emit](LexerState::emit) turns the buffer into a
/// token stamped with the position where its first character was read.
pub struct LexerState<'c, T> {
    text: &'c str,
    cursor: usize,
    buffer: String,
    tab_width: usize,
    line: usize,
    column: usize,
    token_counter: usize,
    emitted: Vec<LocatedToken<T>>,
}

/// The interface of every lexeme utility.
///
/// A successful [scan](ILexeme::scan) must leave the state's buffer empty:
/// either emitted as a token or explicitly skipped. A scan that returns
/// `Backtrack` may leave residue in the buffer; the caller rewinds it.
pub trait ILexeme {
    type Token;

    fn scan(&self, state: &mut LexerState<Self::Token>) -> PValue<(), LexError>;
}

/// A lexeme utility matching a whitespace-separated list of operator
/// strings, longest first, so that compound operators win over their
/// prefixes.
///
/// All operators are emitted under one token kind with their text kept;
/// a parser discriminates them through its text dispatch table.
///
/// # Example
/// ```
/// use lang_pk::lexer::{Lexer, Operators};
/// use lang_pk::TokenText;
/// use std::rc::Rc;
///
/// let lexer = Lexer::new(vec![Rc::new(Operators::new(0i8, "+ += - -= == ="))]);
/// let (result, _) = lexer.lex("+=", 4);
/// let tokens = result.ok().unwrap();
/// assert_eq!(tokens.len(), 1);
/// assert_eq!(tokens[0].token.text, TokenText::Str("+=".to_string()));
/// ```
pub struct Operators<TToken> {
    kind: TToken,
    fields: Vec<String>,
    log: OnceCell<Log<&'static str>>,
}

/// A lexeme utility scanning numeric literals.
///
/// Recognizes an optional `0x`/`0X`/`0b`/`0B` prefix followed by hex
/// digits, or decimal digits with an optional fraction and an optional
/// exponent. One of four caller-supplied token kinds is emitted depending
/// on which of those shapes matched. Digits are *not* validated against
/// the radix here — `0b2` lexes as a base-prefixed literal and is the
/// parser's to reject.
pub struct Numbers<TToken> {
    prefixed: TToken,
    integer: TToken,
    decimal: TToken,
    scientific: TToken,
    log: OnceCell<Log<&'static str>>,
}

/// A lexeme utility for identifiers and keywords: an alphabetic or `_`
/// head, alphanumeric or `_` tail. The scanned word is looked up in the
/// keyword table and emitted under the keyword's token kind on a hit,
/// under the identifier kind otherwise.
///
/// # Example
/// ```
/// use lang_pk::lexer::{Identifiers, Lexer};
/// use std::rc::Rc;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Tok {
///     Ident,
///     If,
/// }
///
/// let words = Identifiers::with_keywords(Tok::Ident, vec![("if", Tok::If)]);
/// let lexer = Lexer::new(vec![Rc::new(words)]);
/// let (result, _) = lexer.lex("if", 4);
/// assert_eq!(result.ok().unwrap()[0].token.kind, Tok::If);
/// ```
pub struct Identifiers<TToken> {
    kind: TToken,
    keywords: Vec<(String, TToken)>,
    log: OnceCell<Log<&'static str>>,
}

/// A lexeme utility consuming a comment that runs to the end of the line,
/// opened by any of the configured markers (`//`, `--`, `#`, …).
pub struct LineComment<TToken> {
    markers: Vec<String>,
    kind: Option<TToken>,
    log: OnceCell<Log<&'static str>>,
}

/// A lexeme utility consuming a block comment between an opening and a
/// closing marker. An unterminated block comment is a hard failure.
pub struct BlockComment<TToken> {
    open: String,
    close: String,
    kind: Option<TToken>,
    log: OnceCell<Log<&'static str>>,
}

/// A lexeme utility for string literals delimited by a quote character,
/// with an escape character that protects the terminator. Unterminated
/// literals are a hard failure.
pub struct QuotedString<TToken> {
    quote: char,
    escape: char,
    kind: TToken,
    log: OnceCell<Log<&'static str>>,
}

/// A lexeme utility for character literals; same scanning discipline and
/// the same unterminated-is-a-failure policy as [QuotedString].
pub struct QuotedChar<TToken> {
    quote: char,
    escape: char,
    kind: TToken,
    log: OnceCell<Log<&'static str>>,
}

/// A lexeme utility consuming a run of whitespace, either skipped outright
/// or kept as a token.
pub struct Whitespace<TToken> {
    kind: Option<TToken>,
}

/// A regular-expression lexeme utility. The expression must be anchored
/// (`^`); whatever it matches at the current position is buffered and
/// emitted under the configured kind.
///
/// # Example
/// ```
/// use lang_pk::lexer::{Lexer, Pattern};
/// use std::rc::Rc;
///
/// let hex_color = Pattern::new(0i8, r"^#[0-9a-fA-F]{6}").unwrap();
/// let lexer = Lexer::new(vec![Rc::new(hex_color)]);
/// let (result, _) = lexer.lex("#00ff7f", 4);
/// assert_eq!(result.ok().unwrap().len(), 1);
/// ```
pub struct Pattern<TToken> {
    kind: TToken,
    regexp: Regex,
    log: OnceCell<Log<&'static str>>,
}

/// The lexer driver: a sequence of lexeme utilities tried in order at every
/// input position until the input is exhausted.
pub struct Lexer<TToken> {
    lexemes: Vec<Rc<dyn ILexeme<Token = TToken>>>,
    log: OnceCell<Log<&'static str>>,
}

pub(crate) trait LexemeLogger {
    fn log_cell(&self) -> &OnceCell<Log<&'static str>>;

    fn log_token<T: Debug>(&self, _state: &LexerState<T>) {
        #[cfg(debug_assertions)]
        if let Some(label) = self.log_cell().get() {
            if label.covers(&Log::Matches(())) {
                if let Some(token) = _state.emitted.last() {
                    println!(
                        "[{}; LexemeMatch]: {} at {}",
                        label,
                        token.token,
                        token.position()
                    );
                }
            }
        }
    }

    fn log_miss(&self, _position: Position) {
        #[cfg(debug_assertions)]
        if let Some(label) = self.log_cell().get() {
            if label.covers(&Log::Verbose(())) {
                println!("[{}; LexemeMiss]: at {}", label, _position);
            }
        }
    }

    fn assign_log(&self, log: Log<&'static str>) -> Result<(), String> {
        self.log_cell()
            .set(log)
            .map_err(|err| format!("Log label {} is already assigned.", err))
    }
}
