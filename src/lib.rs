//! Language parsing & knowledge toolkit (lang_pk) is a library for building
//! domain-specific-language frontends out of two cooperating engines: a
//! backtracking lexer/parser pair whose alternations compile into indexed
//! dispatch tables, and a production-rule knowledge base whose rules are
//! pattern tries evaluated with fuzzy matching and predictive (completion
//! style) queries.
//!
//! # Overview
//!
//! Grammars written with this library are ordinary Rust values. The lexical
//! phase is assembled from lexeme utilities such as [Operators](crate::lexer::Operators),
//! [Numbers](crate::lexer::Numbers) and [Identifiers](crate::lexer::Identifiers),
//! each of which scans the input through a buffered, backtrack-safe
//! [LexerState](crate::lexer::LexerState). The parsing phase consumes the
//! located token stream through [Parser](crate::parser::Parser) combinators;
//! alternations over distinct token kinds or token texts are merged into a
//! single dispatch table so that wide `a | b | c | …` grammars select their
//! branch with one lookup instead of a linear try-each chain.
//!
//! Both engines report outcomes through the three-state [PValue]: `Ok` for
//! success, `Backtrack` for a soft non-match that alternation may recover
//! from, and `Fail` for a hard error that alternation must not swallow.
//!
//! The rule engine in [rule](crate::rule) shares that substrate but works on
//! token sequences instead of character streams: a [Rule](crate::rule::Rule)
//! is a tree of pattern-keyed branches, evaluated against an input sequence
//! to produce weighted results, and — through
//! [PartialQuery](crate::rule::PartialQuery) — predictions of the tokens
//! that could legally extend an incomplete query.
//!
//! # Example
//!
//! A small assignment language, lexed and parsed end to end:
//!
//! ```
//! use lang_pk::lexer::{Identifiers, Lexer, Numbers, Operators, Whitespace};
//! use lang_pk::parser::Parser;
//! use lang_pk::{Grammar, PValue};
//! use std::rc::Rc;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
//! enum Tok {
//!     Let,
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
//!     Rc::new(Identifiers::with_keywords(Tok::Ident, vec![("let", Tok::Let)])),
//!     Rc::new(Numbers::new(Tok::Radix, Tok::Int, Tok::Dec, Tok::Sci)),
//!     Rc::new(Operators::new(Tok::Op, "= + += - -=")),
//! ]);
//!
//! let assignment: Parser<(), Tok, (String, String)> = Parser::kind(Tok::Let)
//!     .then(&Parser::kind(Tok::Ident).expect("an identifier"))
//!     .and_then(|name| {
//!         Parser::text("=")
//!             .expect("'='")
//!             .then(&Parser::kind(Tok::Int).expect("an integer"))
//!             .map(move |value| {
//!                 (name.token.text.to_string(), value.token.text.to_string())
//!             })
//!     });
//!
//! let grammar = Grammar::new(4, lexer, assignment);
//!
//! match grammar.parse("let answer = 42", ()) {
//!     PValue::Ok((name, value)) => {
//!         assert_eq!(name, "answer");
//!         assert_eq!(value, "42");
//!     }
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```
//!
//! Rules and predictive queries:
//!
//! ```
//! use lang_pk::rule::{PartialQuery, Rule, Similarity};
//!
//! let greet: Rule<&str, &str, (), Vec<&str>, String> =
//!     Rule::from_edges(vec![vec!["hello", "world"], vec!["hello", "moon"]], Rule::value);
//!
//! let exact = |pattern: &&str, token: &&str| {
//!     if pattern == token {
//!         Similarity::ExactlyEqual
//!     } else {
//!         Similarity::Dissimilar
//!     }
//! };
//! fn literally<'a>(path: &[&'a str]) -> Vec<Vec<&'a str>> {
//!     vec![path.to_vec()]
//! }
//!
//! let partial = PartialQuery::new(&exact, &literally, 16);
//! let guesses = partial.guesses(&greet, (), vec!["hello"]);
//! assert_eq!(guesses, vec![vec!["moon"], vec!["world"]]);
//! ```
//!
//! # License
//! [lang_pk](crate) is provided under the MIT license.

mod error;
pub mod examples;
mod grammar;
pub mod lexer;
pub mod parser;
mod position;
mod predicate;
pub mod rule;
mod token;
mod util;

pub use error::{LexError, ParseError};
pub use grammar::Grammar;
pub use position::{Location, Position};
pub use predicate::PValue;
pub use token::{Line, LocatedToken, Token, TokenText};
pub use util::Log;
